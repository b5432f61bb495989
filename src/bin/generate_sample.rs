use std::path::Path;

use csv::WriterBuilder;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Metadata preamble every ROI export carries before its header row.
const PREAMBLE: [(&str, &str); 10] = [
    ("instrument", "SIM-2000"),
    ("detector", "ccd-a"),
    ("operator", "sim"),
    ("date", "2024-01-01"),
    ("exposure_ms", "120"),
    ("gain", "1.4"),
    ("binning", "1x1"),
    ("bit_depth", "8"),
    ("units", "counts"),
    ("comment", "synthetic ROI export"),
];

fn main() {
    let mut rng = SimpleRng::new(42);

    let out_dir = Path::new("sample_rois");
    std::fs::create_dir_all(out_dir).expect("Failed to create output folder");

    // One file per slide, three ROI columns each, distinct intensity bands.
    let files: [(&str, [(f64, f64); 3]); 4] = [
        ("roi_01.csv", [(60.0, 8.0), (85.0, 10.0), (110.0, 12.0)]),
        ("roi_02.csv", [(70.0, 9.0), (95.0, 11.0), (120.0, 14.0)]),
        ("roi_03.csv", [(55.0, 6.0), (80.0, 9.0), (105.0, 10.0)]),
        ("roi_04.csv", [(65.0, 7.0), (90.0, 10.0), (115.0, 13.0)]),
    ];

    let rows_per_file = 60;
    let mut total_values = 0_usize;

    for (name, bands) in &files {
        let path = out_dir.join(name);
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .from_path(&path)
            .expect("Failed to create CSV writer");

        for (key, value) in &PREAMBLE {
            writer
                .write_record([*key, *value])
                .expect("Failed to write preamble");
        }
        writer
            .write_record(["pixel", "roi_a", "roi_b", "roi_c"])
            .expect("Failed to write header");

        for row in 0..rows_per_file {
            let mut record = vec![row.to_string()];
            for &(mean, std_dev) in bands {
                // A few null cells per file exercise the loader's skipping.
                if rng.next_f64() < 0.03 {
                    record.push(String::new());
                } else {
                    let level = rng.gauss(mean, std_dev).round().clamp(0.0, 255.0);
                    record.push(format!("{level:.0}"));
                    total_values += 1;
                }
            }
            writer.write_record(&record).expect("Failed to write row");
        }
        writer.flush().expect("Failed to flush CSV");
    }

    println!(
        "Wrote {} files ({} pixel values) to {}",
        files.len(),
        total_values,
        out_dir.display()
    );
}
