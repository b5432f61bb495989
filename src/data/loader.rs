use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use super::model::PixelDataset;

// ---------------------------------------------------------------------------
// Directory ingestion
// ---------------------------------------------------------------------------

/// Metadata lines at the top of every ROI export, before the header row.
pub const PREAMBLE_LINES: usize = 10;

/// Load every `.csv` file directly under `dir` into one flat dataset.
///
/// Files are sorted by path; within a file, values are read column by
/// column. A folder without any `.csv` file is an error; a file with no
/// data rows simply contributes nothing.
pub fn load_directory(dir: &Path) -> Result<PixelDataset> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("reading folder {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_csv_extension(path))
        .collect();
    files.sort();

    if files.is_empty() {
        bail!("Select a folder that contains .csv files.");
    }

    let mut values = Vec::new();
    for path in &files {
        let file_values =
            load_file(path).with_context(|| format!("reading {}", path.display()))?;
        values.extend(file_values);
    }

    Ok(PixelDataset { values, files })
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

// ---------------------------------------------------------------------------
// Single-file parse
// ---------------------------------------------------------------------------

/// Parse one ROI export into its pixel values.
///
/// Layout: `PREAMBLE_LINES` metadata lines, then a header row whose width
/// fixes the column count, then data rows. The first column is a row index
/// and contributes no values. Cells are read column by column; empty cells
/// and cells that do not parse as a finite number are dropped as nulls.
fn load_file(path: &Path) -> Result<Vec<f64>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let mut rows: Vec<csv::StringRecord> = Vec::new();
    for (row_no, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record);
    }

    // Preamble plus header; anything shorter has no data rows.
    if rows.len() <= PREAMBLE_LINES {
        return Ok(Vec::new());
    }

    let n_cols = rows[PREAMBLE_LINES].len();
    let data_rows = &rows[PREAMBLE_LINES + 1..];

    let mut values = Vec::new();
    for col in 1..n_cols {
        for row in data_rows {
            let Some(cell) = row.get(col) else { continue };
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            if let Ok(v) = cell.parse::<f64>() {
                if v.is_finite() {
                    values.push(v);
                }
            }
        }
    }

    Ok(values)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Write an ROI export: 10 preamble lines, header, index column + cells.
    fn write_roi_csv(dir: &Path, name: &str, columns: &[&[&str]]) {
        let path = dir.join(name);
        let mut file = std::fs::File::create(path).unwrap();
        for i in 0..PREAMBLE_LINES {
            writeln!(file, "meta_{i},value_{i}").unwrap();
        }
        let header: Vec<String> = std::iter::once("pixel".to_string())
            .chain((0..columns.len()).map(|c| format!("roi_{c}")))
            .collect();
        writeln!(file, "{}", header.join(",")).unwrap();

        let n_rows = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        for row in 0..n_rows {
            let mut cells = vec![row.to_string()];
            for col in columns {
                cells.push(col.get(row).copied().unwrap_or("").to_string());
            }
            writeln!(file, "{}", cells.join(",")).unwrap();
        }
    }

    #[test]
    fn combines_files_in_file_then_column_order() {
        let dir = tempfile::tempdir().unwrap();
        write_roi_csv(dir.path(), "a.csv", &[&["1", "2", "3"][..]]);
        write_roi_csv(dir.path(), "b.csv", &[&["4", "5"][..]]);

        let dataset = load_directory(dir.path()).unwrap();
        assert_eq!(dataset.values, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(dataset.file_count(), 2);
        assert_eq!(dataset.min(), Some(1.0));
        assert_eq!(dataset.max(), Some(5.0));
    }

    #[test]
    fn reads_columns_before_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_roi_csv(dir.path(), "roi.csv", &[&["1", "2"][..], &["10", "20"][..]]);

        let dataset = load_directory(dir.path()).unwrap();
        assert_eq!(dataset.values, vec![1.0, 2.0, 10.0, 20.0]);
    }

    #[test]
    fn skips_null_and_non_numeric_cells() {
        let dir = tempfile::tempdir().unwrap();
        write_roi_csv(
            dir.path(),
            "roi.csv",
            &[&["1", "", "3", "n/a", "nan", "5"][..]],
        );

        let dataset = load_directory(dir.path()).unwrap();
        assert_eq!(dataset.values, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn index_column_contributes_no_values() {
        let dir = tempfile::tempdir().unwrap();
        // Index cells are 0, 1, 2 – none of them may leak into the data.
        write_roi_csv(dir.path(), "roi.csv", &[&["7", "8", "9"][..]]);

        let dataset = load_directory(dir.path()).unwrap();
        assert_eq!(dataset.values, vec![7.0, 8.0, 9.0]);
    }

    #[test]
    fn file_with_only_preamble_contributes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.csv");
        let mut file = std::fs::File::create(path).unwrap();
        for i in 0..5 {
            writeln!(file, "meta_{i},value_{i}").unwrap();
        }
        drop(file);
        write_roi_csv(dir.path(), "real.csv", &[&["42"][..]]);

        let dataset = load_directory(dir.path()).unwrap();
        assert_eq!(dataset.values, vec![42.0]);
    }

    #[test]
    fn folder_without_csv_files_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a csv").unwrap();

        let err = load_directory(dir.path()).unwrap_err();
        assert!(err.to_string().contains(".csv"));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        write_roi_csv(dir.path(), "upper.CSV", &[&["6"][..]]);

        let dataset = load_directory(dir.path()).unwrap();
        assert_eq!(dataset.values, vec![6.0]);
    }
}
