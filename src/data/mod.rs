/// Data layer: core types, loading, statistics, and queries.
///
/// Architecture:
/// ```text
///  folder of .csv files
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  skip preamble, drop nulls → PixelDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ PixelDataset │  flat Vec<f64>, file-then-column order
///   └─────────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌──────────┐  ┌──────────┐  ┌───────────┐
///   │  stats    │  │  filter   │  │ histogram  │
///   │ Summary   │  │ range /   │  │ adaptive   │
///   │           │  │ queries   │  │ binning    │
///   └──────────┘  └──────────┘  └───────────┘
/// ```

pub mod filter;
pub mod histogram;
pub mod loader;
pub mod model;
pub mod stats;
