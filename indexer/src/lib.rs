//! Build the `index.json` manifest for a directory of benchmark results.
//!
//! The data directory holds one directory per day, named `YYYY-MM-DD`, each containing
//! `<commit>-bench.json` files and optional companions such as `<commit>-regression.json`. See
//! [scan::Scanner] for how runs are found and [write::write_index] for the output format.

pub mod error;
pub mod scan;
pub mod write;

pub use bench_index_model::{CompanionKind, IndexDocument, RunRecord};
pub use error::{IndexError, IndexResult};
pub use scan::{scan_data_dir, ScanOptions, Scanner};
pub use write::write_index;
