use crate::error::{IndexError, IndexResult};
use bench_index_model::{CompanionKind, RunRecord};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Suffix of a primary bench file.
pub const BENCH_SUFFIX: &str = "-bench.json";

/// Suffix of the JIT bench companion, which also ends with [BENCH_SUFFIX] but never anchors a run.
pub const JIT_BENCH_SUFFIX: &str = "-jit-bench.json";

/// Options for configuring a [Scanner]
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub strict: bool,
}

impl ScanOptions {
    /// Set `strict` option
    ///
    /// When set, date directories must be named `DDDD-DD-DD` and commits must be non-empty
    /// lowercase hex. Anything else is skipped rather than indexed.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Finds benchmark runs in a data directory laid out as `<date>/<commit>-bench.json`.
pub struct Scanner {
    options: ScanOptions,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Scan `data_dir` and return the runs found, ordered by date directory name and then by file
    /// name.
    ///
    /// A data directory that does not exist has no runs.
    pub fn scan(&self, data_dir: &Path) -> IndexResult<Vec<RunRecord>> {
        let mut runs = vec![];

        if !data_dir.exists() {
            log::debug!(
                "Data directory {} does not exist, no runs to index",
                data_dir.display()
            );
            return Ok(runs);
        }

        for entry in list_dir(data_dir) {
            let entry = entry.map_err(|e| scan_error(data_dir, e))?;
            if !entry.path().is_dir() {
                log::trace!("Skipping non-directory {}", entry.path().display());
                continue;
            }

            let Some(date) = utf8_name(&entry) else {
                continue;
            };
            if self.options.strict && !is_date_name(date) {
                log::debug!("Skipping directory with invalid date name: {date}");
                continue;
            }

            self.scan_date_dir(entry.path(), date, &mut runs);
        }

        Ok(runs)
    }

    /// A date directory that cannot be listed contributes no runs, the rest of the data directory
    /// is still indexed.
    fn scan_date_dir(&self, date_dir: &Path, date: &str, runs: &mut Vec<RunRecord>) {
        for entry in list_dir(date_dir) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!(
                        "Skipping unreadable date directory {}: {e}",
                        date_dir.display()
                    );
                    return;
                }
            };
            let Some(name) = utf8_name(&entry) else {
                continue;
            };

            let Some(commit) = name.strip_suffix(BENCH_SUFFIX) else {
                continue;
            };
            if name.ends_with(JIT_BENCH_SUFFIX) {
                continue;
            }
            if self.options.strict && !is_commit(commit) {
                log::debug!("Skipping {date}/{name}, invalid commit");
                continue;
            }

            let mut run =
                RunRecord::new(date.to_string(), commit.to_string(), format!("{date}/{name}"));
            for kind in CompanionKind::ALL {
                let file_name = kind.file_name(commit);
                if date_dir.join(&file_name).exists() {
                    log::trace!("Found {} for {date}/{commit}", kind.field_name());
                    run.set_companion(kind, format!("{date}/{file_name}"));
                }
            }

            log::debug!("Indexed run {date}/{commit}");
            runs.push(run);
        }
    }
}

/// Scan `data_dir` with the default, permissive options.
pub fn scan_data_dir(data_dir: impl AsRef<Path>) -> IndexResult<Vec<RunRecord>> {
    Scanner::new(ScanOptions::default()).scan(data_dir.as_ref())
}

/// Immediate children of `dir`, sorted by file name.
fn list_dir(dir: &Path) -> walkdir::IntoIter {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
}

fn scan_error(dir: &Path, source: walkdir::Error) -> IndexError {
    IndexError::Scan {
        path: source.path().unwrap_or(dir).to_path_buf(),
        source,
    }
}

fn utf8_name(entry: &DirEntry) -> Option<&str> {
    let name = entry.file_name().to_str();
    if name.is_none() {
        log::warn!("Skipping entry with non UTF-8 name: {}", entry.path().display());
    }
    name
}

/// `DDDD-DD-DD` with ASCII digits. Does not check that the date exists.
fn is_date_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn is_commit(commit: &str) -> bool {
    !commit.is_empty() && commit.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
