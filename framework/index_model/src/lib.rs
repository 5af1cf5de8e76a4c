use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// One benchmark run found in the data directory
///
/// A run is keyed by the date directory it was found in and the commit that was benchmarked. All
/// paths are relative to the root of the data directory and always use `/` as the separator, so
/// that the index can be served as-is to a dashboard.
///
/// Field order here is the key order in the serialized index. Companion fields that are `None` are
/// left out of the output entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunRecord {
    /// The name of the date directory, expected to be `YYYY-MM-DD`
    ///
    /// This is never parsed as a date. Ordering of runs relies on the names sorting
    /// lexicographically.
    pub date: String,
    /// The commit the run was made for
    ///
    /// This is everything in the primary file name before the `-bench.json` suffix. It may be
    /// empty if the data directory contains a file named exactly `-bench.json`.
    pub commit: String,
    /// Path to the primary `<commit>-bench.json` file
    pub bench: String,
    /// Path to the `<commit>-jit-bench.json` file, if one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jit_bench: Option<String>,
    /// Path to the `<commit>-regression.json` file, if one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regression: Option<String>,
    /// Path to the `<commit>-jit-regression.json` file, if one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jit_regression: Option<String>,
    /// Path to the `<commit>-cross-client.json` file, if one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_client: Option<String>,
}

impl RunRecord {
    /// Create a run record with no companion files
    pub fn new(date: String, commit: String, bench: String) -> Self {
        Self {
            date,
            commit,
            bench,
            jit_bench: None,
            regression: None,
            jit_regression: None,
            cross_client: None,
        }
    }

    /// Get the path recorded for a companion file
    pub fn companion(&self, kind: CompanionKind) -> Option<&str> {
        match kind {
            CompanionKind::JitBench => self.jit_bench.as_deref(),
            CompanionKind::Regression => self.regression.as_deref(),
            CompanionKind::JitRegression => self.jit_regression.as_deref(),
            CompanionKind::CrossClient => self.cross_client.as_deref(),
        }
    }

    /// Record the path of a companion file
    pub fn set_companion(&mut self, kind: CompanionKind, path: String) {
        let slot = match kind {
            CompanionKind::JitBench => &mut self.jit_bench,
            CompanionKind::Regression => &mut self.regression,
            CompanionKind::JitRegression => &mut self.jit_regression,
            CompanionKind::CrossClient => &mut self.cross_client,
        };
        *slot = Some(path);
    }
}

/// The optional files that can sit next to a primary bench file for the same commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanionKind {
    JitBench,
    Regression,
    JitRegression,
    CrossClient,
}

impl CompanionKind {
    /// Every companion kind, in the order they appear in a serialized [RunRecord]
    pub const ALL: [CompanionKind; 4] = [
        CompanionKind::JitBench,
        CompanionKind::Regression,
        CompanionKind::JitRegression,
        CompanionKind::CrossClient,
    ];

    /// The part of the file name between `<commit>-` and `.json`
    pub fn suffix(self) -> &'static str {
        match self {
            CompanionKind::JitBench => "jit-bench",
            CompanionKind::Regression => "regression",
            CompanionKind::JitRegression => "jit-regression",
            CompanionKind::CrossClient => "cross-client",
        }
    }

    /// The name of the [RunRecord] field that holds this companion
    pub fn field_name(self) -> &'static str {
        match self {
            CompanionKind::JitBench => "jit_bench",
            CompanionKind::Regression => "regression",
            CompanionKind::JitRegression => "jit_regression",
            CompanionKind::CrossClient => "cross_client",
        }
    }

    /// The expected file name of this companion for `commit`
    pub fn file_name(self, commit: &str) -> String {
        format!("{commit}-{}.json", self.suffix())
    }
}

/// The index document written to `index.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexDocument {
    /// Runs in the order the scanner found them
    pub runs: Vec<RunRecord>,
}

impl IndexDocument {
    pub fn new(runs: Vec<RunRecord>) -> Self {
        Self { runs }
    }
}

/// Borrowed form of [IndexDocument] so that runs can be written without cloning them.
#[derive(Serialize)]
struct IndexDocumentRef<'a> {
    runs: &'a [RunRecord],
}

/// Serialize runs as an index document to a writer
///
/// The output is pretty printed with two space indentation and ends with a newline. The same runs
/// always produce the same bytes.
pub fn store_index<W: Write>(runs: &[RunRecord], writer: &mut W) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &IndexDocumentRef { runs })?;
    writer.write_all(b"\n")
}

/// Load an index document from a reader
pub fn load_index<R: Read>(reader: R) -> anyhow::Result<IndexDocument> {
    let reader = std::io::BufReader::new(reader);
    let index: IndexDocument = serde_json::from_reader(reader)?;
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_run() -> RunRecord {
        let mut run = RunRecord::new(
            "2026-02-26".to_string(),
            "abc123def".to_string(),
            "2026-02-26/abc123def-bench.json".to_string(),
        );
        run.set_companion(
            CompanionKind::Regression,
            "2026-02-26/abc123def-regression.json".to_string(),
        );
        run.set_companion(
            CompanionKind::JitBench,
            "2026-02-26/abc123def-jit-bench.json".to_string(),
        );
        run
    }

    #[test]
    fn store_index_matches_expected_layout() {
        let runs = vec![
            RunRecord::new(
                "2026-02-24".to_string(),
                "ccc".to_string(),
                "2026-02-24/ccc-bench.json".to_string(),
            ),
            sample_run(),
        ];

        let mut out = Vec::new();
        store_index(&runs, &mut out).unwrap();

        let expected = r#"{
  "runs": [
    {
      "date": "2026-02-24",
      "commit": "ccc",
      "bench": "2026-02-24/ccc-bench.json"
    },
    {
      "date": "2026-02-26",
      "commit": "abc123def",
      "bench": "2026-02-26/abc123def-bench.json",
      "jit_bench": "2026-02-26/abc123def-jit-bench.json",
      "regression": "2026-02-26/abc123def-regression.json"
    }
  ]
}
"#;
        assert_eq!(expected, String::from_utf8(out).unwrap());
    }

    #[test]
    fn store_empty_index() {
        let mut out = Vec::new();
        store_index(&[], &mut out).unwrap();
        assert_eq!("{\n  \"runs\": []\n}\n", String::from_utf8(out).unwrap());
    }

    #[test]
    fn load_what_was_stored() {
        let runs = vec![sample_run()];
        let mut out = Vec::new();
        store_index(&runs, &mut out).unwrap();

        let index = load_index(out.as_slice()).unwrap();
        assert_eq!(IndexDocument::new(runs), index);
    }

    #[test]
    fn companion_fields_follow_kind() {
        let run = sample_run();
        assert_eq!(
            Some("2026-02-26/abc123def-jit-bench.json"),
            run.companion(CompanionKind::JitBench)
        );
        assert_eq!(None, run.companion(CompanionKind::CrossClient));

        let value = serde_json::to_value(&run).unwrap();
        for kind in CompanionKind::ALL {
            assert_eq!(
                run.companion(kind).is_some(),
                value.get(kind.field_name()).is_some(),
                "{kind:?}"
            );
        }
    }

    #[test]
    fn companion_file_names() {
        assert_eq!("abc-jit-bench.json", CompanionKind::JitBench.file_name("abc"));
        assert_eq!(
            "abc-jit-regression.json",
            CompanionKind::JitRegression.file_name("abc")
        );
        assert_eq!(
            "abc-cross-client.json",
            CompanionKind::CrossClient.file_name("abc")
        );
    }
}
