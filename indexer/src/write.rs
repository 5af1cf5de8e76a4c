use crate::error::{IndexError, IndexResult};
use bench_index_model::{store_index, RunRecord};
use std::fs::Permissions;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `runs` as the index document at `output_path`.
///
/// Missing parent directories are created. The document is written to a temporary file next to
/// the target and then renamed over it, so on failure the target is either untouched or absent,
/// never half written. An existing index is replaced.
pub fn write_index(runs: &[RunRecord], output_path: impl AsRef<Path>) -> IndexResult<()> {
    let output_path = output_path.as_ref();
    let parent = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(parent).map_err(|source| IndexError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;

    let write_err = |source: std::io::Error| IndexError::Write {
        path: output_path.to_path_buf(),
        source,
    };

    log::debug!("Writing {} runs to {}", runs.len(), output_path.display());

    let mut file = NamedTempFile::new_in(parent).map_err(write_err)?;
    {
        let mut writer = BufWriter::new(file.as_file_mut());
        store_index(runs, &mut writer).map_err(write_err)?;
        writer.flush().map_err(write_err)?;
    }

    // Temporary files are created owner-only, the index is meant to be served.
    if let Some(permissions) = index_permissions(output_path) {
        file.as_file().set_permissions(permissions).map_err(write_err)?;
    }
    file.as_file().sync_all().map_err(write_err)?;

    file.persist(output_path).map_err(|e| write_err(e.error))?;

    Ok(())
}

/// Keep the permissions of an index being replaced, otherwise use the usual file default.
fn index_permissions(output_path: &Path) -> Option<Permissions> {
    match std::fs::metadata(output_path) {
        Ok(metadata) if metadata.is_file() => Some(metadata.permissions()),
        _ => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_runs() -> Vec<RunRecord> {
        vec![RunRecord::new(
            "2026-02-26".to_string(),
            "abc".to_string(),
            "2026-02-26/abc-bench.json".to_string(),
        )]
    }

    #[test]
    fn creates_missing_parent_dirs() {
        let tempdir = tempfile::tempdir().expect("failed to create temp dir");
        let out_path = tempdir.path().join("a").join("b").join("index.json");

        write_index(&sample_runs(), &out_path).unwrap();

        assert!(out_path.is_file());
        // Only the index is left behind, no temporary files
        let entries = std::fs::read_dir(out_path.parent().unwrap()).unwrap().count();
        assert_eq!(1, entries);
    }

    #[test]
    fn overwrites_existing_index() {
        let tempdir = tempfile::tempdir().expect("failed to create temp dir");
        let out_path = tempdir.path().join("index.json");
        std::fs::write(&out_path, "{\"runs\": [{\"date\": \"stale\"}]}\n").unwrap();

        write_index(&[], &out_path).unwrap();

        assert_eq!(
            "{\n  \"runs\": []\n}\n",
            std::fs::read_to_string(&out_path).unwrap()
        );
    }

    #[test]
    fn parent_is_a_file() {
        let tempdir = tempfile::tempdir().expect("failed to create temp dir");
        let blocker = tempdir.path().join("data");
        std::fs::write(&blocker, "").unwrap();
        let out_path = blocker.join("index.json");

        let err = write_index(&sample_runs(), &out_path).unwrap_err();
        assert!(matches!(err, IndexError::CreateDir { .. }), "{err:?}");
        assert_eq!(blocker, err.path());
    }

    #[test]
    fn target_is_a_directory() {
        let tempdir = tempfile::tempdir().expect("failed to create temp dir");
        let out_path = tempdir.path().join("index.json");
        std::fs::create_dir(&out_path).unwrap();

        let err = write_index(&sample_runs(), &out_path).unwrap_err();
        assert!(matches!(err, IndexError::Write { .. }), "{err:?}");
        assert_eq!(out_path, err.path());
        assert!(err.to_string().contains("index.json"));
    }

    #[cfg(unix)]
    #[test]
    fn new_index_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let tempdir = tempfile::tempdir().expect("failed to create temp dir");
        let out_path = tempdir.path().join("index.json");

        write_index(&sample_runs(), &out_path).unwrap();

        let mode = std::fs::metadata(&out_path).unwrap().permissions().mode();
        assert_eq!(0o644, mode & 0o777);
    }
}
