//! # File I/O
//!
//! Reading and writing project JSON files.
//!
//! - **Atomic saves**: write to `<path>.tmp`, sync, then rename over the
//!   target, so an interrupted save never leaves a truncated project
//! - **Version check**: files from an incompatible schema are rejected on load

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Sibling path a save is staged in before the rename: `<path>.tmp`
pub fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_os_string();
    staged.push(".tmp");
    PathBuf::from(staged)
}

fn io_error<'a>(operation: &str, path: &'a Path) -> impl FnOnce(std::io::Error) -> CalcError + 'a {
    let operation = operation.to_string();
    move |e| CalcError::file_error(operation, path.display().to_string(), e.to_string())
}

/// Write `project` to `path` through a staged file.
///
/// ```rust,no_run
/// use std::path::Path;
/// use beam_core::{save_project, Project};
///
/// save_project(&Project::default(), Path::new("beam.json"))?;
/// # Ok::<(), beam_core::CalcError>(())
/// ```
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = project.to_json()?;
    let staged = staging_path(path);

    let write_staged = || -> CalcResult<()> {
        let mut file = File::create(&staged).map_err(io_error("create staging file", &staged))?;
        file.write_all(json.as_bytes())
            .map_err(io_error("write staging file", &staged))?;
        file.sync_all().map_err(io_error("sync staging file", &staged))
    };

    if let Err(e) = write_staged().and_then(|()| {
        fs::rename(&staged, path).map_err(io_error("replace project file", path))
    }) {
        let _ = fs::remove_file(&staged);
        return Err(e);
    }

    debug!("Saved project '{}' to {}", project.label, path.display());
    Ok(())
}

/// Read a project file, rejecting schemas this build cannot read.
///
/// Fails with `FileError` when the file cannot be opened,
/// `SerializationError` on malformed JSON and `VersionMismatch` on an
/// incompatible `schema_version`.
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let file = File::open(path).map_err(io_error("open", path))?;
    let project: Project = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        CalcError::SerializationError {
            reason: format!("{}: {}", path.display(), e),
        }
    })?;

    validate_version(&project.schema_version)?;
    debug!(
        "Loaded project '{}' from {} ({} load cases, {} combinations)",
        project.label,
        path.display(),
        project.load_cases.len(),
        project.combinations.len()
    );
    Ok(project)
}

/// Major versions must match; for 0.x schemas a newer minor is rejected too.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };
    let parse = |v: &str| -> Option<Vec<u32>> { v.split('.').map(|p| p.parse().ok()).collect() };

    let file_parts = parse(file_version).ok_or_else(mismatch)?;
    let current_parts = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, ..], [major, ..]) if file_major != major => Err(mismatch()),
        ([0, file_minor, ..], [0, minor, ..]) if file_minor > minor => Err(mismatch()),
        ([_, ..], [_, ..]) => Ok(()),
        _ => Err(mismatch()),
    }
}
