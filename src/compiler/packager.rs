//! Builds an `.air` archive from a serialized configuration and the local
//! artifacts it references.

use crate::compiler::archive::{self, CONFIG_FILE};
use crate::compiler::converter::{self, ModelConverter, QuantizationDtype};
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Scratch directory removed on drop. Removal errors are ignored.
struct WorkingDir {
    path: PathBuf,
}

impl WorkingDir {
    /// Creates the directory, failing with `Error::Conflict` if it is already there.
    fn create(path: PathBuf) -> Result<Self> {
        match fs::create_dir(&path) {
            Ok(()) => Ok(Self { path }),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(Error::Conflict(path)),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for WorkingDir {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_dir_all(&self.path) {
            debug!("Could not remove {}: {}", self.path.display(), e);
        }
    }
}

/// `Demo.air` -> `Demo`, next to the archive.
pub fn working_dir_for(filename: &Path) -> PathBuf {
    filename.with_extension("")
}

fn zip_path_for(filename: &Path) -> PathBuf {
    let mut s = OsString::from(filename.as_os_str());
    s.push(".zip");
    PathBuf::from(s)
}

fn basename(file: &Path) -> Result<&OsStr> {
    file.file_name().ok_or_else(|| {
        Error::validation("path", format!("'{}' does not name a file", file.display()))
    })
}

/// Artifacts land in the archive root under their basename. The same path
/// listed twice is packaged once; two different paths with one basename, or a
/// basename of `config.json`, are rejected.
fn unique_artifacts(files: &[PathBuf]) -> Result<Vec<&Path>> {
    let mut seen: HashMap<&OsStr, &Path> = HashMap::new();
    let mut unique = Vec::with_capacity(files.len());
    for file in files {
        let name = basename(file)?;
        if name == CONFIG_FILE {
            return Err(Error::validation(
                "path",
                format!("'{}' would replace the archive's {}", file.display(), CONFIG_FILE),
            ));
        }
        match seen.get(name) {
            Some(&first) if first == file.as_path() => {
                debug!("Skipping repeated artifact {}", file.display());
            }
            Some(&first) => {
                warn!(
                    "Artifacts {} and {} share the name {:?}",
                    first.display(),
                    file.display(),
                    name
                );
                return Err(Error::validation(
                    "path",
                    format!(
                        "'{}' and '{}' would both be packaged as {:?}",
                        first.display(),
                        file.display(),
                        name
                    ),
                ));
            }
            None => {
                seen.insert(name, file);
                unique.push(file.as_path());
            }
        }
    }
    Ok(unique)
}

fn add_artifact(
    workdir: &Path,
    file: &Path,
    dtype: Option<QuantizationDtype>,
    converter: &dyn ModelConverter,
) -> Result<()> {
    let dest = workdir.join(basename(file)?);

    if converter::is_convertible(file) {
        fs::create_dir(&dest)?;
        converter.convert(file, &dest, dtype)?;
    } else {
        debug!("Copying {} -> {}", file.display(), dest.display());
        fs::copy(file, &dest)?;
    }
    Ok(())
}

/// Writes `document` as `config.json` plus every file in `files` into a
/// scratch directory, zips it and moves the zip to `filename`.
///
/// The scratch directory is named after `filename` without its extension and
/// must not exist beforehand. Artifact names are checked before anything is
/// written.
pub fn package<D: Serialize>(
    document: &D,
    files: &[PathBuf],
    filename: &Path,
    dtype: Option<QuantizationDtype>,
    converter: &dyn ModelConverter,
) -> Result<()> {
    let files = unique_artifacts(files)?;
    let workdir = WorkingDir::create(working_dir_for(filename))?;
    info!("Packaging {} ({} artifacts)", filename.display(), files.len());

    let config = serde_json::to_string_pretty(document)?;
    fs::write(workdir.path.join(CONFIG_FILE), config)?;

    for file in files {
        add_artifact(&workdir.path, file, dtype, converter)?;
    }

    let zip_path = zip_path_for(filename);
    archive::zip_dir(&workdir.path, &zip_path)?;

    // Without an extension, `filename` and the working directory are the same path.
    drop(workdir);
    fs::rename(&zip_path, filename)?;

    info!("Wrote {}", filename.display());
    Ok(())
}
