//! Zip handling for `.air` files.

use crate::error::Result;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const CONFIG_FILE: &str = "config.json";

/// Archive entry name for `path` relative to `root`, always `/`-separated.
fn entry_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Files and directories under `dir`, depth first, sorted per level so the
/// archive layout does not depend on directory iteration order.
fn walk(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries = fs::read_dir(dir)?
        .map(|e| e.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();
    for path in entries {
        out.push(path.clone());
        if path.is_dir() {
            walk(&path, out)?;
        }
    }
    Ok(())
}

/// Writes every file under `src_dir` into a new zip at `dest`, with entry
/// names relative to `src_dir`.
pub fn zip_dir(src_dir: &Path, dest: &Path) -> Result<()> {
    let mut paths = Vec::new();
    walk(src_dir, &mut paths)?;

    let mut writer = ZipWriter::new(File::create(dest)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in paths {
        let name = entry_name(src_dir, &path);
        if path.is_dir() {
            writer.add_directory(format!("{}/", name), options)?;
        } else {
            writer.start_file(name, options)?;
            let mut file = File::open(&path)?;
            io::copy(&mut file, &mut writer)?;
        }
    }

    writer.finish()?;
    Ok(())
}

/// Entry names in an `.air` file, in archive order.
pub fn list_entries(path: &Path) -> Result<Vec<String>> {
    let archive = ZipArchive::new(File::open(path)?)?;
    Ok(archive.file_names().map(str::to_string).collect())
}

/// Raw `config.json` text from an `.air` file.
pub fn read_config_text(path: &Path) -> Result<String> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let mut entry = archive.by_name(CONFIG_FILE)?;
    let mut text = String::new();
    entry.read_to_string(&mut text)?;
    Ok(text)
}

pub fn read_config(path: &Path) -> Result<Value> {
    let text = read_config_text(path)?;
    Ok(serde_json::from_str(&text)?)
}
