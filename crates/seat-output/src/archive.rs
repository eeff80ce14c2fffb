//! Zip archive of a session folder.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::debug;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Zip everything under `folder` into `<folder>/<prefix>_<YYYYmmdd_HHMMSS>.zip`.
pub fn build_zip(folder: &Path, prefix: &str) -> Result<PathBuf> {
    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    build_zip_named(folder, &format!("{prefix}_{stamp}.zip"))
}

/// Zip everything under `folder` into `<folder>/<name>`.
///
/// Entry names are relative to `folder` with `/` separators; existing `.zip`
/// files (including earlier archives) are left out.
pub fn build_zip_named(folder: &Path, name: &str) -> Result<PathBuf> {
    fs::create_dir_all(folder).with_context(|| format!("create {}", folder.display()))?;
    let mut files = Vec::new();
    collect_files(folder, &mut files)?;
    files.sort();

    let zip_path = folder.join(name);
    let file = File::create(&zip_path).with_context(|| format!("create {}", zip_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for path in files {
        let entry = entry_name(folder, &path)?;
        debug!(entry = %entry, "adding to archive");
        zip.start_file(entry.as_str(), options)
            .with_context(|| format!("add {entry} to {}", zip_path.display()))?;
        let mut source = File::open(&path).with_context(|| format!("open {}", path.display()))?;
        io::copy(&mut source, &mut zip).with_context(|| format!("compress {}", path.display()))?;
    }
    zip.finish()
        .with_context(|| format!("finish {}", zip_path.display()))?;
    Ok(zip_path)
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("read {}", dir.display()))?
            .path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else if !is_zip(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

fn entry_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .with_context(|| format!("{} is outside {}", path.display(), root.display()))?;
    let parts: Vec<String> = relative
        .components()
        .map(|part| part.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}
