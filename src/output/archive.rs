//! Zip bundling of a finished run directory.

use crate::errors::{ExportResult, OutputError};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Zip the contents of `dir` into `archive`
///
/// Entry names are relative to `dir`, so the archive unpacks into the same
/// layout the directory had.
pub fn zip_dir(dir: &Path, archive: &Path) -> ExportResult<()> {
    let file = File::create(archive).map_err(|e| OutputError::io(archive, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = Vec::new();
    collect_files(dir, &mut entries)?;
    entries.sort();

    for path in &entries {
        let name = entry_name(dir, path);
        if path.is_dir() {
            zip.add_directory(format!("{}/", name), options)
                .map_err(OutputError::Archive)?;
            continue;
        }

        debug!(entry = %name, "Adding archive entry");
        zip.start_file(name, options).map_err(OutputError::Archive)?;
        let mut source = File::open(path).map_err(|e| OutputError::io(path, e))?;
        io::copy(&mut source, &mut zip).map_err(|e| OutputError::io(path, e))?;
    }

    zip.finish().map_err(OutputError::Archive)?;
    info!(archive = %archive.display(), entries = entries.len(), "Wrote archive");
    Ok(())
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> ExportResult<()> {
    let entries = fs::read_dir(dir).map_err(|e| OutputError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| OutputError::io(dir, e))?.path();
        if path.is_dir() {
            out.push(path.clone());
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

fn entry_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
