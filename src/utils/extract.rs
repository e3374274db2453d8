use anyhow::{anyhow, Context, Result};
use flate2::read::GzDecoder;
use std::fs;
use std::path::{Component, Path};

/// Unpacks a Go release archive under `install_root`. Every entry has to sit
/// below `top_level`; anything else is refused before a file is written.
pub fn extract_archive(archive_path: &Path, install_root: &Path, top_level: &str) -> Result<()> {
    let archive_str = archive_path.to_string_lossy();

    if archive_str.ends_with(".tar.gz") || archive_str.ends_with(".tgz") {
        check_top_level(archive_path, top_level)?;
        extract_tar_gz(archive_path, install_root)
    } else {
        Err(anyhow!("Unsupported archive format: {}", archive_path.display()))
    }
}

fn open_tar_gz(archive_path: &Path) -> Result<tar::Archive<GzDecoder<fs::File>>> {
    let file = fs::File::open(archive_path)
        .with_context(|| format!("Failed to open {}", archive_path.display()))?;
    Ok(tar::Archive::new(GzDecoder::new(file)))
}

fn check_top_level(archive_path: &Path, top_level: &str) -> Result<()> {
    let mut archive = open_tar_gz(archive_path)?;
    let entries = archive
        .entries()
        .with_context(|| format!("Failed to read {}", archive_path.display()))?;

    let mut seen = 0usize;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read {}", archive_path.display()))?;
        let path = entry.path()?;
        let first = path.components().find(|c| !matches!(c, Component::CurDir));
        match first {
            Some(Component::Normal(name)) if name == top_level => seen += 1,
            _ => {
                return Err(anyhow!(
                    "Archive {} has entry {} outside the top-level {}/ directory",
                    archive_path.display(),
                    path.display(),
                    top_level
                ))
            }
        }
    }

    if seen == 0 {
        return Err(anyhow!("Archive {} is empty", archive_path.display()));
    }
    Ok(())
}

fn extract_tar_gz(archive_path: &Path, install_root: &Path) -> Result<()> {
    let mut archive = open_tar_gz(archive_path)?;
    archive.set_preserve_permissions(true);

    archive.unpack(install_root).with_context(|| {
        format!(
            "Failed to extract {} into {}",
            archive_path.display(),
            install_root.display()
        )
    })?;

    Ok(())
}
