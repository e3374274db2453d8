use anyhow::Result;
use colored::Colorize;
use crate::config::{Config, GO_ROOT_DIR};
use crate::error::SetupError;
use crate::options::verbose;
use crate::utils::{download, extract, releases, workspace};
use std::fs;
use std::path::Path;

pub fn execute(config: &Config, version: Option<&str>) -> Result<()> {
    let version = version
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            SetupError::Precondition(
                "Please supply the Go version to install, e.g. --action installgo --version 1.15.2"
                    .to_string(),
            )
        })?;

    println!("Fetching available Go versions...");
    let html = download::fetch_page(&config.base_url)?;
    let links = releases::extract_links(&html, &config.platform);
    verbose::log(format!(
        "Matching {:?} against {} links ({:?})",
        version,
        links.len(),
        config.match_policy
    ));

    let url = releases::resolve(&links, config, version)?;
    let selected = releases::display_version(&url, config);

    println!("Selected Go version: {}", selected.green());
    println!("Download URL: {}", url);

    if !config.download_dir.is_dir() {
        return Err(SetupError::Precondition(format!(
            "Download directory {} does not exist",
            config.download_dir.display()
        ))
        .into());
    }

    let install_dir = config.install_dir();
    if install_dir.exists() {
        return Err(SetupError::AlreadyInstalled(install_dir).into());
    }

    let archive = download::download_file(&url, &config.download_dir, config.chunk_size)?;

    println!("Extracting Go {} into {}...", selected, config.install_root.display());
    let unpacked = unpack(&archive, config);
    if let Err(e) = fs::remove_file(&archive) {
        verbose::warn(format!("Could not remove {}: {}", archive.display(), e));
    }
    unpacked?;

    for dir in workspace::create_workspace(&config.gopath)? {
        verbose::log(format!("Workspace directory {}", dir.display()));
    }
    println!("Created Go workspace in {}", config.gopath.display());

    let line = workspace::append_path_export(&config.profile, &config.go_bin_dir())?;
    println!("Added '{}' to {}", line, config.profile.display());

    println!("Successfully installed Go {}", selected.green());
    println!(
        "Run 'source {}' or open a new shell to use it",
        config.profile.display()
    );

    Ok(())
}

fn unpack(archive: &Path, config: &Config) -> Result<()> {
    let install_dir = config.install_dir();

    if let Err(e) = extract::extract_archive(archive, &config.install_root, GO_ROOT_DIR) {
        // The directory did not exist before this run, so whatever is there is ours.
        if install_dir.exists() {
            if let Err(cleanup) = fs::remove_dir_all(&install_dir) {
                verbose::warn(format!(
                    "Could not remove partial install {}: {}",
                    install_dir.display(),
                    cleanup
                ));
            }
        }
        return Err(e);
    }

    Ok(())
}
