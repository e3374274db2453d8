use crate::error::SetupError;
use crate::options::verbose;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::{Client, Response};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

fn get(client: &Client, url: &str) -> Result<Response, SetupError> {
    verbose::log(format!("GET {}", url));

    let resp = client
        .get(url)
        .send()
        .map_err(|e| SetupError::network(url, e))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(SetupError::network(url, format!("server answered {}", status)));
    }

    Ok(resp)
}

/// Body of the download listing page.
pub fn fetch_page(url: &str) -> Result<String> {
    let client = Client::new();
    let resp = get(&client, url)?;
    let body = resp.text().map_err(|e| SetupError::network(url, e))?;

    verbose::log(format!("Fetched {} bytes from {}", body.len(), url));
    Ok(body)
}

/// The file name a download URL ends in.
pub fn file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}

/// Streams `url` into `dest_dir`, `chunk_size` bytes per read, and returns
/// the path written.
pub fn download_file(url: &str, dest_dir: &Path, chunk_size: usize) -> Result<PathBuf> {
    println!("Downloading from {}", url);

    let client = Client::new();
    let mut resp = get(&client, url)?;

    let pb = match resp.content_length() {
        Some(total_size) => {
            let pb = ProgressBar::new(total_size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")?
                    .progress_chars("#>-"),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {bytes}")?);
            pb
        }
    };

    let dest_path = dest_dir.join(file_name(url));
    let saved = save_body(&mut resp, &dest_path, chunk_size, &pb);
    pb.finish_and_clear();
    saved.with_context(|| format!("Download of {} failed", url))?;

    println!("Download complete, file saved to {}", dest_path.display());
    Ok(dest_path)
}

/// Copies `body` into a new file at `dest_path`. A partly written file is
/// removed again when the copy fails.
fn save_body(body: &mut impl Read, dest_path: &Path, chunk_size: usize, pb: &ProgressBar) -> Result<()> {
    let mut file = File::create(dest_path)
        .with_context(|| format!("Failed to create {}", dest_path.display()))?;

    let copied = copy_chunks(body, &mut file, chunk_size, pb);
    drop(file);

    if copied.is_err() {
        if let Err(e) = fs::remove_file(dest_path) {
            verbose::warn(format!("Could not remove {}: {}", dest_path.display(), e));
        }
    }
    copied
}

fn copy_chunks(body: &mut impl Read, file: &mut File, chunk_size: usize, pb: &ProgressBar) -> Result<()> {
    let mut buffer = vec![0u8; chunk_size];
    loop {
        let read = body.read(&mut buffer).context("Failed to read response body")?;
        if read == 0 {
            break;
        }
        file.write_all(&buffer[..read]).context("Failed to write archive")?;
        pb.inc(read as u64);
    }
    file.flush()?;
    Ok(())
}
