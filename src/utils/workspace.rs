use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const WORKSPACE_DIRS: [&str; 3] = ["src", "pkg", "bin"];

/// Creates `gopath/{src,pkg,bin}`. Existing directories are left as they are.
pub fn create_workspace(gopath: &Path) -> Result<Vec<PathBuf>> {
    let mut created = Vec::with_capacity(WORKSPACE_DIRS.len());
    for name in WORKSPACE_DIRS {
        let dir = gopath.join(name);
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        created.push(dir);
    }
    Ok(created)
}

pub fn path_export_line(go_bin_dir: &Path) -> String {
    format!("export PATH=$PATH:{}", go_bin_dir.display())
}

/// Appends the `PATH` export for `go_bin_dir` to the shell startup file,
/// creating the file when there is none.
pub fn append_path_export(profile: &Path, go_bin_dir: &Path) -> Result<String> {
    let line = path_export_line(go_bin_dir);

    let needs_newline = match fs::read(profile) {
        Ok(content) => !content.is_empty() && !content.ends_with(b"\n"),
        Err(_) => false,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(profile)
        .with_context(|| format!("Failed to open {}", profile.display()))?;

    if needs_newline {
        writeln!(file)?;
    }
    writeln!(file, "{}", line).with_context(|| format!("Failed to update {}", profile.display()))?;

    Ok(line)
}
