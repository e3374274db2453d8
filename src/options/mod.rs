pub mod verbose;
pub mod version;

use clap::{ArgAction, Args, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// What to do
    #[arg(short, long, value_enum, default_value_t = Action::ListGoVersions)]
    pub action: Action,

    /// Go version to install, e.g. 1.15.2 (required by `installgo`)
    #[arg(long)]
    pub version: Option<String>,

    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Print the tool's own version
    #[arg(short = 'V', long, action = ArgAction::SetTrue)]
    pub tool_version: bool,

    #[command(flatten)]
    pub overrides: Overrides,
}

#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Only accept a release whose version equals `--version` exactly
    #[arg(long, action = ArgAction::SetTrue)]
    pub exact: bool,

    /// JSON config file, defaults to config.json in the user config dir
    #[arg(long, env = "GO_SETUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Download listing page; archive links are resolved against it
    #[arg(long, env = "GO_SETUP_BASE_URL")]
    pub base_url: Option<String>,

    /// Substring selecting the target platform's archives
    #[arg(long, env = "GO_SETUP_PLATFORM")]
    pub platform: Option<String>,

    /// Directory the archive is downloaded into; must already exist
    #[arg(long, env = "GO_SETUP_DOWNLOAD_DIR")]
    pub download_dir: Option<PathBuf>,

    /// Directory the archive is extracted under
    #[arg(long, env = "GO_SETUP_INSTALL_ROOT")]
    pub install_root: Option<PathBuf>,

    /// Go workspace holding src, pkg and bin
    #[arg(long, env = "GO_SETUP_GOPATH")]
    pub gopath: Option<PathBuf>,

    /// Shell startup file the PATH line is appended to
    #[arg(long, env = "GO_SETUP_PROFILE")]
    pub profile: Option<PathBuf>,

    /// Read size in bytes while downloading
    #[arg(long, env = "GO_SETUP_CHUNK_SIZE")]
    pub chunk_size: Option<usize>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// List available Go versions for the platform
    #[value(name = "listgoversions")]
    ListGoVersions,
    /// List the download links of those versions
    #[value(name = "listgolinks")]
    ListGoLinks,
    /// Download and install the version given by --version
    #[value(name = "installgo")]
    InstallGo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_defaults_to_listing_versions() {
        let cli = Cli::try_parse_from(["go-setup"]).unwrap();
        assert_eq!(cli.action, Action::ListGoVersions);
        assert!(cli.version.is_none());
    }

    #[test]
    fn version_flag_takes_a_go_version() {
        let cli =
            Cli::try_parse_from(["go-setup", "--action", "installgo", "--version", "1.15.2"])
                .unwrap();
        assert_eq!(cli.action, Action::InstallGo);
        assert_eq!(cli.version.as_deref(), Some("1.15.2"));
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(Cli::try_parse_from(["go-setup", "--action", "removego"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
