mod commands;
mod config;
mod error;
mod options;
mod utils;

use clap::Parser;
use commands::list::Listing;
use options::Action;

fn main() -> anyhow::Result<()> {
    let cli = options::Cli::parse();

    options::verbose::set_verbose(cli.verbose);

    if cli.tool_version {
        options::version::show();
        return Ok(());
    }

    let config = config::load_config(&cli.overrides)?;

    match cli.action {
        Action::ListGoVersions => commands::list::execute(&config, Listing::Versions)?,
        Action::ListGoLinks => commands::list::execute(&config, Listing::Links)?,
        Action::InstallGo => commands::install::execute(&config, cli.version.as_deref())?,
    }

    Ok(())
}
