use anyhow::Result;
use colored::Colorize;
use crate::config::Config;
use crate::options::verbose;
use crate::utils::{download, releases};

/// What a listing shows for each release link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Versions,
    Links,
}

pub fn execute(config: &Config, listing: Listing) -> Result<()> {
    println!("Fetching available Go versions...");

    let html = download::fetch_page(&config.base_url)?;
    let links = releases::extract_links(&html, &config.platform);
    verbose::log(format!("Found {} {} links", links.len(), config.platform));

    let entries = render(&links, config, listing);
    let shown = releases::format_list(&entries);

    if shown.is_empty() {
        println!("No Go releases found for {}", config.platform);
        return Ok(());
    }

    match listing {
        Listing::Versions => println!("Available Go versions for {}:", config.platform.green()),
        Listing::Links => println!("Available Go download links for {}:", config.platform.green()),
    }
    for entry in shown {
        println!("  {}", entry);
    }

    Ok(())
}

fn render(links: &[String], config: &Config, listing: Listing) -> Vec<String> {
    links
        .iter()
        .map(|href| match listing {
            Listing::Versions => releases::display_version(href, config),
            Listing::Links => releases::download_url(href, config),
        })
        .collect()
}
