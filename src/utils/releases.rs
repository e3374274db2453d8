//! Turning the download page into version lists and a download URL.
//!
//! Everything here is a pure function over the page text and the run's
//! [`Config`]; fetching lives in [`super::download`].

use crate::config::{Config, MatchPolicy};
use crate::error::SetupError;
use scraper::{ElementRef, Html};

/// Leading entries dropped when printing a listing. The page's featured
/// download box repeats the newest release before the full table does.
pub const SKIPPED_LEADING_ENTRIES: usize = 1;

pub fn extract_links(html: &str, platform: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "a")
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.contains(platform))
        .map(str::to_string)
        .collect()
}

/// Strips `prefix` and `suffix` as literal strings, each only when present.
pub fn normalize(href: &str, prefix: &str, suffix: &str) -> String {
    let trimmed = href.strip_prefix(prefix).unwrap_or(href);
    let trimmed = trimmed.strip_suffix(suffix).unwrap_or(trimmed);
    trimmed.to_string()
}

// "/dl/go1.15.2.linux-amd64.tar.gz" -> "go1.15.2.linux-amd64.tar.gz"
pub fn archive_name<'a>(href: &'a str, link_prefix: &str) -> &'a str {
    if is_absolute(href) {
        return href.rsplit('/').next().unwrap_or(href);
    }
    href.strip_prefix(link_prefix)
        .unwrap_or_else(|| href.trim_start_matches('/'))
}

pub fn display_version(href: &str, config: &Config) -> String {
    normalize(
        archive_name(href, &config.link_prefix),
        &config.archive_prefix,
        &config.archive_suffix(),
    )
}

pub fn download_url(href: &str, config: &Config) -> String {
    if is_absolute(href) {
        return href.to_string();
    }

    let name = archive_name(href, &config.link_prefix);
    if config.base_url.ends_with('/') {
        format!("{}{}", config.base_url, name)
    } else {
        format!("{}/{}", config.base_url, name)
    }
}

/// Picks the download URL for `requested` out of the full, unskipped link list.
///
/// With [`MatchPolicy::LastMatch`] any link containing the request counts and
/// the one latest on the page wins, so "1.15" can resolve to 1.15.2 when that
/// entry comes later. [`MatchPolicy::Exact`] compares normalized versions.
pub fn resolve(links: &[String], config: &Config, requested: &str) -> Result<String, SetupError> {
    let not_found = || SetupError::NotFound {
        version: requested.to_string(),
        platform: config.platform.clone(),
    };

    // Every href contains the empty string.
    if requested.trim().is_empty() {
        return Err(not_found());
    }

    let on_platform = links.iter().filter(|href| href.contains(&config.platform));

    let chosen = match config.match_policy {
        MatchPolicy::LastMatch => on_platform.filter(|href| href.contains(requested)).last(),
        MatchPolicy::Exact => on_platform
            .filter(|href| display_version(href, config) == requested)
            .last(),
    };

    chosen
        .map(|href| download_url(href, config))
        .ok_or_else(not_found)
}

pub fn format_list<T>(items: &[T]) -> &[T] {
    items.get(SKIPPED_LEADING_ENTRIES..).unwrap_or(&[])
}

fn is_absolute(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}
