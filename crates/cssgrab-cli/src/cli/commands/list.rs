//! `cssgrab list <url>` – show where each asset comes from and where it would go.

use anyhow::Result;
use cssgrab_core::fetch::Fetcher;
use cssgrab_core::locator::{AssetLocator, ResolvedAsset};
use std::path::Path;

pub fn run_list<F: Fetcher>(fetcher: &F, url: &str, dest: &Path, json: bool) -> Result<()> {
    let locator = AssetLocator::new(url, dest, fetcher)?;
    let assets: Vec<ResolvedAsset> = locator.list_resolved_assets().collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&assets)?);
    } else {
        for asset in &assets {
            println!("{}\t{}", asset.absolute_url, asset.destination_path().display());
        }
    }
    tracing::info!("listed {} asset(s) for {}", assets.len(), url);
    Ok(())
}
