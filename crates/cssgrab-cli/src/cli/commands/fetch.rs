//! `cssgrab fetch <url> <dest>` – mirror the stylesheet and its assets.

use anyhow::Result;
use cssgrab_core::fetch::Fetcher;
use cssgrab_core::locator::AssetLocator;
use cssgrab_core::materializer::Materializer;
use std::path::Path;

pub fn run_fetch<F: Fetcher>(fetcher: &F, url: &str, dest: &Path) -> Result<()> {
    let locator = AssetLocator::new(url, dest, fetcher)?;
    let report = Materializer::new(&locator, fetcher).run();

    for (asset, err) in report.failures() {
        eprintln!("  failed {}: {}", asset.destination_path().display(), err);
    }
    println!(
        "{} downloaded ({} bytes), {} already present, {} failed",
        report.downloaded(),
        report.bytes_downloaded(),
        report.already_present(),
        report.failed()
    );

    if !report.is_complete() {
        anyhow::bail!("{} of {} asset(s) failed", report.failed(), report.assets.len());
    }
    tracing::info!("mirrored {} into {}", url, dest.display());
    Ok(())
}
