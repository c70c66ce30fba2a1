use crate::config::SiteConfig;
use crate::geocode::{Geocoder, HttpGeocoder, JsonFileStore};
use crate::rows::{CsvFileSource, CsvHttpSource, RowSource};

mod config;
mod domain;
mod errors;
mod geocode;
mod pipeline;
mod rows;
mod site;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    let config = SiteConfig::from_env();

    let source: Box<dyn RowSource> = if config.sheet_url.starts_with("http") {
        match CsvHttpSource::new(&config.sheet_url) {
            Ok(source) => Box::new(source),
            Err(e) => {
                eprintln!("❌ Row source init failed: {e}");
                std::process::exit(1);
            }
        }
    } else {
        Box::new(CsvFileSource::new(&config.sheet_url))
    };

    let store = JsonFileStore::load(&config.cache_file);
    eprintln!("🗂️ Geocode cache loaded ({} entries)", store.len());

    let lookup = match HttpGeocoder::new(&config.geocode_endpoint) {
        Ok(lookup) => lookup,
        Err(e) => {
            eprintln!("❌ Geocoder init failed: {e}");
            std::process::exit(1);
        }
    };
    let mut geocoder = Geocoder::new(Box::new(store), Box::new(lookup));

    match pipeline::run_build(&config, source.as_ref(), &mut geocoder) {
        Ok(summary) => {
            println!(
                "Build complete: {} rows, {} active listings, {} pages, {} geocode calls.",
                summary.rows, summary.active_listings, summary.pages_written, summary.geocode_calls
            );
        }
        Err(e) => {
            // The reconciler never ran on a partial build, so whatever
            // was published before is still intact.
            eprintln!("❌ Build failed: {e}");
            std::process::exit(1);
        }
    }
}
