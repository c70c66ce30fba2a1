// src/pipeline.rs
//
// One build, start to finish: rows → canonical listings → geocode
// enrichment → page graph → render → reconcile. Everything up to the
// reconcile step happens in memory, so a failure anywhere before it
// leaves the previously published site untouched.

use crate::config::SiteConfig;
use crate::domain::CanonicalListing;
use crate::errors::BuildError;
use crate::geocode::{GeoPoint, Geocoder};
use crate::rows::RowSource;
use crate::site::graph::build_site_graph;
use crate::site::reconcile::{reconcile, RenderedPage};
use crate::templates::{render_page, BuildStamp};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug)]
pub struct BuildSummary {
    pub rows: usize,
    pub active_listings: usize,
    pub pages_written: usize,
    pub geocode_calls: u64,
}

pub fn run_build(
    config: &SiteConfig,
    source: &dyn RowSource,
    geocoder: &mut Geocoder,
) -> Result<BuildSummary, BuildError> {
    // Fatal if the sheet cannot be fetched at all; nothing has been
    // deleted yet at this point.
    let rows = source.fetch()?;
    eprintln!("📄 {} rows fetched", rows.len());

    let listings: Vec<CanonicalListing> = rows.iter().map(CanonicalListing::from_row).collect();
    let active: Vec<CanonicalListing> =
        listings.into_iter().filter(|l| l.is_active).collect();
    eprintln!(
        "🏠 {} active listings ({} rows skipped as inactive)",
        active.len(),
        rows.len() - active.len()
    );

    // Sequential, rate-limited enrichment. A listing whose address never
    // resolves just has no entry here and therefore no map marker.
    let mut points: HashMap<String, GeoPoint> = HashMap::new();
    for listing in &active {
        if let Some(point) = geocoder.resolve(&listing.address) {
            points.insert(listing.id.clone(), point);
        }
    }
    eprintln!(
        "🗺️ {} of {} listings have coordinates ({} external calls)",
        points.len(),
        active.len(),
        geocoder.external_calls()
    );

    let pages = build_site_graph(&active, &points);

    let stamp = BuildStamp::now();
    let rendered: Vec<RenderedPage> = pages
        .iter()
        .map(|desc| RenderedPage {
            path: desc.path.clone(),
            contents: render_page(desc, config, &stamp),
        })
        .collect();

    // Only now, with the complete new site in memory, touch the output.
    let pages_written = reconcile(Path::new(&config.output_dir), &rendered)?;
    eprintln!("✅ {} pages written to {}", pages_written, config.output_dir);

    geocoder.save()?;

    Ok(BuildSummary {
        rows: rows.len(),
        active_listings: active.len(),
        pages_written,
        geocode_calls: geocoder.external_calls(),
    })
}
