pub mod components;
pub mod layouts;
pub mod pages;
pub mod seo;

use crate::config::SiteConfig;
use crate::site::graph::{PageDescriptor, PagePayload};
use crate::site::sitemap::render_sitemap;

/// Timestamps shared by every page of one build. Computed once so the
/// whole output carries a single, consistent build time.
#[derive(Debug, Clone)]
pub struct BuildStamp {
    /// Sitemap `lastmod`, e.g. `2026-08-06T09:30:00Z`.
    pub lastmod: String,
    /// Calendar date for JSON-LD `datePosted` and page footers.
    pub date: String,
}

impl BuildStamp {
    pub fn now() -> Self {
        let now = chrono::Utc::now();
        Self {
            lastmod: now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            date: now.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Turn one page description into its final document. The renderer only
/// looks at the payload; it never feeds anything back into the graph.
pub fn render_page(desc: &PageDescriptor, config: &SiteConfig, stamp: &BuildStamp) -> String {
    match &desc.payload {
        PagePayload::Home(home) => pages::home::home_page(home, config).into_string(),
        PagePayload::Detail(detail) => {
            pages::listing::listing_page(detail, &desc.url_path(), config, stamp).into_string()
        }
        PagePayload::Category(category) => {
            pages::category::category_page(category, &desc.url_path(), config).into_string()
        }
        PagePayload::Robots => render_robots(config),
        PagePayload::Sitemap(payload) => render_sitemap(payload, config, &stamp.lastmod),
    }
}

fn render_robots(config: &SiteConfig) -> String {
    let mut out = String::from("User-agent: *\nAllow: /\n");
    if !config.base_url.is_empty() {
        out.push_str(&format!("Sitemap: {}/sitemap.xml\n", config.base_url));
    }
    out
}
