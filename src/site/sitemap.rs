// src/site/sitemap.rs

use crate::config::SiteConfig;
use crate::site::graph::SitemapPayload;

/// Render the sitemap. One `<url>` per HTML page, every entry carrying
/// the same build-wide `lastmod`; the whole site regenerates together.
pub fn render_sitemap(payload: &SitemapPayload, config: &SiteConfig, lastmod: &str) -> String {
    let mut xml = String::from("<?xml version='1.0' encoding='UTF-8'?>\n");
    xml.push_str("<urlset xmlns='http://www.sitemaps.org/schemas/sitemap/0.9'>\n");

    for path in &payload.paths {
        let loc = if config.base_url.is_empty() {
            // No absolute root configured: fall back to relative file
            // locations so the output is still a valid document.
            if path.is_empty() {
                "index.html".to_string()
            } else {
                format!("{path}index.html")
            }
        } else {
            config.canonical(path)
        };

        xml.push_str("<url>\n");
        xml.push_str(&format!("<loc>{}</loc>\n", escape_xml(&loc)));
        xml.push_str(&format!("<lastmod>{}</lastmod>\n", escape_xml(lastmod)));
        xml.push_str("<changefreq>weekly</changefreq>\n");
        xml.push_str("<priority>0.6</priority>\n");
        xml.push_str("</url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
