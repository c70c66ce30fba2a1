// src/config.rs

use url::Url;

/// Site-wide settings, read once from the environment at startup.
/// Everything has a usable default so a bare `cargo run` still builds
/// a browsable site into `site/`.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub site_title: String,
    /// Absolute site root, e.g. `https://you.github.io/house-info`.
    /// Empty means "no canonical URLs" and the sitemap falls back to
    /// relative locations.
    pub base_url: String,

    pub contact_name: String,
    pub contact_phone: String,
    pub contact_line: String,

    /// CSV export of the listings sheet. Either an `http(s)://` URL or a
    /// local file path.
    pub sheet_url: String,

    pub geocode_endpoint: String,
    pub output_dir: String,
    pub cache_file: String,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|_| default.to_string())
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self {
            site_title: env_or("SITE_TITLE", "台中房產條件整理（找房比較頁）"),
            base_url: env_or("BASE_URL", "").trim_end_matches('/').to_string(),
            contact_name: env_or("CONTACT_NAME", "林世塏"),
            contact_phone: env_or("CONTACT_PHONE", "0938-615-351"),
            contact_line: env_or("CONTACT_LINE", "https://line.me/ti/p/FDsMyAYDv"),
            sheet_url: env_or("SHEET_URL", "listings.csv"),
            geocode_endpoint: env_or(
                "GEOCODE_ENDPOINT",
                "https://nominatim.openstreetmap.org/search",
            ),
            output_dir: env_or("OUTPUT_DIR", "site"),
            cache_file: env_or("GEOCODE_CACHE_FILE", "geocode_cache.json"),
        }
    }

    /// Absolute URL for a site-relative page path (`""` is the home page,
    /// `"foo/"` a directory-style page). Empty when no base URL is set.
    pub fn canonical(&self, path: &str) -> String {
        if self.base_url.is_empty() {
            return String::new();
        }
        let base = format!("{}/", self.base_url);
        match Url::parse(&base).and_then(|u| u.join(path.trim_start_matches('/'))) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}/{}", self.base_url, path.trim_start_matches('/')),
        }
    }
}
