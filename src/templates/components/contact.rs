use crate::config::SiteConfig;
use maud::{html, Markup};

pub fn contact_footer(config: &SiteConfig) -> Markup {
    html! {
        div class="small" {
            "聯絡：" (config.contact_name) "｜" (config.contact_phone) "｜"
            a href=(config.contact_line) target="_blank" rel="noopener" { "LINE" }
        }
    }
}
