// src/templates/layouts/page.rs

use crate::templates::seo::meta_truncate;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const BASE_CSS: &str = r#"
body{font-family:'PingFang TC',-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,"Noto Sans TC",Arial,sans-serif;margin:0;background:#fafafa;color:#111}
.wrap{max-width:920px;margin:0 auto;padding:22px 16px 64px}
a{word-break:break-all;color:#222}
h1{font-size:22px;margin:0 0 8px}
.sub{opacity:.75;margin:0 0 14px;line-height:1.6}
.card{background:#fff;border:1px solid #eee;border-radius:16px;padding:14px 16px;margin:10px 0;box-shadow:0 10px 20px rgba(0,0,0,0.04)}
.badge{display:inline-block;background:linear-gradient(135deg,#f2994a,#f2c94c);color:#fff;padding:4px 12px;border-radius:999px;font-weight:800;font-size:12px}
.chips{margin-top:14px;display:flex;flex-wrap:wrap;gap:10px}
.chip{display:inline-block;padding:8px 12px;border-radius:999px;border:1px solid #eee;text-decoration:none;color:#333;font-weight:800;font-size:13px;background:#fff}
.price-tag{color:#e63946;font-size:32px;font-weight:900;margin:6px 0 8px}
.features{background:#fff8f0;border-left:5px solid #f2994a;padding:15px;border-radius:12px;font-size:16px;color:#444;line-height:1.7}
.btn-group{display:flex;gap:15px;margin-top:22px}
.btn{flex:1;text-align:center;padding:16px;border-radius:50px;text-decoration:none;font-weight:900;font-size:17px}
.btn.tel{background:#333;color:#fff}
.btn.line{background:#06C755;color:#fff}
.small{font-size:12px;color:#777;margin-top:18px}
#map{height:320px;border-radius:16px;border:1px solid #eee;margin:14px 0}
"#;

/// Shared document shell. `canonical_url` may be empty when no base URL
/// is configured; `head_extra` carries page-specific tags (JSON-LD, map
/// assets).
pub fn page_layout(
    title: &str,
    description: &str,
    canonical_url: &str,
    head_extra: Markup,
    body: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="zh-Hant" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content=(meta_truncate(description));
                @if !canonical_url.is_empty() {
                    link rel="canonical" href=(canonical_url);
                }
                style { (PreEscaped(BASE_CSS)) }
                (head_extra)
            }
            body {
                div class="wrap" {
                    (body)
                }
            }
        }
    }
}
