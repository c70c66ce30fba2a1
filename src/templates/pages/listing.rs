// src/templates/pages/listing.rs

use crate::config::SiteConfig;
use crate::site::graph::DetailPayload;
use crate::templates::layouts::page_layout;
use crate::templates::seo;
use crate::templates::BuildStamp;
use maud::{html, Markup, PreEscaped};

const PLACEHOLDER_IMG: &str =
    "https://placehold.co/600x400?text=%E5%9C%96%E7%89%87%E8%BC%89%E5%85%A5%E4%B8%AD";

pub fn listing_page(
    payload: &DetailPayload,
    url_path: &str,
    config: &SiteConfig,
    stamp: &BuildStamp,
) -> Markup {
    let listing = &payload.listing;
    let title = seo::listing_title(listing);
    let description = seo::listing_description(listing);
    let canonical_url = config.canonical(url_path);
    let jsonld = seo::listing_jsonld(listing, &canonical_url, config, &stamp.date);

    let image = if listing.image_url.is_empty() {
        PLACEHOLDER_IMG
    } else {
        listing.image_url.as_str()
    };

    let mut feature_bits: Vec<String> = Vec::new();
    if !listing.layout.is_empty() {
        feature_bits.push(format!("格局：{}", listing.layout));
    }
    if !listing.size_text.is_empty() {
        feature_bits.push(format!("坪數：約 {} 坪", listing.size_text));
    }
    if !listing.parking.is_empty() {
        feature_bits.push(format!("車位：{}", listing.parking));
    }
    if !listing.property_type.is_empty() {
        feature_bits.push(format!("型態：{}", listing.property_type));
    }
    if let Some(road) = seo::road_fragment(&listing.address) {
        feature_bits.push(format!("路段：{road}"));
    }
    let feature_line = if feature_bits.is_empty() {
        "—".to_string()
    } else {
        feature_bits.join("｜")
    };

    let head = html! {
        script type="application/ld+json" { (PreEscaped(jsonld)) }
        @if payload.point.is_some() {
            link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
            script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" defer {}
        }
    };

    // No resolved coordinates, no map block. Never a zero-coordinate pin.
    let map_block = payload.point.map(|point| {
        let script = format!(
            r#"document.addEventListener('DOMContentLoaded',function(){{
var map=L.map('map').setView([{lat},{lng}],16);
L.tileLayer('https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png',{{attribution:'&copy; OpenStreetMap'}}).addTo(map);
L.marker([{lat},{lng}]).addTo(map);
}});"#,
            lat = point.lat,
            lng = point.lng,
        );
        html! {
            div id="map" {}
            script { (PreEscaped(script)) }
        }
    });

    page_layout(
        &title,
        &description,
        &canonical_url,
        head,
        html! {
            p { a href="../index.html" { "← 回清單" } }
            div class="card" {
                img src=(image) alt=(listing.name) style="width:100%;height:auto;display:block;border-radius:12px";
                span class="badge" { (listing.area) }
                h1 { (listing.name) }
                p class="sub" { (feature_line) }
                div class="price-tag" { (listing.price_display()) }
                p class="sub" {
                    "📍 " @if listing.address.is_empty() { "—" } @else { (listing.address) }
                }

                @if !listing.state_tags.is_empty() {
                    div class="chips" {
                        @for tag in &listing.state_tags {
                            span class="badge" { (tag) }
                        }
                    }
                }

                div class="features" {
                    "🏠 物件描述：" br;
                    @if listing.description.trim().is_empty() { "—" } @else { (listing.description) }
                }

                @if let Some(link) = &listing.external_link {
                    p { a href=(link) target="_blank" rel="noopener" { "👉 來源連結" } }
                }

                @if let Some(map) = map_block {
                    (map)
                }

                div class="btn-group" {
                    a href=(format!("tel:{}", config.contact_phone)) class="btn tel" { "撥打電話" }
                    a href=(config.contact_line) class="btn line" target="_blank" rel="noopener" { "LINE 諮詢" }
                }

                @if !payload.hashtags.is_empty() {
                    div class="chips" {
                        @for tag in &payload.hashtags {
                            a class="chip" href=(tag.href) { "#" (tag.label) }
                        }
                    }
                }

                div class="small" {
                    "聯絡人：" (config.contact_name) "｜更新：" (stamp.date)
                }
            }
        },
    )
}
