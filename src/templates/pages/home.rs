// src/templates/pages/home.rs

use crate::config::SiteConfig;
use crate::site::graph::HomePayload;
use crate::templates::components::{contact_footer, listing_card};
use crate::templates::layouts::page_layout;
use maud::{html, Markup, PreEscaped};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

pub fn home_page(payload: &HomePayload, config: &SiteConfig) -> Markup {
    let has_map = !payload.markers.is_empty();
    // Markers were produced only for geocoded listings, so an unresolved
    // address simply never reaches the map.
    let markers_json =
        serde_json::to_string(&payload.markers).unwrap_or_else(|_| "[]".to_string());

    let head = html! {
        @if has_map {
            link rel="stylesheet" href=(LEAFLET_CSS);
            script src=(LEAFLET_JS) defer {}
        }
    };

    let map_script = format!(
        r#"document.addEventListener('DOMContentLoaded',function(){{
var markers={markers_json};
if(!markers.length)return;
var map=L.map('map');
L.tileLayer('https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png',{{attribution:'&copy; OpenStreetMap'}}).addTo(map);
var group=[];
markers.forEach(function(m){{
  var pin=L.marker([m.lat,m.lng]).addTo(map);
  pin.bindPopup('<a href="'+m.href+'"><b>'+m.name+'</b></a><br>'+m.price);
  group.push([m.lat,m.lng]);
}});
map.fitBounds(group,{{padding:[30,30]}});
}});"#
    );

    page_layout(
        &config.site_title,
        "本清單為條件整理/比較用，提供找房者快速瀏覽。",
        &config.canonical(""),
        head,
        html! {
            span class="badge" { "整理頁" }
            h1 { (config.site_title) }
            p class="sub" { "本清單為條件整理/比較用，提供找房者快速瀏覽。" }

            @if has_map {
                div id="map" {}
                script { (PreEscaped(map_script)) }
            }

            @for card in &payload.cards {
                (listing_card(card))
            }

            (contact_footer(config))
        },
    )
}
