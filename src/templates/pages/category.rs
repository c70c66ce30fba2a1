// src/templates/pages/category.rs

use crate::config::SiteConfig;
use crate::site::graph::{CategoryKind, CategoryPayload};
use crate::templates::components::{contact_footer, listing_card};
use crate::templates::layouts::page_layout;
use maud::{html, Markup};

pub fn category_page(payload: &CategoryPayload, url_path: &str, config: &SiteConfig) -> Markup {
    let title = match payload.kind {
        CategoryKind::Area => format!("{}｜物件整理", payload.name),
        CategoryKind::Tag => format!("{}｜整理與比較", payload.name),
        CategoryKind::PriceBucket => format!("{}｜價格帶物件", payload.name),
    };
    let subtitle = subtitle_for(payload);

    page_layout(
        &title,
        &subtitle,
        &config.canonical(url_path),
        html! {},
        html! {
            p { a href="../../index.html" { "← 回清單" } }
            span class="badge" { "整理頁" }
            h1 { (title) }
            p class="sub" { (subtitle) }

            @for card in &payload.cards {
                (listing_card(card))
            }

            (contact_footer(config))
        },
    )
}

/// Tag pages get a short intro paragraph instead of a bare link list.
fn subtitle_for(payload: &CategoryPayload) -> String {
    match payload.kind {
        CategoryKind::Area => format!("{} 物件條件整理與比較清單。", payload.name),
        CategoryKind::PriceBucket => {
            format!("{} 價格帶的物件整理，方便同價位帶快速比較。", payload.name)
        }
        CategoryKind::Tag => {
            let mut bits = vec![format!(
                "你正在搜尋「{}」相關資訊，通常代表你已經在比價或鎖定特定社區/路段。",
                payload.name
            )];
            if !payload.area_hint.is_empty() {
                bits.push(format!(
                    "這裡先用「{}」作為範圍整理，讓你快速對照條件與價位帶。",
                    payload.area_hint
                ));
            }
            if !payload.cards.is_empty() {
                bits.push(format!(
                    "目前整理到 {} 筆相關條件頁，可以先點進去看格局、車位、坪數與大致價格。",
                    payload.cards.len()
                ));
            }
            bits.push("想確認細節或補充條件，可直接用下方方式聯絡。".to_string());
            bits.join(" ")
        }
    }
}
