// src/templates/seo.rs

use crate::config::SiteConfig;
use crate::domain::CanonicalListing;
use serde_json::json;

/// Road-level fragment of an address ("五權三街", "台灣大道"), used in
/// SEO titles. Looks for the first segment ending in a road suffix,
/// keeping at most 12 characters before it.
pub fn road_fragment(address: &str) -> Option<String> {
    for piece in address.split(|c: char| c.is_whitespace() || c == '，' || c == ',') {
        if piece.is_empty() {
            continue;
        }
        let chars: Vec<char> = piece.chars().collect();
        for (i, window) in chars.windows(2).enumerate() {
            if window == ['大', '道'] {
                return Some(fragment_ending_at(&chars, i + 2));
            }
        }
        for (i, &c) in chars.iter().enumerate() {
            if matches!(c, '路' | '街' | '巷') {
                return Some(fragment_ending_at(&chars, i + 1));
            }
        }
    }
    None
}

fn fragment_ending_at(chars: &[char], end: usize) -> String {
    let start = end.saturating_sub(13);
    chars[start..end].iter().collect()
}

/// Page title assembled the way search snippets read best for this
/// site: area, name, layout, parking, price, road, then the fixed
/// suffix.
pub fn listing_title(listing: &CanonicalListing) -> String {
    let mut parts: Vec<String> = Vec::new();
    for text in [&listing.area, &listing.name, &listing.layout, &listing.parking] {
        if !text.is_empty() {
            parts.push(text.clone());
        }
    }
    if let Some(price) = listing.price_numeric {
        parts.push(format!("{price}萬"));
    }
    if let Some(road) = road_fragment(&listing.address) {
        parts.push(road);
    }
    parts.push("條件整理".to_string());
    parts.join("｜")
}

pub fn listing_description(listing: &CanonicalListing) -> String {
    let mut bits: Vec<String> = Vec::new();
    for text in [&listing.area, &listing.name, &listing.layout] {
        if !text.is_empty() {
            bits.push(text.clone());
        }
    }
    if !listing.size_text.is_empty() {
        bits.push(format!("{}坪", listing.size_text));
    }
    if !listing.parking.is_empty() {
        bits.push(listing.parking.clone());
    }
    if let Some(price) = listing.price_numeric {
        bits.push(format!("約{price}萬"));
    }
    let base = bits.join("、");

    let extra: String = listing.description.trim().chars().take(95).collect();
    if extra.is_empty() {
        format!("{base}｜提供找房者快速比較與補充資訊入口。")
    } else {
        format!("{base}｜{extra}")
    }
}

/// Truncate a meta description to the length search engines display.
pub fn meta_truncate(text: &str) -> String {
    text.chars().take(155).collect()
}

/// Schema.org `RealEstateListing` JSON-LD for a detail page. Fields the
/// sheet did not provide are omitted rather than filled with guesses.
pub fn listing_jsonld(
    listing: &CanonicalListing,
    page_url: &str,
    config: &SiteConfig,
    date_posted: &str,
) -> String {
    let mut data = json!({
        "@context": "https://schema.org",
        "@type": "RealEstateListing",
        "name": listing.name,
        "datePosted": date_posted,
        "description": listing.description.trim(),
        "provider": {
            "@type": "RealEstateAgent",
            "name": config.contact_name,
            "telephone": config.contact_phone,
        },
        "itemOffered": {
            "@type": "Residence",
            "name": listing.name,
        }
    });

    if !page_url.is_empty() {
        data["url"] = json!(page_url);
    }
    if !listing.image_url.is_empty() {
        data["image"] = json!([listing.image_url]);
    }
    if !config.contact_line.is_empty() {
        data["provider"]["url"] = json!(config.contact_line);
    }

    if !listing.address.is_empty() || !listing.area.is_empty() {
        let mut addr = json!({ "@type": "PostalAddress", "addressCountry": "TW" });
        if !listing.address.is_empty() {
            addr["streetAddress"] = json!(listing.address);
        }
        if let Some(locality) = listing.area.strip_prefix("台中市") {
            addr["addressRegion"] = json!("台中市");
            if !locality.is_empty() {
                addr["addressLocality"] = json!(locality);
            }
        } else if !listing.area.is_empty() {
            addr["addressRegion"] = json!(listing.area);
        }
        data["itemOffered"]["address"] = addr;
    }

    if let Some(rooms) = rooms_from_layout(&listing.layout) {
        data["itemOffered"]["numberOfRooms"] = json!(rooms);
    }

    if let Some(size) = crate::rows::resolver::numeric(&listing.size_text) {
        data["itemOffered"]["floorSize"] = json!({
            "@type": "QuantitativeValue",
            "value": size,
            "unitText": "坪",
        });
    }

    if let Some(price) = listing.price_numeric {
        // Sheet prices are in 萬; schema.org wants the actual amount.
        data["offers"] = json!({
            "@type": "Offer",
            "price": price * 10_000,
            "priceCurrency": "TWD",
            "availability": "https://schema.org/InStock",
        });
        if !page_url.is_empty() {
            data["offers"]["url"] = json!(page_url);
        }
    }

    data.to_string()
}

/// Leading room count out of a layout like `3房2廳2衛`.
fn rooms_from_layout(layout: &str) -> Option<u64> {
    let digits: String = layout.chars().take_while(|c| c.is_ascii_digit()).collect();
    let follows_room = layout[digits.len()..].starts_with('房');
    if digits.is_empty() || !follows_room {
        return None;
    }
    digits.parse().ok()
}
