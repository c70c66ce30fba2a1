// src/domain/listing.rs

use crate::domain::categories;
use crate::rows::resolver::{flag, numeric, resolve, resolve_or};
use crate::rows::RawRow;
use sha2::{Digest, Sha256};

const DEFAULT_NAME: &str = "住宅物件";
const DEFAULT_AREA: &str = "台中市";

/// Candidate column fragments per logical field, most specific first.
/// These mirror the labels seen in real exports of the listings sheet.
const NAME_COLS: &[&str] = &["案名", "名稱", "建案"];
const AREA_COLS: &[&str] = &["區域", "地區", "行政區"];
const TYPE_COLS: &[&str] = &["型態", "類型", "產品"];
const PRICE_COLS: &[&str] = &["價格", "總價", "售價"];
const ADDRESS_COLS: &[&str] = &["地址", "住址", "位置"];
const DESC_COLS: &[&str] = &["描述", "說明", "簡介"];
const IMAGE_COLS: &[&str] = &["圖片", "照片"];
const LINK_COLS: &[&str] = &["連結", "網址"];
const STATUS_COLS: &[&str] = &["狀態", "上下架"];
const FEATURED_COLS: &[&str] = &["精選", "主打", "推薦"];
// "標籤" alone would fragment-match the 狀態標籤 column; keep the
// feature candidates disjoint from the state-tag ones.
const FEATURE_TAG_COLS: &[&str] = &["關鍵字", "特色"];
const STATE_TAG_COLS: &[&str] = &["狀態標籤", "屋況"];
const BUCKET_COLS: &[&str] = &["價格帶", "價位帶"];
const LAYOUT_COLS: &[&str] = &["格局"];
const SIZE_COLS: &[&str] = &["坪數", "面積"];
const PARKING_COLS: &[&str] = &["車位", "停車"];

/// The normalized, validated representation of one property. Built once
/// per build from a RawRow, immutable afterwards, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalListing {
    /// Content-derived identifier (name + address + area), so page URLs
    /// survive rows being inserted or removed around a listing.
    pub id: String,

    pub name: String,
    pub area: String,
    pub property_type: String,
    pub price_text: String,
    /// Price in 萬; `None` when the sheet has no parseable number.
    pub price_numeric: Option<u64>,
    pub address: String,
    pub description: String,
    pub image_url: String,
    pub external_link: Option<String>,

    pub layout: String,
    pub size_text: String,
    pub parking: String,

    pub is_active: bool,
    pub is_featured: bool,

    pub state_tags: Vec<String>,
    pub feature_tags: Vec<String>,
    /// Always non-empty: explicit sheet value, derived range, or the
    /// unspecified sentinel.
    pub price_bucket: String,
}

impl CanonicalListing {
    pub fn from_row(row: &RawRow) -> Self {
        let name = resolve_or(row, NAME_COLS, DEFAULT_NAME).to_string();
        let area = resolve_or(row, AREA_COLS, DEFAULT_AREA).to_string();
        let address = resolve_or(row, ADDRESS_COLS, "").to_string();

        let price_text = resolve_or(row, PRICE_COLS, "").to_string();
        let price_numeric = numeric(&price_text);

        // A missing status column means "listed". Only an explicit
        // OFF-style flag hides a row.
        let is_active = resolve(row, STATUS_COLS).and_then(flag).unwrap_or(true);
        let is_featured = resolve(row, FEATURED_COLS)
            .and_then(flag)
            .unwrap_or(false);

        let feature_tags = categories::split_tags(resolve_or(row, FEATURE_TAG_COLS, ""));
        let state_tags = categories::split_tags(resolve_or(row, STATE_TAG_COLS, ""));
        let price_bucket = categories::price_bucket(resolve(row, BUCKET_COLS), price_numeric);

        let external_link = resolve(row, LINK_COLS)
            .filter(|v| v.starts_with("http"))
            .map(str::to_string);

        Self {
            id: content_id(&name, &address, &area),
            name,
            property_type: resolve_or(row, TYPE_COLS, "").to_string(),
            price_text,
            price_numeric,
            description: resolve_or(row, DESC_COLS, "").to_string(),
            image_url: resolve_or(row, IMAGE_COLS, "").to_string(),
            external_link,
            layout: resolve_or(row, LAYOUT_COLS, "").to_string(),
            size_text: resolve_or(row, SIZE_COLS, "").to_string(),
            parking: resolve_or(row, PARKING_COLS, "").to_string(),
            is_active,
            is_featured,
            state_tags,
            feature_tags,
            price_bucket,
            area,
            address,
        }
    }

    /// Display price for cards and detail pages. Falls back to the raw
    /// sheet text ("面議" and friends) before the generic sentinel.
    pub fn price_display(&self) -> String {
        match self.price_numeric {
            Some(p) => format!("{p} 萬"),
            None if !self.price_text.trim().is_empty() => self.price_text.trim().to_string(),
            None => categories::PRICE_UNSPECIFIED.to_string(),
        }
    }
}

/// Truncated SHA-256 over the identity fields. Row position is NOT part
/// of the identity: inserting or removing unrelated rows must not
/// reassign ids (and therefore URLs) to other listings.
fn content_id(name: &str, address: &str, area: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update([0u8]);
    hasher.update(address.as_bytes());
    hasher.update([0u8]);
    hasher.update(area.as_bytes());
    let digest = hasher.finalize();
    digest
        .iter()
        .take(6)
        .map(|b| format!("{b:02x}"))
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cols: &[(&str, &str)]) -> RawRow {
        RawRow::new(
            cols.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn resolves_tagged_row() {
        let r = row(&[("案名", "A宅"), ("狀態", "ON"), ("價格", "1,200萬")]);
        let listing = CanonicalListing::from_row(&r);
        assert_eq!(listing.name, "A宅");
        assert!(listing.is_active);
        assert_eq!(listing.price_numeric, Some(1200));
        assert_eq!(listing.price_bucket, "1200-1600萬");
    }

    #[test]
    fn off_status_deactivates_row() {
        let r = row(&[("案名", "B宅"), ("狀態", "OFF")]);
        assert!(!CanonicalListing::from_row(&r).is_active);
    }

    #[test]
    fn missing_status_defaults_to_active() {
        let r = row(&[("案名", "C宅")]);
        assert!(CanonicalListing::from_row(&r).is_active);
    }

    #[test]
    fn price_bucket_is_always_present() {
        let no_price = CanonicalListing::from_row(&row(&[("案名", "D宅")]));
        assert_eq!(no_price.price_bucket, categories::PRICE_UNSPECIFIED);

        let explicit = CanonicalListing::from_row(&row(&[("案名", "E宅"), ("價格帶", "豪宅帶")]));
        assert_eq!(explicit.price_bucket, "豪宅帶");
    }

    #[test]
    fn id_depends_on_content_not_position() {
        let a = CanonicalListing::from_row(&row(&[
            ("案名", "A宅"),
            ("地址", "五權三街1號"),
            ("區域", "台中市西區"),
        ]));
        let b = CanonicalListing::from_row(&row(&[
            ("區域", "台中市西區"),
            ("案名", "A宅"),
            ("地址", "五權三街1號"),
        ]));
        assert_eq!(a.id, b.id);

        let c = CanonicalListing::from_row(&row(&[
            ("案名", "A宅"),
            ("地址", "五權三街2號"),
            ("區域", "台中市西區"),
        ]));
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn non_http_link_is_dropped() {
        let r = row(&[("案名", "F宅"), ("連結", "見留言")]);
        assert_eq!(CanonicalListing::from_row(&r).external_link, None);
    }

    #[test]
    fn tags_come_from_tag_columns() {
        let r = row(&[
            ("案名", "G宅"),
            ("關鍵字", "國美特區, 平車"),
            ("狀態標籤", "新成屋"),
        ]);
        let listing = CanonicalListing::from_row(&r);
        assert_eq!(listing.feature_tags, vec!["國美特區", "平車"]);
        assert_eq!(listing.state_tags, vec!["新成屋"]);
    }
}
