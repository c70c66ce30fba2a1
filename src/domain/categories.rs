// src/domain/categories.rs

/// Ascending bucket thresholds in 萬. Prices fall into half-open
/// `[lower, upper)` ranges; 1200 lands in 1200-1600, not 800-1200.
pub const PRICE_THRESHOLDS: [u64; 5] = [800, 1200, 1600, 2000, 3000];

/// Bucket used when a listing has no parseable price.
pub const PRICE_UNSPECIFIED: &str = "價格面議";

/// Split a free-text tag field into clean tags. Handles the delimiters
/// people actually paste: ASCII and full-width commas/semicolons/pipes/
/// slashes, 頓號, and newlines. Order of first appearance is preserved,
/// duplicates and empties dropped.
pub fn split_tags(text: &str) -> Vec<String> {
    const DELIMITERS: [char; 11] = [',', '，', ';', '；', '|', '｜', '/', '／', '、', '\n', '\r'];

    let mut tags: Vec<String> = Vec::new();
    for piece in text.split(|c| DELIMITERS.contains(&c)) {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        if !tags.iter().any(|t| t == piece) {
            tags.push(piece.to_string());
        }
    }
    tags
}

/// Name the price bucket for a listing. An explicit bucket from the sheet
/// wins verbatim; otherwise the numeric price is classified against
/// [`PRICE_THRESHOLDS`]; no price at all gets the fixed sentinel so the
/// bucket is total over all listings.
pub fn price_bucket(explicit: Option<&str>, price: Option<u64>) -> String {
    if let Some(b) = explicit {
        let b = b.trim();
        if !b.is_empty() {
            return b.to_string();
        }
    }

    let Some(price) = price else {
        return PRICE_UNSPECIFIED.to_string();
    };

    if price < PRICE_THRESHOLDS[0] {
        return format!("{}萬以下", PRICE_THRESHOLDS[0]);
    }
    for window in PRICE_THRESHOLDS.windows(2) {
        let (lower, upper) = (window[0], window[1]);
        if price >= lower && price < upper {
            return format!("{lower}-{upper}萬");
        }
    }
    format!("{}萬以上", PRICE_THRESHOLDS[PRICE_THRESHOLDS.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_mixed_delimiters() {
        let tags = split_tags("國美特區, 五權三街｜三房平車／近學區\n電梯");
        assert_eq!(
            tags,
            vec!["國美特區", "五權三街", "三房平車", "近學區", "電梯"]
        );
    }

    #[test]
    fn dedupes_preserving_first_appearance() {
        let tags = split_tags("平車,電梯,平車, 電梯 ");
        assert_eq!(tags, vec!["平車", "電梯"]);
    }

    #[test]
    fn empty_pieces_are_dropped() {
        assert!(split_tags(" , ,， ").is_empty());
        assert!(split_tags("").is_empty());
    }

    #[test]
    fn bucket_boundaries_are_half_open() {
        assert_eq!(price_bucket(None, Some(1200)), "1200-1600萬");
        assert_eq!(price_bucket(None, Some(1199)), "800-1200萬");
        assert_eq!(price_bucket(None, Some(799)), "800萬以下");
        assert_eq!(price_bucket(None, Some(3000)), "3000萬以上");
        assert_eq!(price_bucket(None, Some(2999)), "2000-3000萬");
    }

    #[test]
    fn explicit_bucket_wins_verbatim() {
        assert_eq!(price_bucket(Some("豪宅帶"), Some(500)), "豪宅帶");
        // Blank explicit value falls through to derivation.
        assert_eq!(price_bucket(Some("  "), Some(500)), "800萬以下");
    }

    #[test]
    fn missing_price_gets_sentinel() {
        assert_eq!(price_bucket(None, None), PRICE_UNSPECIFIED);
    }
}
