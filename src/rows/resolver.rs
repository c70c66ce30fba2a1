// src/rows/resolver.rs
//
// Heuristic field resolution. The sheet's column headers are whatever the
// person maintaining it typed this week, so each logical field is looked
// up through an ordered list of candidate fragments instead of a fixed
// label.

use super::RawRow;

/// Resolve one logical field from a row.
///
/// Two passes over the candidate list:
///   (a) exact match: a row key equal to a candidate,
///   (b) fragment match: a row key *containing* a candidate.
/// The first non-empty value wins, in row-column order within a pass.
///
/// When several columns match the same fragment, whichever comes first in
/// the row wins. That is repeatable for a given row but otherwise
/// arbitrary; callers must not read anything more into it.
pub fn resolve<'a>(row: &'a RawRow, candidates: &[&str]) -> Option<&'a str> {
    for candidate in candidates {
        if let Some(value) = row.get(candidate) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    for (key, value) in row.iter() {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if candidates.iter().any(|c| key.contains(c)) {
            return Some(value);
        }
    }
    None
}

/// Like [`resolve`], with a caller-supplied fallback for "no such column".
pub fn resolve_or<'a>(row: &'a RawRow, candidates: &[&str], fallback: &'a str) -> &'a str {
    resolve(row, candidates).unwrap_or(fallback)
}

/// Pull a whole number out of locale-formatted price/size text:
/// `"1,200萬"` becomes 1200. Thousands separators and unit suffixes are
/// stripped, then the first digit run is parsed. No digits means `None`;
/// missing data must not turn into a real zero.
pub fn numeric(text: &str) -> Option<u64> {
    let mut digits = String::new();
    let mut seen_digit = false;
    for ch in text.chars() {
        // Fold full-width digits so sheet formatting quirks don't matter.
        let ch = match ch {
            '０'..='９' => char::from_u32('0' as u32 + (ch as u32 - '０' as u32))?,
            _ => ch,
        };
        if ch.is_ascii_digit() {
            digits.push(ch);
            seen_digit = true;
        } else if seen_digit {
            match ch {
                ',' | '，' => continue,
                _ => break,
            }
        } else if ch == ',' || ch == '，' {
            continue;
        }
    }
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Interpret a status/featured style flag column. Unrecognized text maps
/// to `None` so the caller picks the default.
pub fn flag(text: &str) -> Option<bool> {
    let t = text.trim().to_ascii_uppercase();
    match t.as_str() {
        "ON" | "Y" | "YES" | "TRUE" | "1" | "V" | "是" | "上架" => Some(true),
        "OFF" | "N" | "NO" | "FALSE" | "0" | "否" | "下架" => Some(false),
        _ => None,
    }
}
