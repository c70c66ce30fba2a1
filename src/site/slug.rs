// src/site/slug.rs

const MAX_SLUG_CHARS: usize = 70;

fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// URL path segment for a free-text name. ASCII word characters and CJK
/// ideographs pass through, everything else collapses to a single dash.
/// Empty input gets a fixed placeholder so no page ever lands at `//`.
pub fn slugify(text: &str) -> String {
    let mut out = String::new();
    let mut pending_dash = false;
    for c in text.trim().chars() {
        if is_slug_char(c) {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }

    let truncated: String = out.chars().take(MAX_SLUG_CHARS).collect();
    let trimmed = truncated.trim_matches('-');
    if trimmed.is_empty() {
        "item".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_cjk_and_ascii_words() {
        assert_eq!(slugify("台中市西區 宏台美術館"), "台中市西區-宏台美術館");
        assert_eq!(slugify("Block 5, Unit B"), "Block-5-Unit-B");
    }

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(slugify("a -- b ///c"), "a-b-c");
    }

    #[test]
    fn empty_input_gets_placeholder() {
        assert_eq!(slugify("！？。"), "item");
        assert_eq!(slugify(""), "item");
    }

    #[test]
    fn long_input_is_capped() {
        let long = "字".repeat(200);
        assert_eq!(slugify(&long).chars().count(), MAX_SLUG_CHARS);
    }
}
