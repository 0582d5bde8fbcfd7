//! Notion ID normalization.
//!
//! Notion shows IDs as 32 hex characters (in URLs) but its API documents the
//! dashed UUID form. Both are accepted in config and normalized here.

/// Normalize a Notion ID to the dashed 8-4-4-4-12 form.
///
/// Dashes and spaces are stripped first. Anything that is not 32 characters
/// afterwards is returned unchanged and logged as a warning; the API will
/// reject it later with a normal query error. Only the length is checked.
pub fn format_notion_id(notion_id: &str) -> String {
    let clean: Vec<char> = notion_id
        .chars()
        .filter(|c| *c != '-' && *c != ' ')
        .collect();

    if clean.len() != 32 {
        tracing::warn!(
            notion_id = %notion_id,
            expected = 32,
            actual = clean.len(),
            "Invalid Notion ID length, using it as-is"
        );
        return notion_id.to_string();
    }

    let group = |range: std::ops::Range<usize>| clean[range].iter().collect::<String>();
    format!(
        "{}-{}-{}-{}-{}",
        group(0..8),
        group(8..12),
        group(12..16),
        group(16..20),
        group(20..32)
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::undashed(
        "0123456789abcdef0123456789abcdef",
        "01234567-89ab-cdef-0123-456789abcdef"
    )]
    #[case::already_dashed(
        "01234567-89ab-cdef-0123-456789abcdef",
        "01234567-89ab-cdef-0123-456789abcdef"
    )]
    #[case::oddly_dashed(
        "0123-456789abcdef0123456789ab-cdef",
        "01234567-89ab-cdef-0123-456789abcdef"
    )]
    #[case::spaces(
        "01234567 89ab cdef 0123 456789abcdef",
        "01234567-89ab-cdef-0123-456789abcdef"
    )]
    #[case::uppercase_kept(
        "0123456789ABCDEF0123456789ABCDEF",
        "01234567-89AB-CDEF-0123-456789ABCDEF"
    )]
    fn test_normalizes_valid_ids(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_notion_id(input), expected);
    }

    #[rstest]
    #[case::too_short("0123456789abcdef")]
    #[case::too_long("0123456789abcdef0123456789abcdef00")]
    #[case::empty("")]
    #[case::multibyte_short("ééééééééééééééé")]
    fn test_invalid_ids_pass_through(#[case] input: &str) {
        assert_eq!(format_notion_id(input), input);
    }

    #[test]
    fn test_any_32_characters_are_dashed() {
        assert_eq!(
            format_notion_id("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"),
            "zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz"
        );

        let wide = "é".repeat(32);
        let formatted = format_notion_id(&wide);
        assert_eq!(formatted.chars().filter(|c| *c == '-').count(), 4);
        assert_eq!(formatted.chars().filter(|c| *c == 'é').count(), 32);
    }
}
