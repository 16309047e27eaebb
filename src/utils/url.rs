// src/utils/url.rs

//! URL manipulation utilities.

/// Extract the numeric paper id from a reference URL.
///
/// The council API identifies papers through an `id` query parameter in an
/// otherwise opaque URL. Returns 0 when the URL is malformed, the parameter
/// is absent, or its value is not a number. 0 is also the initial watermark,
/// so such papers are treated as already seen.
///
/// # Examples
/// ```
/// use ratsinfo_bot::utils::url::extract_paper_id;
///
/// assert_eq!(
///     extract_paper_id("https://example.com/vo0050.asp?id=1234"),
///     1234
/// );
/// assert_eq!(extract_paper_id("not a url"), 0);
/// ```
pub fn extract_paper_id(paper_url: &str) -> u64 {
    let Ok(parsed) = url::Url::parse(paper_url) else {
        return 0;
    };

    parsed
        .query_pairs()
        .find(|(key, _)| key == "id")
        .and_then(|(_, value)| value.parse::<u64>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_id_query_key() {
        let url = "https://example.com/vo0050.asp?id=1234&mode=view";
        assert_eq!(extract_paper_id(url), 1234);
    }

    #[test]
    fn test_extract_id_missing_parameter() {
        let url = "https://example.com/vo0050.asp?mode=view";
        assert_eq!(extract_paper_id(url), 0);
    }

    #[test]
    fn test_extract_id_non_numeric_value() {
        let url = "https://example.com/vo0050.asp?id=abc";
        assert_eq!(extract_paper_id(url), 0);
    }

    #[test]
    fn test_extract_id_malformed_url() {
        assert_eq!(extract_paper_id(""), 0);
        assert_eq!(extract_paper_id("::::"), 0);
    }

    #[test]
    fn test_extract_id_first_match_wins() {
        let url = "https://example.com/vo0050.asp?id=7&id=9";
        assert_eq!(extract_paper_id(url), 7);
    }

    #[test]
    fn test_extract_id_ignores_similar_keys() {
        let url = "https://example.com/vo0050.asp?paper_id=55";
        assert_eq!(extract_paper_id(url), 0);
    }
}
