/// Splits a URL into its query-free endpoint and the query pairs as
/// they appear on the wire (still percent-encoded).
pub(crate) fn split_query(url: &url::Url) -> (String, Vec<(String, String)>) {
    let pairs = url.query().map(parse_query).unwrap_or_default();
    let endpoint = url
        .as_str()
        .split('?')
        .next()
        .unwrap_or_else(|| url.as_str())
        .to_string();
    (endpoint, pairs)
}

/// Parses a raw query string into pairs without decoding anything.
/// Segments with no `=` are dropped.
pub(crate) fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|s| !s.is_empty())
        .filter_map(|s| {
            let mut parts = s.splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(k), Some(v)) => Some((k.to_string(), v.to_string())),
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_query_separates_endpoint_and_pairs() {
        let url = url::Url::parse("https://api.example.com/list.json?count=20&since_id=5").unwrap();
        let (endpoint, pairs) = split_query(&url);
        assert_eq!(endpoint, "https://api.example.com/list.json");
        assert_eq!(
            pairs,
            vec![
                ("count".to_string(), "20".to_string()),
                ("since_id".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn split_query_without_query_yields_no_pairs() {
        let url = url::Url::parse("https://api.example.com/list.json").unwrap();
        let (endpoint, pairs) = split_query(&url);
        assert_eq!(endpoint, "https://api.example.com/list.json");
        assert!(pairs.is_empty());
    }

    #[test]
    fn parse_query_keeps_wire_encoding_intact() {
        let pairs = parse_query("q=a%20b&empty=&flagonly&x=1=2");
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "a%20b".to_string()),
                ("empty".to_string(), "".to_string()),
                ("x".to_string(), "1=2".to_string()),
            ]
        );
    }

    #[test]
    fn parse_query_of_empty_string_is_empty() {
        assert!(parse_query("").is_empty());
    }
}
