use extractor_engine::ResultMap;

/// Values longer than this are not printed.
pub const MAX_PRINTED_BYTES: usize = 2048;
const LONG_VALUE: &str = "LONG VALUE";

/// One `label: value` line per result, sorted by label.
pub fn format_results(results: &ResultMap) -> Vec<String> {
    let mut entries: Vec<_> = results.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
        .into_iter()
        .map(|(label, value)| {
            if value.len() > MAX_PRINTED_BYTES {
                format!("{label}: {LONG_VALUE}")
            } else {
                format!("{label}: {}", String::from_utf8_lossy(value))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_sorted_and_long_values_elided() {
        let mut results = ResultMap::new();
        results.insert("b".to_string(), b"two".to_vec());
        results.insert("a".to_string(), b"one".to_vec());
        results.insert("big".to_string(), vec![b'x'; MAX_PRINTED_BYTES + 1]);
        results.insert("edge".to_string(), vec![b'y'; MAX_PRINTED_BYTES]);

        let lines = format_results(&results);

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "a: one");
        assert_eq!(lines[1], "b: two");
        assert_eq!(lines[2], "big: LONG VALUE");
        assert!(lines[3].starts_with("edge: yyy"));
        assert_eq!(lines[3].len(), "edge: ".len() + MAX_PRINTED_BYTES);
    }
}
