use serde_json::{Map, Value};

/// Members of the line counter's output that are not language buckets.
const RESERVED_KEYS: [&str; 3] = ["total", "SUM", "header"];

/// Line counts from one run of the line counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeLines {
    total: Option<u64>,
    buckets: Vec<(String, u64)>,
}

impl CodeLines {
    #[must_use]
    pub fn new(total: Option<u64>, buckets: Vec<(String, u64)>) -> Self {
        Self { total, buckets }
    }

    /// Extracts the `code` counts from a `cloc` snapshot section.
    ///
    /// `total` (or `SUM`, as the line counter itself names it) holds the
    /// overall count; every other member with a `code` count is a bucket, kept
    /// in the order it appears in the file.
    pub(super) fn from_section(section: &Map<String, Value>) -> Self {
        let code = |value: &Value| value.get("code").and_then(Value::as_u64);

        let total = section.get("total").or_else(|| section.get("SUM")).and_then(code);
        let buckets = section
            .iter()
            .filter(|(name, _)| !RESERVED_KEYS.contains(&name.as_str()))
            .filter_map(|(name, value)| code(value).map(|count| (name.clone(), count)))
            .collect();

        Self { total, buckets }
    }

    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        self.total
    }

    #[must_use]
    pub fn bucket(&self, name: &str) -> Option<u64> {
        self.buckets.iter().find(|(bucket, _)| bucket == name).map(|(_, count)| *count)
    }

    pub fn buckets(&self) -> impl Iterator<Item = (&str, u64)> {
        self.buckets.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn section(value: &Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_total_and_buckets_in_file_order() {
        let lines = CodeLines::from_section(&section(&json!({
            "total": { "files": 12, "code": 2978 },
            "tsx": { "code": 800 },
            "ts": { "code": 2100 },
            "css": { "files": 3 }
        })));

        assert_eq!(lines.total(), Some(2978));
        assert_eq!(lines.buckets().collect::<Vec<_>>(), vec![("tsx", 800), ("ts", 2100)]);
        assert_eq!(lines.bucket("ts"), Some(2100));
        assert_eq!(lines.bucket("css"), None);
    }

    #[test]
    fn test_sum_is_accepted_as_total() {
        let lines = CodeLines::from_section(&section(&json!({
            "header": { "cloc_version": "2.00" },
            "SUM": { "code": 42 }
        })));

        assert_eq!(lines.total(), Some(42));
        assert_eq!(lines.buckets().count(), 0);
    }

    #[test]
    fn test_missing_total() {
        let lines = CodeLines::from_section(&section(&json!({ "ts": { "code": 7 } })));
        assert_eq!(lines.total(), None);
        assert_eq!(lines.bucket("ts"), Some(7));
    }
}
