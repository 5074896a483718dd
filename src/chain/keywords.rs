//! Result keyword set used to classify outcome steps

use serde::{Deserialize, Serialize};

/// Default keywords marking a step as an outcome: growth, uplift,
/// increase, improvement, optimization.
pub const DEFAULT_RESULT_KEYWORDS: [&str; 5] = ["增长", "提升", "提高", "改善", "优化"];

/// Substring keywords that mark a chain step as a result node.
///
/// Matching is plain substring containment. Blank keywords are dropped on
/// construction since an empty pattern would match every step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ResultKeywords(Vec<String>);

impl From<Vec<String>> for ResultKeywords {
    fn from(keywords: Vec<String>) -> Self {
        Self::new(keywords)
    }
}

impl From<ResultKeywords> for Vec<String> {
    fn from(keywords: ResultKeywords) -> Self {
        keywords.0
    }
}

impl Default for ResultKeywords {
    fn default() -> Self {
        Self::new(DEFAULT_RESULT_KEYWORDS)
    }
}

impl ResultKeywords {
    /// Build a keyword set, replacing the defaults entirely.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self(Vec::new());
        set.extend(keywords);
        set
    }

    /// A set that never matches; only the last step of a chain is a result.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    /// Add keywords, skipping blanks and duplicates.
    pub fn extend<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for keyword in keywords {
            let keyword: String = keyword.into();
            let keyword = keyword.trim();
            if keyword.is_empty() || self.0.iter().any(|k| k == keyword) {
                continue;
            }
            self.0.push(keyword.to_string());
        }
    }

    /// Builder form of [`extend`](Self::extend).
    pub fn with<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extend(keywords);
        self
    }

    /// Whether `text` contains any keyword.
    pub fn matches(&self, text: &str) -> bool {
        self.0.iter().any(|k| text.contains(k.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keywords() {
        let keywords = ResultKeywords::default();
        assert_eq!(keywords.len(), 5);
        assert!(keywords.matches("带动业绩增长"));
        assert!(keywords.matches("提升产能"));
        assert!(keywords.matches("费用率改善"));
        assert!(!keywords.matches("签订合同"));
    }

    #[test]
    fn test_custom_keywords_replace_defaults() {
        let keywords = ResultKeywords::new(["growth", "margin"]);
        assert!(keywords.matches("revenue growth"));
        assert!(!keywords.matches("提升产能"));
    }

    #[test]
    fn test_extend_skips_blank_and_duplicate() {
        let keywords = ResultKeywords::default().with(["", "  ", "增长", "扩张"]);
        assert_eq!(keywords.len(), 6);
        assert!(keywords.matches("业务扩张"));
        assert!(!keywords.matches("anything"));
    }

    #[test]
    fn test_none_never_matches() {
        let keywords = ResultKeywords::none();
        assert!(keywords.is_empty());
        assert!(!keywords.matches("业绩增长"));
    }

    #[test]
    fn test_serializes_as_list() {
        let json = serde_json::to_string(&ResultKeywords::new(["a", "b"])).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
    }

    #[test]
    fn test_deserialize_drops_blanks() {
        let keywords: ResultKeywords = serde_json::from_str(r#"["增长", "", "增长"]"#).unwrap();
        assert_eq!(keywords.len(), 1);
    }
}
