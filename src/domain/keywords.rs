// ============================================================
// CATEGORY KEYWORD MAP
// ============================================================
// Ordered category -> keyword mapping driving the classifier.
// Category order is load-bearing: it is the precedence order
// categories are tried in when classifying text.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Label returned for blank and sentinel inputs
pub const NOT_SPECIFIED: &str = "Not Specified";

/// Sentinel values (lower-cased) that classify as `Not Specified`
pub const SENTINEL_VALUES: &[&str] = &["nan", "not mentioned", "not specified"];

/// One category with its ordered keyword list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryKeywords {
    pub label: String,
    pub keywords: Vec<String>,
}

/// An ordered mapping from category label to keyword list.
///
/// Serialized as a JSON object; entry order follows the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryKeywordMap {
    entries: Vec<CategoryKeywords>,
}

impl CategoryKeywordMap {
    pub fn new(entries: Vec<CategoryKeywords>) -> Self {
        Self { entries }
    }

    /// Categories in precedence order
    pub fn entries(&self) -> &[CategoryKeywords] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stable serialization used as the classifier cache key
    pub fn fingerprint(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// The built-in four-category map shipped with the tool
    pub fn default_map() -> Self {
        let raw: &[(&str, &[&str])] = &[
            (
                "Detergent",
                &[
                    "detergent",
                    "detergent powder",
                    "detergent pod",
                    "laundry",
                    "laundry pod",
                    "powder",
                    "bar",
                    "wash",
                ],
            ),
            (
                "Fabric Enhancer",
                &[
                    "fabric",
                    "softener",
                    "conditioner",
                    "whitener",
                    "scent booster",
                    "fabric enhancer",
                    "fabric cleaner",
                    "scentboost",
                    "scent boost",
                ],
            ),
            (
                "Kitchen and Bathroom Cleaner",
                &[
                    "kitchen",
                    "bathroom",
                    "bath",
                    "toilet",
                    "dish",
                    "dishwash",
                    "dishwasher",
                    "floor",
                    "surface",
                    "shower",
                    "tap",
                    "bkc",
                    "harpic",
                    "cleaner",
                    "multi[- ]?purpose",
                    "home cleaner",
                    "homecare",
                ],
            ),
            (
                "Not Relevant",
                &[
                    "insect",
                    "repellent",
                    "ac cleaner",
                    "air[- ]?freshener",
                    "pest",
                    "lizard",
                    "mosquito",
                    "ant repellent",
                ],
            ),
        ];

        Self::new(
            raw.iter()
                .map(|(label, keywords)| CategoryKeywords {
                    label: label.to_string(),
                    keywords: keywords.iter().map(|k| k.to_string()).collect(),
                })
                .collect(),
        )
    }
}

impl Serialize for CategoryKeywordMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.label, &entry.keywords)?;
        }
        map.end()
    }
}

struct MapVisitor;

impl<'de> Visitor<'de> for MapVisitor {
    type Value = CategoryKeywordMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of category labels to keyword lists")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<CategoryKeywordMap, A::Error> {
        let mut entries = Vec::new();
        while let Some((label, keywords)) = access.next_entry::<String, Vec<String>>()? {
            entries.push(CategoryKeywords { label, keywords });
        }
        Ok(CategoryKeywordMap::new(entries))
    }
}

impl<'de> Deserialize<'de> for CategoryKeywordMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(MapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map_order() {
        let map = CategoryKeywordMap::default_map();
        let labels: Vec<&str> = map.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Detergent",
                "Fabric Enhancer",
                "Kitchen and Bathroom Cleaner",
                "Not Relevant"
            ]
        );
    }

    #[test]
    fn test_deserialize_keeps_document_order() {
        let json = r#"{"Zeta": ["z"], "Alpha": ["a"]}"#;
        let map: CategoryKeywordMap = serde_json::from_str(json).unwrap();
        let labels: Vec<&str> = map.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = CategoryKeywordMap::default_map();
        let b = CategoryKeywordMap::default_map();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let c: CategoryKeywordMap = serde_json::from_str(r#"{"Only": ["kw"]}"#).unwrap();
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
