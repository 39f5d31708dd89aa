use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// A searchable item as persisted in the document store.
/// The id doubles as the partition key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoredItem {
    #[serde(rename = "_id")]
    pub id: String,

    pub title: String,
    pub content: String,
    pub link: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Fixed relevance hint carried through to clients; never computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl StoredItem {
    pub fn new(id: String, title: String, content: String, link: String) -> StoredItem {
        let now = DateTime::now();
        StoredItem {
            id,
            title,
            content,
            link,
            created_at: now,
            updated_at: now,
            tags: Vec::new(),
            score: None,
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> StoredItem {
        self.tags = tags;
        self
    }

    pub fn with_score(mut self, score: Option<f64>) -> StoredItem {
        self.score = score;
        self
    }

    /// Case-insensitive substring match over title OR content.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_title_or_content_ignoring_case() {
        let item = StoredItem::new(
            "1".into(),
            "NestJS Documentation".into(),
            "Official framework docs".into(),
            "https://docs.nestjs.com".into(),
        );
        assert!(item.matches("nest"));
        assert!(item.matches("framework"));
        assert!(item.matches("js doc"));
        assert!(!item.matches("typescript"));
    }

    #[test]
    fn test_serializes_id_as_underscore_id() {
        let item = StoredItem::new("abc".into(), "t".into(), "c".into(), "l".into());
        let doc = mongodb::bson::to_document(&item).unwrap();
        assert_eq!(doc.get_str("_id").unwrap(), "abc");
        assert!(doc.get("id").is_none());
    }
}
