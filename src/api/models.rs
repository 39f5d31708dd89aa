use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data_models::StoredItem;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(alias = "q")]
    pub query: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Wire shape of a single item on the core API. `id` may be omitted on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemDto {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub content: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultDto {
    pub items: Vec<SearchItemDto>,
    pub total_count: u64,
    pub current_page: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl From<StoredItem> for SearchItemDto {
    fn from(item: StoredItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            content: item.content,
            link: item.link,
            tags: item.tags,
            score: item.score,
        }
    }
}

impl SearchItemDto {
    /// Timestamps are placeholders; the store stamps them on write.
    pub fn into_entity(self) -> StoredItem {
        StoredItem::new(self.id, self.title, self.content, self.link)
            .with_tags(self.tags)
            .with_score(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_dto_uses_camel_case() {
        let dto = SearchResultDto {
            items: vec![SearchItemDto {
                id: "1".into(),
                title: "Test Title".into(),
                content: "Test Content".into(),
                link: "https://example.com".into(),
                tags: vec![],
                score: None,
            }],
            total_count: 1,
            current_page: 1,
        };

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "items": [{
                    "id": "1",
                    "title": "Test Title",
                    "content": "Test Content",
                    "link": "https://example.com"
                }],
                "totalCount": 1,
                "currentPage": 1
            })
        );
    }

    #[test]
    fn test_item_dto_id_is_optional_on_input() {
        let dto: SearchItemDto = serde_json::from_str(
            r#"{"title":"New","content":"Body","link":"https://example.com/new"}"#,
        )
        .unwrap();
        assert!(dto.id.is_empty());
        assert!(dto.tags.is_empty());
        assert!(dto.score.is_none());
    }

    #[test]
    fn test_entity_dto_mapping_preserves_fields() {
        let item = StoredItem::new("7".into(), "Axum".into(), "Web".into(), "https://docs.rs/axum".into())
            .with_tags(vec!["rust".into()])
            .with_score(Some(0.5));
        let dto = SearchItemDto::from(item.clone());
        assert_eq!(dto.id, "7");
        assert_eq!(dto.content, "Web");
        assert_eq!(dto.link, "https://docs.rs/axum");

        let back = dto.into_entity();
        assert_eq!(back.id, item.id);
        assert_eq!(back.title, item.title);
        assert_eq!(back.tags, item.tags);
        assert_eq!(back.score, Some(0.5));
    }
}
