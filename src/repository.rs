use anyhow::{Result, bail};
use async_trait::async_trait;
use mongodb::bson::DateTime;
use tokio::sync::RwLock;

use crate::data_models::StoredItem;
use crate::query::PageRequest;

/// Storage seam for the core search layer.
///
/// Matching is a case-insensitive substring test over `title` OR `content`.
/// `search` returns only the requested window; `count` counts every match.
#[async_trait]
pub trait SearchRepository: Send + Sync {
    async fn search(&self, text: &str, page: PageRequest) -> Result<Vec<StoredItem>>;

    async fn count(&self, text: &str) -> Result<u64>;

    async fn get_by_id(&self, id: &str) -> Result<Option<StoredItem>>;

    /// Stamps both timestamps. Fails if the id is already taken.
    async fn create(&self, item: StoredItem) -> Result<StoredItem>;

    /// Replaces the item with the same id, refreshing `updated_at`.
    /// Returns `None` when no such item exists.
    async fn update(&self, item: StoredItem) -> Result<Option<StoredItem>>;

    async fn delete(&self, id: &str) -> Result<bool>;
}

/// In-process store, kept in insertion order.
#[derive(Debug, Default)]
pub struct MemorySearchRepo {
    items: RwLock<Vec<StoredItem>>,
}

impl MemorySearchRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<StoredItem>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Store preloaded with a handful of demo documents.
    pub fn seeded() -> Self {
        Self::with_items(seed_items())
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl SearchRepository for MemorySearchRepo {
    async fn search(&self, text: &str, page: PageRequest) -> Result<Vec<StoredItem>> {
        let needle = text.to_lowercase();
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|item| item.matches(&needle))
            .skip(page.skip() as usize)
            .take(page.take() as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, text: &str) -> Result<u64> {
        let needle = text.to_lowercase();
        let items = self.items.read().await;
        Ok(items.iter().filter(|item| item.matches(&needle)).count() as u64)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<StoredItem>> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn create(&self, mut item: StoredItem) -> Result<StoredItem> {
        let mut items = self.items.write().await;
        if items.iter().any(|existing| existing.id == item.id) {
            bail!("item with id {} already exists", item.id);
        }
        let now = DateTime::now();
        item.created_at = now;
        item.updated_at = now;
        items.push(item.clone());
        Ok(item)
    }

    async fn update(&self, mut item: StoredItem) -> Result<Option<StoredItem>> {
        let mut items = self.items.write().await;
        let Some(slot) = items.iter_mut().find(|existing| existing.id == item.id) else {
            return Ok(None);
        };
        item.created_at = slot.created_at;
        item.updated_at = DateTime::now();
        *slot = item.clone();
        Ok(Some(item))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() < before)
    }
}

fn seed_items() -> Vec<StoredItem> {
    [
        (
            "1",
            "NestJS Documentation",
            "Official NestJS framework documentation",
            "https://docs.nestjs.com",
            &["nestjs", "docs"][..],
            Some(0.95),
        ),
        (
            "2",
            "TypeScript Handbook",
            "The official TypeScript documentation",
            "https://www.typescriptlang.org/docs",
            &["typescript", "docs"][..],
            Some(0.89),
        ),
        (
            "3",
            "REST API Best Practices",
            "Guide to building robust REST APIs",
            "https://restfulapi.net",
            &["api"][..],
            Some(0.82),
        ),
        (
            "4",
            "Jest Testing Framework",
            "Delightful JavaScript Testing",
            "https://jestjs.io",
            &["testing"][..],
            Some(0.78),
        ),
        (
            "5",
            "Express.js Guide",
            "Fast, unopinionated web framework for Node.js",
            "https://expressjs.com",
            &["node"][..],
            Some(0.71),
        ),
        (
            "6",
            "The Rust Programming Language",
            "An introductory book about Rust",
            "https://doc.rust-lang.org/book",
            &["rust", "docs"][..],
            None,
        ),
        (
            "7",
            "Axum",
            "Ergonomic and modular web framework built with Tokio, Tower, and Hyper",
            "https://docs.rs/axum",
            &["rust", "web"][..],
            None,
        ),
    ]
    .into_iter()
    .map(|(id, title, content, link, tags, score)| {
        StoredItem::new(id.into(), title.into(), content.into(), link.into())
            .with_tags(tags.iter().map(|t| t.to_string()).collect())
            .with_score(score)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_items(count: usize) -> Vec<StoredItem> {
        (1..=count)
            .map(|i| {
                StoredItem::new(
                    format!("item-{i:02}"),
                    format!("Test item {i}"),
                    format!("Body of item {i}"),
                    format!("https://example.com/{i}"),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_search_windows_and_counts() -> Result<()> {
        let repo = MemorySearchRepo::with_items(numbered_items(25));

        let page3 = repo.search("test", PageRequest::new(3, 10)).await?;
        assert_eq!(page3.len(), 5);
        assert_eq!(page3[0].id, "item-21");
        assert_eq!(page3[4].id, "item-25");

        assert_eq!(repo.count("TEST").await?, 25);
        assert!(repo.search("test", PageRequest::new(4, 10)).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_search_matches_content_too() -> Result<()> {
        let repo = MemorySearchRepo::seeded();
        let hits = repo.search("delightful", PageRequest::new(1, 10)).await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Jest Testing Framework");
        Ok(())
    }

    #[tokio::test]
    async fn test_no_match_returns_empty_not_everything() -> Result<()> {
        let repo = MemorySearchRepo::seeded();
        assert!(
            repo.search("zzz-no-such-thing", PageRequest::new(1, 10))
                .await?
                .is_empty()
        );
        assert_eq!(repo.count("zzz-no-such-thing").await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() -> Result<()> {
        let repo = MemorySearchRepo::new();
        let item = StoredItem::new("a".into(), "A".into(), "a".into(), "l".into());
        repo.create(item.clone()).await?;
        assert!(repo.create(item).await.is_err());
        assert_eq!(repo.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() -> Result<()> {
        let repo = MemorySearchRepo::new();
        let created = repo
            .create(StoredItem::new("a".into(), "A".into(), "a".into(), "l".into()))
            .await?;

        let mut changed = created.clone();
        changed.title = "Renamed".into();
        changed.created_at = DateTime::from_millis(0);
        let updated = repo.update(changed).await?.expect("item exists");

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let missing = StoredItem::new("nope".into(), "x".into(), "x".into(), "x".into());
        assert!(repo.update(missing).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete() -> Result<()> {
        let repo = MemorySearchRepo::seeded();
        assert!(repo.delete("1").await?);
        assert!(!repo.delete("1").await?);
        assert!(repo.get_by_id("1").await?.is_none());
        Ok(())
    }
}
