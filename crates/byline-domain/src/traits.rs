//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Infrastructure implementations live in other crates.

use crate::{
    Article, ArticleDraft, ArticleFilter, ContentDraft, ContentItem, ContentKind, Page, Tag,
};

/// Trait for resolving tag names to tag records
///
/// Implemented by the infrastructure layer (byline-store)
pub trait TagStore {
    /// Error type for tag operations
    type Error;

    /// Resolve a name to an existing tag, creating it if absent
    ///
    /// Repeated calls with the same name return a tag with the same
    /// identifier; the store never holds two tags with identical names.
    fn get_or_create(&mut self, name: &str) -> Result<Tag, Self::Error>;
}

/// Trait for storing and retrieving content items
///
/// Implemented by the infrastructure layer (byline-store)
pub trait ContentStore {
    /// Error type for store operations
    type Error;

    /// Create a content item of the given kind in one logical transaction
    ///
    /// Scalar fields are persisted, each requested tag name is resolved or
    /// created, and one association per distinct name is recorded. Either
    /// all steps succeed and are visible together, or none are.
    fn create(&mut self, kind: ContentKind, draft: ContentDraft)
        -> Result<ContentItem, Self::Error>;

    /// List items of a kind in insertion order, tag sets materialized
    fn list(&self, kind: ContentKind, page: Page) -> Result<Vec<ContentItem>, Self::Error>;

    /// Create an article, resolving its category by name
    fn create_article(&mut self, draft: ArticleDraft) -> Result<Article, Self::Error>;

    /// List articles matching the filter, in insertion order
    fn list_articles(
        &self,
        filter: &ArticleFilter,
        page: Page,
    ) -> Result<Vec<Article>, Self::Error>;
}
