//! Byline Read Service
//!
//! Thin orchestration over the content store: fills in default pagination
//! when the caller omits parameters and forwards filters unchanged. Holds
//! no state of its own.

#![warn(missing_docs)]

use byline_domain::traits::ContentStore;
use byline_domain::{Article, ArticleFilter, ContentItem, ContentKind, Page};

/// Paginated read access over any content store
///
/// Borrows the store for the duration of one request; callers decide how
/// the store handle is shared.
pub struct Reader<'a, S> {
    store: &'a S,
}

impl<'a, S: ContentStore> Reader<'a, S> {
    /// Wrap a store for reading
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// List blog posts; `None` means the first page of ten
    pub fn blogs(&self, page: Option<Page>) -> Result<Vec<ContentItem>, S::Error> {
        self.store.list(ContentKind::Blog, page.unwrap_or_default())
    }

    /// List news items; `None` means the first page of ten
    pub fn news(&self, page: Option<Page>) -> Result<Vec<ContentItem>, S::Error> {
        self.store.list(ContentKind::News, page.unwrap_or_default())
    }

    /// List articles matching the filter; `None` means the first page of ten
    pub fn articles(
        &self,
        filter: &ArticleFilter,
        page: Option<Page>,
    ) -> Result<Vec<Article>, S::Error> {
        self.store.list_articles(filter, page.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byline_domain::ContentDraft;
    use byline_store::SqliteStore;

    fn seeded_store(count: usize) -> SqliteStore {
        let mut store = SqliteStore::new(":memory:").unwrap();
        for i in 0..count {
            store
                .create(
                    ContentKind::Blog,
                    ContentDraft::new("A", format!("Post {i}"), "B", vec![]),
                )
                .unwrap();
        }
        store
    }

    #[test]
    fn test_default_page_is_first_ten() {
        let store = seeded_store(15);
        let reader = Reader::new(&store);

        let page = reader.blogs(None).unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(page[0].title, "Post 0");
        assert_eq!(page[9].title, "Post 9");
    }

    #[test]
    fn test_explicit_page_is_forwarded() {
        let store = seeded_store(15);
        let reader = Reader::new(&store);

        let page = reader.blogs(Some(Page::new(10, 10))).unwrap();
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].title, "Post 10");
    }

    #[test]
    fn test_kinds_do_not_mix() {
        let store = seeded_store(3);
        let reader = Reader::new(&store);

        assert_eq!(reader.blogs(None).unwrap().len(), 3);
        assert!(reader.news(None).unwrap().is_empty());
    }

    #[test]
    fn test_articles_default_page() {
        let store = SqliteStore::new(":memory:").unwrap();
        let reader = Reader::new(&store);

        let articles = reader.articles(&ArticleFilter::any(), None).unwrap();
        assert!(articles.is_empty());
    }
}
