//! Integration tests for byline-store
//!
//! These tests verify the create/list cycle for both content kinds, the
//! get-or-create tag resolution, and the article variant.

use byline_domain::traits::{ContentStore, TagStore};
use byline_domain::{ArticleDraft, ArticleFilter, ContentDraft, ContentKind, Page};
use byline_store::{SqliteStore, StoreError};

fn draft(author: &str, title: &str, body: &str, tags: &[&str]) -> ContentDraft {
    ContentDraft::new(
        author,
        title,
        body,
        tags.iter().map(|s| s.to_string()).collect(),
    )
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_get_or_create_is_idempotent() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let first = store.get_or_create("rust").unwrap();
    let second = store.get_or_create("rust").unwrap();

    assert_eq!(first.id, second.id, "Same name should resolve to same id");
    assert_eq!(second.name, "rust");
}

#[test]
fn test_get_or_create_is_case_sensitive() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let lower = store.get_or_create("rust").unwrap();
    let upper = store.get_or_create("Rust").unwrap();

    assert_ne!(lower.id, upper.id, "Names differing by case are distinct tags");
}

#[test]
fn test_get_or_create_rejects_empty_name() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let result = store.get_or_create("");
    assert!(matches!(result, Err(StoreError::Validation(_))));
}

#[test]
fn test_create_and_read_back() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let created = store
        .create(ContentKind::Blog, draft("A", "T", "B", &["x", "y"]))
        .unwrap();

    assert_eq!(created.author, "A");
    assert_eq!(created.title, "T");
    assert_eq!(created.body, "B");
    assert_eq!(created.tags.len(), 2);

    let listed = store.list(ContentKind::Blog, Page::default()).unwrap();
    assert_eq!(listed.len(), 1);

    let item = &listed[0];
    assert_eq!(item.id, created.id);
    assert_eq!(item.author, "A");
    assert_eq!(item.title, "T");
    assert_eq!(item.body, "B");

    let names: Vec<&str> = item.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["x", "y"]);
}

#[test]
fn test_duplicate_tag_names_collapse_to_one_link() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let created = store
        .create(ContentKind::Blog, draft("A", "T", "B", &["go", "go", "rust"]))
        .unwrap();

    assert_eq!(created.tags.len(), 2, "Duplicates in the request collapse");

    let names: Vec<&str> = created.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["go", "rust"]);

    // Reading back shows the same two associations, no more
    let listed = store.list(ContentKind::Blog, Page::default()).unwrap();
    assert_eq!(listed[0].tags.len(), 2);
}

#[test]
fn test_shared_tag_has_single_row() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let first = store
        .create(ContentKind::Blog, draft("A", "T1", "B", &["shared"]))
        .unwrap();
    let second = store
        .create(ContentKind::Blog, draft("A", "T2", "B", &["shared"]))
        .unwrap();

    assert_eq!(
        first.tags[0].id, second.tags[0].id,
        "Both items should link the same tag row"
    );

    let listed = store.list(ContentKind::Blog, Page::default()).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].tags[0].id, listed[1].tags[0].id);
}

#[test]
fn test_kinds_share_tags_but_not_items() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let blog = store
        .create(ContentKind::Blog, draft("A", "Blog post", "B", &["cross"]))
        .unwrap();
    let news = store
        .create(ContentKind::News, draft("A", "News item", "B", &["cross"]))
        .unwrap();

    // One tag row serves both association tables
    assert_eq!(blog.tags[0].id, news.tags[0].id);

    // Listings stay per-kind
    let blogs = store.list(ContentKind::Blog, Page::default()).unwrap();
    let news_items = store.list(ContentKind::News, Page::default()).unwrap();
    assert_eq!(blogs.len(), 1);
    assert_eq!(news_items.len(), 1);
    assert_eq!(blogs[0].title, "Blog post");
    assert_eq!(news_items[0].title, "News item");
}

#[test]
fn test_pagination_in_creation_order() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    for i in 0..15 {
        store
            .create(
                ContentKind::News,
                draft("A", &format!("Item {i}"), "B", &[]),
            )
            .unwrap();
    }

    let first = store.list(ContentKind::News, Page::new(0, 10)).unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(first[0].title, "Item 0");
    assert_eq!(first[9].title, "Item 9");

    let second = store.list(ContentKind::News, Page::new(10, 10)).unwrap();
    assert_eq!(second.len(), 5);
    assert_eq!(second[0].title, "Item 10");
    assert_eq!(second[4].title, "Item 14");

    let beyond = store.list(ContentKind::News, Page::new(20, 10)).unwrap();
    assert!(beyond.is_empty(), "Offset beyond total yields empty page");
}

#[test]
fn test_zero_limit_is_rejected() {
    let store = SqliteStore::new(":memory:").unwrap();

    let result = store.list(ContentKind::Blog, Page::new(0, 0));
    assert!(matches!(result, Err(StoreError::Validation(_))));
}

#[test]
fn test_validation_failure_leaves_no_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("byline.db");

    {
        let mut store = SqliteStore::new(&path).unwrap();

        let result = store.create(ContentKind::Blog, draft("A", "", "B", &["ghost"]));
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    // Inspect the raw database: neither the item nor the tag may exist
    let conn = rusqlite::Connection::open(&path).unwrap();
    let blogs: i64 = conn
        .query_row("SELECT COUNT(*) FROM blogs", [], |row| row.get(0))
        .unwrap();
    let tags: i64 = conn
        .query_row("SELECT COUNT(*) FROM tags", [], |row| row.get(0))
        .unwrap();

    assert_eq!(blogs, 0);
    assert_eq!(tags, 0);
}

#[test]
fn test_empty_tag_name_is_rejected_before_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("byline.db");

    {
        let mut store = SqliteStore::new(&path).unwrap();

        let result = store.create(ContentKind::Blog, draft("A", "T", "B", &["ok", ""]));
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    let conn = rusqlite::Connection::open(&path).unwrap();
    let blogs: i64 = conn
        .query_row("SELECT COUNT(*) FROM blogs", [], |row| row.get(0))
        .unwrap();
    let tags: i64 = conn
        .query_row("SELECT COUNT(*) FROM tags", [], |row| row.get(0))
        .unwrap();

    assert_eq!(blogs, 0);
    assert_eq!(tags, 0, "No tag row survives a rejected create");
}

#[test]
fn test_new_tag_from_two_connections_has_single_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("byline.db");

    let mut store_a = SqliteStore::new(&path).unwrap();
    let mut store_b = SqliteStore::new(&path).unwrap();

    let a = store_a
        .create(ContentKind::Blog, draft("A", "T1", "B", &["newtag"]))
        .unwrap();
    let b = store_b
        .create(ContentKind::Blog, draft("A", "T2", "B", &["newtag"]))
        .unwrap();

    assert_eq!(a.tags[0].id, b.tags[0].id);

    let conn = rusqlite::Connection::open(&path).unwrap();
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM tags WHERE name = 'newtag'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1, "Exactly one tag row after both creates");

    let links: i64 = conn
        .query_row("SELECT COUNT(*) FROM blog_tags", [], |row| row.get(0))
        .unwrap();
    assert_eq!(links, 2, "Both items link the shared tag");
}

#[test]
fn test_create_article_resolves_category() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let first = store
        .create_article(ArticleDraft::new("First", "Text", "tech"))
        .unwrap();
    let second = store
        .create_article(ArticleDraft::new("Second", "Text", "tech"))
        .unwrap();

    assert_eq!(
        first.category.id, second.category.id,
        "Same category name resolves to the same row"
    );
    assert_eq!(second.category.name, "tech");
}

#[test]
fn test_article_validation() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let result = store.create_article(ArticleDraft::new("", "Text", "tech"));
    assert!(matches!(result, Err(StoreError::Validation(_))));

    let result = store.create_article(ArticleDraft::new("Title", "Text", ""));
    assert!(matches!(result, Err(StoreError::Validation(_))));
}

#[test]
fn test_list_articles_by_category() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    store
        .create_article(ArticleDraft::new("Alpha", "About compilers", "tech"))
        .unwrap();
    store
        .create_article(ArticleDraft::new("Beta", "About gardens", "life"))
        .unwrap();
    store
        .create_article(ArticleDraft::new("Gamma", "About parsers", "tech"))
        .unwrap();

    let tech = store
        .list_articles(&ArticleFilter::by_category("tech"), Page::default())
        .unwrap();

    assert_eq!(tech.len(), 2);
    assert_eq!(tech[0].title, "Alpha");
    assert_eq!(tech[1].title, "Gamma");
}

#[test]
fn test_list_articles_by_search() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    store
        .create_article(ArticleDraft::new("Rust notes", "Ownership rules", "tech"))
        .unwrap();
    store
        .create_article(ArticleDraft::new("Cooking", "Slow rust removal", "life"))
        .unwrap();
    store
        .create_article(ArticleDraft::new("Go notes", "Goroutines", "tech"))
        .unwrap();

    // Substring match across title and content, case-insensitive
    let hits = store
        .list_articles(&ArticleFilter::by_search("rust"), Page::default())
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "Rust notes");
    assert_eq!(hits[1].title, "Cooking");
}

#[test]
fn test_list_articles_combined_filters() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    store
        .create_article(ArticleDraft::new("Rust notes", "Ownership", "tech"))
        .unwrap();
    store
        .create_article(ArticleDraft::new("Rust recipes", "Cast iron care", "life"))
        .unwrap();

    let filter = ArticleFilter {
        category: Some("tech".to_string()),
        search: Some("rust".to_string()),
    };

    let hits = store.list_articles(&filter, Page::default()).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Rust notes");
}

#[test]
fn test_list_articles_pagination() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    for i in 0..12 {
        store
            .create_article(ArticleDraft::new(format!("Article {i}"), "Text", "tech"))
            .unwrap();
    }

    let first = store
        .list_articles(&ArticleFilter::any(), Page::new(0, 10))
        .unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(first[0].title, "Article 0");

    let rest = store
        .list_articles(&ArticleFilter::any(), Page::new(10, 10))
        .unwrap();
    assert_eq!(rest.len(), 2);
    assert_eq!(rest[1].title, "Article 11");
}
