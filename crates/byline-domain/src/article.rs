//! Article module - the parallel content-modeling variant
//!
//! Articles carry a category instead of a tag set. The category is a
//! unique-name lookup entity resolved with the same get-or-create pattern
//! as tags, so the variant shares the core's deduplication machinery.

use std::fmt;

/// Unique identifier for an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArticleId(i64);

impl ArticleId {
    /// Create an ArticleId from a raw rowid value
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw rowid value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryId(i64);

impl CategoryId {
    /// Create a CategoryId from a raw rowid value
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw rowid value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category - unique by name, shared across articles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name, compared as an exact string
    pub name: String,
}

impl Category {
    /// Create a new category value
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A persisted article with its category materialized
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Unique identifier
    pub id: ArticleId,

    /// Title
    pub title: String,

    /// Body text
    pub content: String,

    /// The article's category
    pub category: Category,
}

/// Input for creating an article
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleDraft {
    /// Title (required non-empty)
    pub title: String,

    /// Body text (required non-empty)
    pub content: String,

    /// Category name, resolved to an existing category or created
    pub category: String,
}

impl ArticleDraft {
    /// Create a draft from its parts
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: category.into(),
        }
    }

    /// Name of the first required field that is empty, if any
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.title.is_empty() {
            Some("title")
        } else if self.content.is_empty() {
            Some("content")
        } else if self.category.is_empty() {
            Some("category")
        } else {
            None
        }
    }
}

/// Listing filter for articles
///
/// Both filters are optional and combinable. Category matching is exact;
/// search is a case-insensitive substring match across title and content,
/// with no ranking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleFilter {
    /// Exact category name to filter by
    pub category: Option<String>,

    /// Free-text fragment searched in title and content
    pub search: Option<String>,
}

impl ArticleFilter {
    /// Filter that matches everything
    pub fn any() -> Self {
        Self::default()
    }

    /// Restrict to one category
    pub fn by_category(name: impl Into<String>) -> Self {
        Self {
            category: Some(name.into()),
            search: None,
        }
    }

    /// Restrict to items containing the fragment in title or content
    pub fn by_search(fragment: impl Into<String>) -> Self {
        Self {
            category: None,
            search: Some(fragment.into()),
        }
    }
}
