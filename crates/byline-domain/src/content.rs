//! Content module - blog posts and news articles
//!
//! The two content kinds are structurally identical and share the tag
//! entity through independent association sets. A single parametrized
//! repository path handles both; the kind acts as a discriminator.

use crate::tag::Tag;
use std::fmt;

/// Unique identifier for a content item (blog or news)
///
/// Wraps the storage rowid, so identifier order is insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentId(i64);

impl ContentId {
    /// Create a ContentId from a raw rowid value
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw rowid value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discriminator for the two parallel content kinds
///
/// Blogs and news items have identical shapes but independent identity
/// spaces and independent tag association sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// A blog post
    Blog,
    /// A news article
    News,
}

impl ContentKind {
    /// Stable lowercase name, used for logging and route labels
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Blog => "blog",
            ContentKind::News => "news",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted content item with its tag set materialized
///
/// Items are immutable after creation; there are no update or delete
/// operations in this core.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    /// Unique identifier within the item's kind
    pub id: ContentId,

    /// Which of the two content kinds this item belongs to
    pub kind: ContentKind,

    /// Author name
    pub author: String,

    /// Title
    pub title: String,

    /// Body text
    pub body: String,

    /// Associated tags, in first-association order, with no duplicates
    pub tags: Vec<Tag>,
}

/// Input for creating a content item
///
/// Tag names are carried as written by the caller; duplicates collapse to
/// a single association when the item is created.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDraft {
    /// Author name (required non-empty)
    pub author: String,

    /// Title (required non-empty)
    pub title: String,

    /// Body text (required non-empty)
    pub body: String,

    /// Requested tag names; an ordered sequence, not a set
    pub tags: Vec<String>,
}

impl ContentDraft {
    /// Create a draft from its parts
    pub fn new(
        author: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            author: author.into(),
            title: title.into(),
            body: body.into(),
            tags,
        }
    }

    /// Name of the first required scalar field that is empty, if any
    ///
    /// Validation is reported before any write happens, so a rejected draft
    /// leaves no rows behind.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.author.is_empty() {
            Some("author")
        } else if self.title.is_empty() {
            Some("title")
        } else if self.body.is_empty() {
            Some("body")
        } else {
            None
        }
    }

    /// Requested tag names with duplicates collapsed, first mention wins
    ///
    /// The association between an item and a tag is a set, not a sequence;
    /// multiplicity in the request must not produce multiple links.
    pub fn distinct_tags(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.tags.len());
        for name in &self.tags {
            if !seen.contains(&name.as_str()) {
                seen.push(name.as_str());
            }
        }
        seen
    }
}
