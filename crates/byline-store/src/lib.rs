//! Byline Storage Layer
//!
//! Implements the TagStore and ContentStore traits on SQLite.
//!
//! # Architecture
//!
//! - One table per content kind (blogs, news) plus a shared tags table
//! - Association tables hold pure FK pairs with composite primary keys
//! - Every multi-step create runs inside one scoped transaction; the
//!   transaction rolls back on drop, so no failure path leaves partial
//!   rows visible
//! - Name uniqueness for tags and categories is a storage constraint; a
//!   lost creation race is healed by a single re-fetch
//!
//! # Examples
//!
//! ```no_run
//! use byline_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for content operations
//! ```

#![warn(missing_docs)]

use byline_domain::traits::{ContentStore, TagStore};
use byline_domain::{
    Article, ArticleDraft, ArticleFilter, ArticleId, Category, CategoryId, ContentDraft,
    ContentId, ContentItem, ContentKind, Page, Tag, TagId,
};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Malformed or missing required input, detected before any write
    #[error("Validation error: {0}")]
    Validation(String),

    /// A uniqueness race that the single internal retry could not resolve
    #[error("Uniqueness conflict on name '{0}' could not be resolved")]
    Conflict(String),
}

/// SQLite-based implementation of TagStore and ContentStore
///
/// The store owns its connection and applies the schema on open. Use
/// `:memory:` for an in-memory database (useful for testing).
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Callers that share one store
/// across threads must wrap it in a mutex and acquire it per request.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use byline_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("byline.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Item table, association table, and FK column for a content kind
    fn kind_tables(kind: ContentKind) -> (&'static str, &'static str, &'static str) {
        match kind {
            ContentKind::Blog => ("blogs", "blog_tags", "blog_id"),
            ContentKind::News => ("news", "news_tags", "news_id"),
        }
    }

    /// Look up a named row (tags or categories) by exact name
    fn lookup_named(
        conn: &Connection,
        table: &str,
        name: &str,
    ) -> Result<Option<(i64, String)>, rusqlite::Error> {
        conn.query_row(
            &format!("SELECT id, name FROM {table} WHERE name = ?1"),
            params![name],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()
    }

    /// Resolve a name to its row in a unique-name table, inserting if absent
    ///
    /// Two concurrent resolutions of the same new name may both observe
    /// "not found" and both attempt the insert; the UNIQUE constraint
    /// rejects the loser, which then re-fetches the now-existing row.
    /// Bounded to that one retry.
    fn resolve_named(
        tx: &Transaction<'_>,
        table: &str,
        name: &str,
    ) -> Result<(i64, String), StoreError> {
        if let Some(found) = Self::lookup_named(tx, table, name)? {
            return Ok(found);
        }

        match tx.execute(
            &format!("INSERT INTO {table} (name) VALUES (?1)"),
            params![name],
        ) {
            Ok(_) => Ok((tx.last_insert_rowid(), name.to_string())),
            Err(e) if is_unique_violation(&e) => Self::lookup_named(tx, table, name)?
                .ok_or_else(|| StoreError::Conflict(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Materialize the tag set for one item, in first-association order
    fn tags_for(&self, kind: ContentKind, id: ContentId) -> Result<Vec<Tag>, StoreError> {
        let (_, links, fk) = Self::kind_tables(kind);

        let mut stmt = self.conn.prepare(&format!(
            "SELECT t.id, t.name FROM tags t
             JOIN {links} l ON l.tag_id = t.id
             WHERE l.{fk} = ?1
             ORDER BY l.rowid"
        ))?;

        let tags = stmt
            .query_map(params![id.value()], |row| {
                Ok(Tag {
                    id: TagId::new(row.get(0)?),
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tags)
    }
}

/// Whether an error is a UNIQUE constraint rejection
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

impl TagStore for SqliteStore {
    type Error = StoreError;

    fn get_or_create(&mut self, name: &str) -> Result<Tag, Self::Error> {
        if name.is_empty() {
            return Err(StoreError::Validation(
                "tag name must not be empty".to_string(),
            ));
        }

        let tx = self.conn.transaction()?;
        let (id, name) = Self::resolve_named(&tx, "tags", name)?;
        tx.commit()?;

        Ok(Tag {
            id: TagId::new(id),
            name,
        })
    }
}

impl ContentStore for SqliteStore {
    type Error = StoreError;

    fn create(
        &mut self,
        kind: ContentKind,
        draft: ContentDraft,
    ) -> Result<ContentItem, Self::Error> {
        if let Some(field) = draft.missing_field() {
            return Err(StoreError::Validation(format!(
                "{field} must not be empty"
            )));
        }
        if draft.tags.iter().any(|name| name.is_empty()) {
            return Err(StoreError::Validation(
                "tag names must not be empty".to_string(),
            ));
        }

        let (items, links, fk) = Self::kind_tables(kind);

        // One transaction spans the item insert and every tag resolution
        // and link; it rolls back on drop if any step fails.
        let tx = self.conn.transaction()?;

        tx.execute(
            &format!("INSERT INTO {items} (author, title, body) VALUES (?1, ?2, ?3)"),
            params![&draft.author, &draft.title, &draft.body],
        )?;
        let item_id = tx.last_insert_rowid();

        let mut tags = Vec::new();
        for name in draft.distinct_tags() {
            let (tag_id, tag_name) = Self::resolve_named(&tx, "tags", name)?;

            // The composite primary key makes the link idempotent even if
            // the same pair is requested again.
            tx.execute(
                &format!("INSERT OR IGNORE INTO {links} ({fk}, tag_id) VALUES (?1, ?2)"),
                params![item_id, tag_id],
            )?;

            tags.push(Tag {
                id: TagId::new(tag_id),
                name: tag_name,
            });
        }

        tx.commit()?;

        Ok(ContentItem {
            id: ContentId::new(item_id),
            kind,
            author: draft.author,
            title: draft.title,
            body: draft.body,
            tags,
        })
    }

    fn list(&self, kind: ContentKind, page: Page) -> Result<Vec<ContentItem>, Self::Error> {
        if !page.is_valid() {
            return Err(StoreError::Validation(
                "limit must be greater than zero".to_string(),
            ));
        }

        let (items, _, _) = Self::kind_tables(kind);

        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, author, title, body FROM {items}
             ORDER BY id
             LIMIT ?1 OFFSET ?2"
        ))?;

        let rows = stmt
            .query_map(params![page.limit, page.offset], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut result = Vec::with_capacity(rows.len());
        for (id, author, title, body) in rows {
            let id = ContentId::new(id);
            result.push(ContentItem {
                id,
                kind,
                author,
                title,
                body,
                tags: self.tags_for(kind, id)?,
            });
        }

        Ok(result)
    }

    fn create_article(&mut self, draft: ArticleDraft) -> Result<Article, Self::Error> {
        if let Some(field) = draft.missing_field() {
            return Err(StoreError::Validation(format!(
                "{field} must not be empty"
            )));
        }

        let tx = self.conn.transaction()?;

        let (category_id, category_name) =
            Self::resolve_named(&tx, "categories", &draft.category)?;

        tx.execute(
            "INSERT INTO articles (title, content, category_id) VALUES (?1, ?2, ?3)",
            params![&draft.title, &draft.content, category_id],
        )?;
        let article_id = tx.last_insert_rowid();

        tx.commit()?;

        Ok(Article {
            id: ArticleId::new(article_id),
            title: draft.title,
            content: draft.content,
            category: Category {
                id: CategoryId::new(category_id),
                name: category_name,
            },
        })
    }

    fn list_articles(
        &self,
        filter: &ArticleFilter,
        page: Page,
    ) -> Result<Vec<Article>, Self::Error> {
        if !page.is_valid() {
            return Err(StoreError::Validation(
                "limit must be greater than zero".to_string(),
            ));
        }

        let mut sql = String::from(
            "SELECT a.id, a.title, a.content, c.id, c.name
             FROM articles a
             JOIN categories c ON c.id = a.category_id
             WHERE 1=1",
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(category) = &filter.category {
            sql.push_str(" AND c.name = ?");
            params.push(Box::new(category.clone()));
        }

        if let Some(search) = &filter.search {
            sql.push_str(" AND (a.title LIKE ? OR a.content LIKE ?)");
            let pattern = format!("%{}%", search);
            params.push(Box::new(pattern.clone()));
            params.push(Box::new(pattern));
        }

        sql.push_str(" ORDER BY a.id LIMIT ? OFFSET ?");
        params.push(Box::new(page.limit));
        params.push(Box::new(page.offset));

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let articles = stmt
            .query_map(&param_refs[..], |row| {
                Ok(Article {
                    id: ArticleId::new(row.get(0)?),
                    title: row.get(1)?,
                    content: row.get(2)?,
                    category: Category {
                        id: CategoryId::new(row.get(3)?),
                        name: row.get(4)?,
                    },
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_predicate() {
        let store = SqliteStore::new(":memory:").unwrap();
        store
            .conn
            .execute("INSERT INTO tags (name) VALUES ('x')", [])
            .unwrap();

        let err = store
            .conn
            .execute("INSERT INTO tags (name) VALUES ('x')", [])
            .unwrap_err();

        assert!(is_unique_violation(&err));
    }

    #[test]
    fn test_resolve_named_reuses_existing_row() {
        let mut store = SqliteStore::new(":memory:").unwrap();

        store
            .conn
            .execute("INSERT INTO tags (name) VALUES ('raced')", [])
            .unwrap();

        let tx = store.conn.transaction().unwrap();
        let (id, name) = SqliteStore::resolve_named(&tx, "tags", "raced").unwrap();
        tx.commit().unwrap();

        assert_eq!(name, "raced");

        let count: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM tags WHERE name = 'raced'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
        assert!(id > 0);
    }
}
