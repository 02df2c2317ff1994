//! Pagination parameters
//!
//! Listing is ordered by insertion order and sliced by offset/limit. An
//! offset beyond the total yields an empty page, not an error; a zero
//! limit is meaningless and rejected by the storage layer.

/// Default page size when the caller omits a limit
pub const DEFAULT_LIMIT: u32 = 10;

/// Offset/limit window over an ordered listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Number of leading items to skip
    pub offset: u32,

    /// Maximum number of items to return (must be > 0)
    pub limit: u32,
}

impl Page {
    /// Create a page window
    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// Whether this window can ever return items
    pub fn is_valid(&self) -> bool {
        self.limit > 0
    }
}

impl Default for Page {
    /// The first page: offset 0, limit 10
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}
