//! Provider batch-size windows

/// Maximum entries per key-value bulk write
pub const BULK_WRITE_LIMIT: usize = 25;

/// Maximum entries per queue bulk delete
pub const BULK_DELETE_LIMIT: usize = 10;

/// Partition `items` into ordered windows of at most `limit` entries.
///
/// Never yields an empty window; only the last window may be short.
///
/// # Panics
///
/// Panics if `limit` is zero.
pub fn chunk<T>(items: Vec<T>, limit: usize) -> Vec<Vec<T>> {
    assert!(limit >= 1, "chunk limit must be at least 1");

    let mut chunks = Vec::with_capacity(items.len().div_ceil(limit));
    let mut current = Vec::with_capacity(limit.min(items.len()));

    for item in items {
        current.push(item);
        if current.len() == limit {
            chunks.push(std::mem::replace(
                &mut current,
                Vec::with_capacity(limit),
            ));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
