use tokio::sync::RwLock;

use crate::errors::ServiceError;

/// A row that lives in a [`MemoryStore`] and gets its id from the store.
pub trait Record: Clone + Send + Sync {
    /// Client-supplied fields, without an id.
    type Draft: Send;

    /// Name used in not-found messages.
    const KIND: &'static str;

    fn id(&self) -> i64;
    fn from_draft(id: i64, draft: Self::Draft) -> Self;
}

struct Inner<T> {
    rows: Vec<T>,
    next_id: i64,
}

/// Process-lifetime collection with a private id counter.
///
/// The rows and the counter sit behind one `RwLock`: `list` takes it shared,
/// `create` and `delete` take it exclusively, so mutations are totally
/// ordered and readers never see half of one.
pub struct MemoryStore<T> {
    inner: RwLock<Inner<T>>,
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::seeded(Vec::new())
    }
}

impl<T: Record> MemoryStore<T> {
    /// Start from `rows`; new ids begin one past the largest seed id.
    pub fn seeded(rows: Vec<T>) -> Self {
        let next_id = rows.iter().map(|r| r.id()).max().unwrap_or(0) + 1;
        Self { inner: RwLock::new(Inner { rows, next_id }) }
    }

    /// Snapshot in insertion order.
    pub async fn list(&self) -> Vec<T> {
        let inner = self.inner.read().await;
        inner.rows.clone()
    }

    pub async fn create(&self, draft: T::Draft) -> T {
        let mut inner = self.inner.write().await;
        let row = T::from_draft(inner.next_id, draft);
        inner.next_id += 1;
        inner.rows.push(row.clone());
        row
    }

    /// Remove the first row with `id`. Linear scan; the collections are small.
    pub async fn delete(&self, id: i64) -> Result<T, ServiceError> {
        let mut inner = self.inner.write().await;
        let pos = inner
            .rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| ServiceError::not_found(T::KIND))?;
        Ok(inner.rows.remove(pos))
    }
}
