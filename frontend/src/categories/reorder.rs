use crate::error::ProfileError;
use crate::models::{Category, CategoryType};

use super::{CategoryBook, CategorySyncClient};

/// Relocate one element: remove at `from`, reinsert at `to`.
///
/// Returns `None` when the move is a no-op or either index is out of range.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Option<Vec<T>> {
    if from == to || from >= items.len() || to >= items.len() {
        return None;
    }
    let mut next = items.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    Some(next)
}

#[derive(Clone, Debug, PartialEq)]
pub enum ReorderOutcome {
    Persisted(Vec<Category>),
    /// The new order is shown locally but the server did not store it.
    NotPersisted {
        order: Vec<Category>,
        error: ProfileError,
    },
}

/// Turns a finished drag gesture into a reordered list and persists it.
/// The caller shows the new order before persisting; a failed persist does
/// not roll it back.
#[derive(Clone, PartialEq)]
pub struct DragReorderController {
    client: CategorySyncClient,
}

impl DragReorderController {
    pub fn new(client: CategorySyncClient) -> Self {
        Self { client }
    }

    pub fn plan(
        book: &CategoryBook,
        kind: CategoryType,
        source: usize,
        destination: Option<usize>,
    ) -> Option<Vec<Category>> {
        let destination = destination?;
        let next = move_item(book.list(kind), source, destination)?;
        tracing::debug!(kind = kind.as_str(), source, destination, "category moved");
        Some(next)
    }

    pub async fn persist(&self, kind: CategoryType, order: Vec<Category>) -> ReorderOutcome {
        match self.client.update_order(kind, &order).await {
            Ok(_) => ReorderOutcome::Persisted(order),
            Err(error) => {
                tracing::warn!(kind = kind.as_str(), error = %error, "category order not saved");
                ReorderOutcome::NotPersisted { order, error }
            }
        }
    }
}
