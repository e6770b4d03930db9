
pub mod attendee;
mod error;
pub mod store;

use std::sync::Arc;

use store::{RowStore, SheetRange};
use tokio::sync::{Mutex, MutexGuard};

pub use self::error::{Error, Result};

/// Shared handle to the attendee sheet.
///
/// Writes go through `lock_writes` so that a check-in's read-modify-write
/// cannot interleave with another write issued by this process.
#[derive(Clone)]
pub struct ModelManager {
    store: Arc<dyn RowStore>,
    range: SheetRange,
    writes: Arc<Mutex<()>>,
}

impl ModelManager {
    pub fn new(store: Arc<dyn RowStore>, range: SheetRange) -> Self {
        ModelManager {
            store,
            range,
            writes: Arc::new(Mutex::new(())),
        }
    }

    pub(in crate::model) fn store(&self) -> &dyn RowStore {
        self.store.as_ref()
    }

    pub(in crate::model) fn range(&self) -> &SheetRange {
        &self.range
    }

    pub(in crate::model) async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.writes.lock().await
    }
}
