
mod dev_store;

use std::sync::Arc;

pub use dev_store::MemoryStore;

use crate::model::{store::SheetRange, ModelManager};

pub const HEADER: [&str; 5] = ["Name", "Phone", "Email", "Company", "Status"];

pub fn test_range() -> SheetRange {
    SheetRange {
        sheet: "Sheet1".to_string(),
        first_column: "A".to_string(),
        last_column: "E".to_string(),
    }
}

/// A model manager over a fresh in-memory sheet holding only the header row.
pub fn init_test() -> (ModelManager, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_rows(vec![row(&HEADER)]));
    let mm = ModelManager::new(store.clone(), test_range());
    (mm, store)
}

pub fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}
