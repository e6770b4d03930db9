use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::model::store::{Error, Result, Row, RowStore, SheetRange};

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Row>>,
    failure: Mutex<Option<Error>>,
    reads: AtomicUsize,
    appends: AtomicUsize,
    updates: AtomicUsize,
    write_log: Mutex<Vec<&'static str>>,
    gate: Mutex<Option<FetchGate>>,
}

/// Parks the next `fetch_rows` until the test releases it.
pub struct FetchGate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl MemoryStore {
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    /// Every following call fails with `err`.
    pub fn fail_with(&self, err: Error) {
        *self.failure.lock().unwrap() = Some(err);
    }

    /// The next fetch signals `entered` once it starts and waits for `release`.
    pub fn hold_next_fetch(&self) -> FetchGate {
        let gate = FetchGate {
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        };
        *self.gate.lock().unwrap() = Some(FetchGate {
            entered: gate.entered.clone(),
            release: gate.release.clone(),
        });
        gate
    }

    /// Write calls in the order they reached the store.
    pub fn write_log(&self) -> Vec<&'static str> {
        self.write_log.lock().unwrap().clone()
    }

    pub fn rows(&self) -> Vec<Row> {
        self.rows.lock().unwrap().clone()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.appends.load(Ordering::SeqCst) + self.updates.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.reads() + self.writes()
    }

    fn check_failure(&self) -> Result<()> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RowStore for MemoryStore {
    async fn fetch_rows(&self, _range: &SheetRange) -> Result<Vec<Row>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.check_failure()?;
        Ok(self.rows())
    }

    async fn append_row(&self, _range: &SheetRange, row: Row) -> Result<()> {
        self.appends.fetch_add(1, Ordering::SeqCst);
        self.write_log.lock().unwrap().push("append");
        self.check_failure()?;
        self.rows.lock().unwrap().push(row);
        Ok(())
    }

    async fn update_row(&self, _range: &SheetRange, row_index: usize, row: Row) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.write_log.lock().unwrap().push("update");
        self.check_failure()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.len() <= row_index {
            rows.resize(row_index + 1, Vec::new());
        }
        rows[row_index] = row;
        Ok(())
    }
}
