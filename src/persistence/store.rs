// * Draw Store: the only shared mutable resource in the pipeline. Writes
// * are keyed by (lottery, date) and always replace the whole record, so
// * last-writer-wins is safe without any in-core locking beyond the map.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::config::lotteries::LotteryId;
use crate::persistence::schema::DrawResult;

type AsyncResult<T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send>>;

type DrawMap = BTreeMap<(LotteryId, NaiveDate), DrawResult>;

/// Errors surfaced by store implementations. Store failure is the one
/// condition fatal to a single lottery's run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O failure: {0}")]
    Io(String),

    #[error("Storage serialization failure: {0}")]
    Serialization(String),
}

/// Storage contract consumed by the pipeline.
pub trait DrawStore: Send + Sync {
    /// Inserts or fully replaces the record for the draw's `(lottery, date)`.
    fn upsert(&self, draw: DrawResult) -> AsyncResult<()>;

    /// Full history for one lottery, oldest date first.
    fn query_history(&self, lottery_id: LotteryId) -> AsyncResult<Vec<DrawResult>>;
}

impl<T: DrawStore + ?Sized> DrawStore for Arc<T> {
    fn upsert(&self, draw: DrawResult) -> AsyncResult<()> {
        (**self).upsert(draw)
    }

    fn query_history(&self, lottery_id: LotteryId) -> AsyncResult<Vec<DrawResult>> {
        (**self).query_history(lottery_id)
    }
}

// * Whole-lottery range in the keyed map
fn lottery_range(lottery_id: LotteryId) -> impl std::ops::RangeBounds<(LotteryId, NaiveDate)> {
    (lottery_id, NaiveDate::MIN)..=(lottery_id, NaiveDate::MAX)
}

/// In-memory store. The date-ordered map gives `query_history` its
/// oldest-first contract for free.
#[derive(Default)]
pub struct MemoryDrawStore {
    draws: Arc<RwLock<DrawMap>>,
}

impl MemoryDrawStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.draws.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DrawStore for MemoryDrawStore {
    fn upsert(&self, draw: DrawResult) -> AsyncResult<()> {
        let mut draws = self.draws.write().unwrap();
        draws.insert(draw.key(), draw);
        Box::pin(async { Ok(()) })
    }

    fn query_history(&self, lottery_id: LotteryId) -> AsyncResult<Vec<DrawResult>> {
        let draws = self.draws.read().unwrap();
        let history: Vec<DrawResult> = draws.range(lottery_range(lottery_id)).map(|(_, d)| d.clone()).collect();
        Box::pin(async move { Ok(history) })
    }
}

/// File-backed store: one JSON document holding every draw, rewritten
/// atomically (write-temp-then-rename) on each upsert. Built for batch
/// cadence and small histories, not high write volume.
pub struct JsonFileDrawStore {
    path: PathBuf,
    draws: Arc<RwLock<DrawMap>>,
}

impl JsonFileDrawStore {
    /// Opens the store, loading any existing snapshot at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let mut draws = DrawMap::new();

        if path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(|e| StoreError::Io(e.to_string()))?;
            let records: Vec<DrawResult> =
                serde_json::from_str(&raw).map_err(|e| StoreError::Serialization(e.to_string()))?;
            for record in records {
                draws.insert(record.key(), record);
            }
        }

        debug!(path = %path.display(), loaded = draws.len(), "draw store opened");
        Ok(Self {
            path,
            draws: Arc::new(RwLock::new(draws)),
        })
    }

    fn flush(path: &Path, draws: &DrawMap) -> Result<(), StoreError> {
        let records: Vec<&DrawResult> = draws.values().collect();
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        // * Never leave a half-written snapshot behind
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, json).map_err(|e| StoreError::Io(e.to_string()))?;
        std::fs::rename(&tmp, path).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }
}

impl DrawStore for JsonFileDrawStore {
    fn upsert(&self, draw: DrawResult) -> AsyncResult<()> {
        let path = self.path.clone();
        let draws = Arc::clone(&self.draws);

        Box::pin(async move {
            let mut guard = draws.write().unwrap();
            guard.insert(draw.key(), draw);
            Self::flush(&path, &guard)
        })
    }

    fn query_history(&self, lottery_id: LotteryId) -> AsyncResult<Vec<DrawResult>> {
        let draws = Arc::clone(&self.draws);

        Box::pin(async move {
            let guard = draws.read().unwrap();
            Ok(guard.range(lottery_range(lottery_id)).map(|(_, d)| d.clone()).collect())
        })
    }
}
