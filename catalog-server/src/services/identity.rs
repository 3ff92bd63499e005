//! ID 分配
//!
//! Ids are positive integers, strictly increasing per collection and never
//! reused, even after the record holding the current maximum is deleted.
//! Callers allocate under the catalog write gate.

use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::OnceCell;

use crate::db::repository::RepoResult;

/// How new ids are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// In-process counter seeded once from the store
    #[default]
    Sequence,
    /// Re-read the store's high-water mark on every allocation
    MaxPlusOne,
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequence" | "seq" => Ok(Self::Sequence),
            "max-plus-one" | "max_plus_one" | "max" => Ok(Self::MaxPlusOne),
            other => Err(format!("unknown id strategy: {other}")),
        }
    }
}

/// Per-collection id generator
#[derive(Debug, Clone)]
pub enum IdGenerator {
    Sequence(Arc<OnceCell<AtomicI64>>),
    MaxPlusOne,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        match strategy {
            IdStrategy::Sequence => Self::Sequence(Arc::new(OnceCell::new())),
            IdStrategy::MaxPlusOne => Self::MaxPlusOne,
        }
    }

    pub fn strategy(&self) -> IdStrategy {
        match self {
            Self::Sequence(_) => IdStrategy::Sequence,
            Self::MaxPlusOne => IdStrategy::MaxPlusOne,
        }
    }

    /// Allocate the next id
    ///
    /// `high_water_mark` yields the largest id the store has ever held. It is
    /// awaited once for `Sequence` and on every call for `MaxPlusOne`.
    pub async fn next_id<F, Fut>(&self, high_water_mark: F) -> RepoResult<i64>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RepoResult<i64>>,
    {
        match self {
            Self::Sequence(cell) => {
                let counter = cell
                    .get_or_try_init(|| async move { high_water_mark().await.map(AtomicI64::new) })
                    .await?;
                Ok(counter.fetch_add(1, Ordering::SeqCst) + 1)
            }
            Self::MaxPlusOne => Ok(high_water_mark().await?.max(0) + 1),
        }
    }
}
