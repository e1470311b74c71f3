// crates/citytz-core/src/dataset.rs
use crate::common::DbStats;
use crate::error::DataLoadError;
use crate::loader::{DataSource, InMemory};
use crate::model::Record;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

type LoadOutcome = Result<Arc<[Record]>, DataLoadError>;

/// The immutable record sequence, loaded at most once.
///
/// The first caller of [`Dataset::load`] runs the source; concurrent callers
/// block until it finishes. Success and failure are both remembered: a
/// failed load hands the same error to every later caller and the source
/// is never invoked again.
pub struct Dataset {
    source: Box<dyn DataSource>,
    outcome: OnceCell<LoadOutcome>,
}

impl Dataset {
    pub fn new(source: impl DataSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            outcome: OnceCell::new(),
        }
    }

    /// A dataset that is already loaded.
    ///
    /// The records go straight into the cell; the source left behind is
    /// empty and never consulted.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            source: Box::new(InMemory::default()),
            outcome: OnceCell::with_value(Ok(Arc::from(records))),
        }
    }

    pub fn load(&self) -> LoadOutcome {
        self.outcome.get_or_init(|| self.load_once()).clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.outcome.get().is_some()
    }

    pub fn stats(&self) -> Result<DbStats, DataLoadError> {
        self.load().map(|records| DbStats::from_records(&records))
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }

    fn load_once(&self) -> LoadOutcome {
        let started = Instant::now();
        match self.source.load() {
            Ok(records) => {
                info!(
                    records = records.len(),
                    source = %self.source.describe(),
                    elapsed = ?started.elapsed(),
                    "city dataset loaded"
                );
                Ok(Arc::from(records))
            }
            Err(err) => {
                warn!(
                    source = %self.source.describe(),
                    error = %err,
                    "city dataset failed to load; the failure is final"
                );
                Err(err)
            }
        }
    }
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("source", &self.source.describe())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
