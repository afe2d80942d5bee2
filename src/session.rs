//! Last-submission-wins coordination of analysis runs.
//!
//! Every call to [`AnalysisSession::begin`] bumps a shared generation
//! counter. A run holds a [`RunTicket`] stamped with the generation it started
//! in; once a newer run begins the ticket goes stale, the classifier stops at
//! the next page boundary, and no verdict is delivered for the old run.

use crate::classifier::DocumentClassifier;
use crate::source::PdfSource;
use crate::verdict::Verdict;
use crate::{CheckError, ClassifierConfig, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared handle for a stream of submissions where only the latest counts.
///
/// Clones share the same generation counter, so a clone may be handed to
/// another thread that submits a newer document.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    generation: Arc<AtomicU64>,
    classifier: DocumentClassifier,
}

impl AnalysisSession {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            generation: Arc::default(),
            classifier: DocumentClassifier::new(config),
        }
    }

    /// Start a new run, invalidating every earlier ticket.
    pub fn begin(&self) -> RunTicket {
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("analysis run {id} started");
        RunTicket {
            id,
            generation: Arc::clone(&self.generation),
        }
    }

    /// Open and classify `bytes` as a new run.
    ///
    /// Returns [`CheckError::DocumentUnreadable`] when `source` cannot open
    /// the bytes, and [`CheckError::Superseded`] when another submission
    /// began before this one delivered its verdict.
    pub fn submit<S: PdfSource + ?Sized>(&self, source: &S, bytes: &[u8]) -> Result<Verdict> {
        let ticket = self.begin();
        let document = source.open(bytes).map_err(CheckError::into_unreadable)?;
        ticket.ensure_current()?;

        let verdict = self.classifier.classify_for(document.as_ref(), &ticket)?;
        ticket.ensure_current()?;
        Ok(verdict)
    }
}

/// Proof of membership in one analysis run.
#[derive(Debug, Clone)]
pub struct RunTicket {
    id: u64,
    generation: Arc<AtomicU64>,
}

impl RunTicket {
    /// Generation number of the run this ticket belongs to.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns `true` while no newer run has begun.
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.id
    }

    /// Fail with [`CheckError::Superseded`] once the ticket is stale.
    pub fn ensure_current(&self) -> Result<()> {
        if self.is_current() {
            Ok(())
        } else {
            log::debug!("analysis run {} superseded", self.id);
            Err(CheckError::Superseded)
        }
    }
}
