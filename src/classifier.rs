use crate::session::RunTicket;
use crate::signal::{extract_page_signal, DocumentSignals};
use crate::source::DocumentHandle;
use crate::verdict::Verdict;
use crate::{CheckError, ClassifierConfig, Result};

// ── DocumentClassifier ────────────────────────────────────────────────────────

/// Turns a parsed document into a [`Verdict`].
///
/// Pages are visited one at a time in order `1..=N`, each page's signal is
/// folded into the running [`DocumentSignals`], and the verdict is derived
/// from the finished snapshot.
///
/// ```no_run
/// use vectorcheck::{DocumentClassifier, LopdfSource, PdfSource};
///
/// # fn main() -> vectorcheck::Result<()> {
/// let bytes = std::fs::read("drawing.pdf")?;
/// let document = LopdfSource.open(&bytes)?;
/// let verdict = DocumentClassifier::default().classify(document.as_ref())?;
/// println!("{verdict}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentClassifier {
    config: ClassifierConfig,
}

impl DocumentClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify `document`.
    ///
    /// Fails with [`CheckError::DocumentUnreadable`] when the document has no
    /// pages. Individual unreadable pages never fail the run.
    pub fn classify(&self, document: &dyn DocumentHandle) -> Result<Verdict> {
        self.signals(document).map(Self::verdict_for)
    }

    /// Like [`classify`](Self::classify), but stops at the next page boundary
    /// with [`CheckError::Superseded`] once `ticket` is no longer current.
    pub fn classify_for(
        &self,
        document: &dyn DocumentHandle,
        ticket: &RunTicket,
    ) -> Result<Verdict> {
        self.accumulate(document, Some(ticket)).map(Self::verdict_for)
    }

    /// Compute the document-level signals without deriving a verdict.
    pub fn signals(&self, document: &dyn DocumentHandle) -> Result<DocumentSignals> {
        self.accumulate(document, None)
    }

    fn verdict_for(signals: DocumentSignals) -> Verdict {
        let verdict = Verdict::from_signals(signals);
        log::info!(
            "verdict {} (text={}, structure={})",
            verdict.status(),
            signals.has_text,
            signals.has_structure
        );
        verdict
    }

    fn accumulate(
        &self,
        document: &dyn DocumentHandle,
        ticket: Option<&RunTicket>,
    ) -> Result<DocumentSignals> {
        let page_count = document.page_count();
        if page_count == 0 {
            return Err(CheckError::DocumentUnreadable("document has no pages".into()));
        }

        let heuristic = self.config.structure_heuristic;
        (1..=page_count).try_fold(DocumentSignals::default(), |signals, index| -> Result<_> {
            if self.config.short_circuit && signals.is_settled() {
                log::debug!("page {index}: skipped, verdict already settled");
                return Ok(signals);
            }
            if let Some(ticket) = ticket {
                ticket.ensure_current()?;
            }
            Ok(signals.absorb(extract_page_signal(document, index, heuristic)))
        })
    }
}
