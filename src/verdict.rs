use crate::signal::DocumentSignals;
use serde::Serialize;
use std::fmt;

/// Reason given when at least one page carries real text objects.
pub const REASON_TEXT: &str = "Text elements detected";
/// Reason given when no page carries real text objects.
pub const REASON_NO_TEXT: &str = "No true text objects found";
/// Reason given when structural layers were found.
pub const REASON_STRUCTURE: &str = "Likely structured layers present";
/// Reason given when no structural layers were found.
pub const REASON_NO_STRUCTURE: &str = "No organized layer structure detected";

// ── Status ────────────────────────────────────────────────────────────────────

/// Overall suitability of a document for vector-graphics processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Good,
    Bad,
}

impl Status {
    pub fn is_good(self) -> bool {
        self == Status::Good
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Good => "Good",
            Status::Bad => "Bad",
        })
    }
}

// ── Verdict ───────────────────────────────────────────────────────────────────

/// The classification of one document: a status and two ordered reasons.
///
/// A verdict can only be built from finished [`DocumentSignals`], which keeps
/// the status and reasons consistent with each other:
///
/// - `status` is [`Status::Good`] exactly when both signals are `true`;
/// - `reasons[0]` explains the text signal, `reasons[1]` the structure signal.
///
/// ```
/// use vectorcheck::{DocumentSignals, Status, Verdict};
///
/// let verdict = Verdict::from_signals(DocumentSignals { has_text: true, has_structure: false });
/// assert_eq!(verdict.status(), Status::Bad);
/// assert_eq!(verdict.reasons(), &["Text elements detected", "No organized layer structure detected"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    status: Status,
    reasons: [String; 2],
    #[serde(skip)]
    signals: DocumentSignals,
}

impl Verdict {
    /// Derive the verdict for a finished set of document signals.
    pub fn from_signals(signals: DocumentSignals) -> Self {
        let status = if signals.has_text && signals.has_structure {
            Status::Good
        } else {
            Status::Bad
        };

        let text_reason = if signals.has_text {
            REASON_TEXT
        } else {
            REASON_NO_TEXT
        };
        let structure_reason = if signals.has_structure {
            REASON_STRUCTURE
        } else {
            REASON_NO_STRUCTURE
        };

        Self {
            status,
            reasons: [text_reason.to_owned(), structure_reason.to_owned()],
            signals,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// The text reason followed by the structure reason.
    pub fn reasons(&self) -> &[String; 2] {
        &self.reasons
    }

    /// The signals this verdict was derived from.
    pub fn signals(&self) -> DocumentSignals {
        self.signals
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Result: {}", self.status)?;
        for reason in &self.reasons {
            writeln!(f, "  - {reason}")?;
        }
        Ok(())
    }
}
