//! # vectorcheck
//!
//! A Rust library that decides whether a PDF is a good candidate for
//! vector-graphics processing.
//!
//! ## What this crate does
//!
//! 1. **Detect real text**: decodes every page content stream, including
//!    the form XObjects it paints, and looks for text-showing operators, so
//!    scanned or flattened pages are told apart from pages that carry
//!    genuine text objects.
//! 2. **Detect structural layers**: looks for a tagged structure tree, page
//!    tree references and (optionally) optional content groups.
//! 3. **Classify**: folds the per-page signals into a document verdict,
//!    `Good` or `Bad`, with exactly two human-readable reasons.
//!
//! The PDF parser is a collaborator behind the [`PdfSource`],
//! [`DocumentHandle`] and [`PageHandle`] traits. [`LopdfSource`] is the
//! default implementation.
//!
//! ## Quick example
//!
//! ```no_run
//! use vectorcheck::{PdfAnalyzer, Status};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = PdfAnalyzer::from_path("drawing.pdf")?;
//! let verdict = analyzer.classify()?;
//!
//! println!("Result: {}", verdict.status());
//! for reason in verdict.reasons() {
//!     println!("  - {reason}");
//! }
//! assert!(matches!(verdict.status(), Status::Good | Status::Bad));
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

mod analyzer;
mod classifier;
mod lopdf_source;
mod pdf_utils;
mod session;
mod signal;
mod source;
mod verdict;

pub use analyzer::PdfAnalyzer;
pub use classifier::DocumentClassifier;
pub use lopdf_source::{LopdfDocument, LopdfSource};
pub use session::{AnalysisSession, RunTicket};
pub use signal::{extract_page_signal, DocumentSignals, PageSignal};
pub use source::{DocumentHandle, PageHandle, PdfSource, RefId, StructureRoot, TextItem};
pub use verdict::{
    Status, Verdict, REASON_NO_STRUCTURE, REASON_NO_TEXT, REASON_STRUCTURE, REASON_TEXT,
};

// ── Configuration ────────────────────────────────────────────────────────────

/// Which evidence counts as "organized structural layers" for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StructureHeuristic {
    /// A page has structure when it carries a page-tree reference number or
    /// the document has a structure tree root.
    ///
    /// Nearly every well-formed page has a reference number, so this
    /// over-reports structure and the verdict effectively tracks text alone.
    #[default]
    Legacy,

    /// A page has structure only when the document has a structure tree
    /// root or declares at least one optional content group.
    Strict,
}

/// Runtime configuration for [`DocumentClassifier`] and [`PdfAnalyzer`].
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Evidence rule used for the per-page structure signal.
    pub structure_heuristic: StructureHeuristic,

    /// Stop visiting pages once both document signals are `true`.
    pub short_circuit: bool,

    /// If set, [`PdfAnalyzer`] rejects inputs larger than this many bytes
    /// with [`CheckError::InputTooLarge`] before parsing them.
    pub max_input_size: Option<usize>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            structure_heuristic: StructureHeuristic::Legacy,
            short_circuit: true,
            max_input_size: None,
        }
    }
}

// ── Error type ───────────────────────────────────────────────────────────────

/// Every error that this crate can produce.
#[derive(Error, Debug)]
pub enum CheckError {
    /// A filesystem I/O error occurred while reading the input.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The parser could not open the document at all.
    #[error("PDF parse error: {0}")]
    ParseError(String),

    /// A single page could not be decoded.
    #[error("Failed to read page {page}: {reason}")]
    PageError { page: u32, reason: String },

    /// The document could not be classified: it failed to open or has no
    /// pages. No verdict is produced for such a document.
    #[error("Document unreadable: {0}")]
    DocumentUnreadable(String),

    /// The input exceeds the configured `max_input_size`.
    #[error("Input of {size} bytes exceeds the configured limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    /// A newer submission replaced this analysis run.
    #[error("Analysis superseded by a newer submission")]
    Superseded,
}

impl CheckError {
    /// Turn an open failure into the core-level unreadable error.
    ///
    /// Errors that are already core-level pass through untouched.
    pub(crate) fn into_unreadable(self) -> Self {
        match self {
            CheckError::ParseError(reason) => CheckError::DocumentUnreadable(reason),
            other => other,
        }
    }
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, CheckError>;
