use crate::classifier::DocumentClassifier;
use crate::lopdf_source::LopdfDocument;
use crate::signal::DocumentSignals;
use crate::source::DocumentHandle;
use crate::verdict::Verdict;
use crate::{CheckError, ClassifierConfig, Result};
use std::path::Path;

// ── PdfAnalyzer ───────────────────────────────────────────────────────────────

/// Entry point for classifying a PDF with the bundled lopdf parser.
///
/// # Creating an analyzer
///
/// ```no_run
/// use vectorcheck::{ClassifierConfig, PdfAnalyzer, StructureHeuristic};
///
/// // From a file path
/// let a = PdfAnalyzer::from_path("drawing.pdf").unwrap();
///
/// // From an in-memory buffer
/// let bytes = std::fs::read("drawing.pdf").unwrap();
/// let a = PdfAnalyzer::from_bytes(&bytes).unwrap();
///
/// // With custom configuration
/// let cfg = ClassifierConfig {
///     structure_heuristic: StructureHeuristic::Strict,
///     max_input_size: Some(50 * 1024 * 1024),
///     ..Default::default()
/// };
/// let a = PdfAnalyzer::with_config("drawing.pdf", cfg).unwrap();
/// ```
///
/// Every constructor reports a document that cannot be opened as
/// [`CheckError::DocumentUnreadable`].
pub struct PdfAnalyzer {
    document: LopdfDocument,
    classifier: DocumentClassifier,
}

impl PdfAnalyzer {
    // ── Constructors ──────────────────────────────────────────────────────────

    /// Load a PDF from the file system.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_config(path, ClassifierConfig::default())
    }

    /// Load a PDF from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_config(data, ClassifierConfig::default())
    }

    /// Load a PDF from the file system with a custom [`ClassifierConfig`].
    pub fn with_config<P: AsRef<Path>>(path: P, config: ClassifierConfig) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes_with_config(&data, config)
    }

    /// Load a PDF from an in-memory byte slice with a custom [`ClassifierConfig`].
    pub fn from_bytes_with_config(data: &[u8], config: ClassifierConfig) -> Result<Self> {
        if let Some(limit) = config.max_input_size {
            if data.len() > limit {
                return Err(CheckError::InputTooLarge {
                    size: data.len(),
                    limit,
                });
            }
        }

        let document = LopdfDocument::load_mem(data).map_err(CheckError::into_unreadable)?;
        log::debug!("loaded document with {} page(s)", document.page_count());

        Ok(Self {
            document,
            classifier: DocumentClassifier::new(config),
        })
    }

    // ── Classification ────────────────────────────────────────────────────────

    /// Classify the loaded document.
    ///
    /// Fails with [`CheckError::DocumentUnreadable`] when the document has no
    /// pages; otherwise always yields a verdict.
    pub fn classify(&self) -> Result<Verdict> {
        self.classifier.classify(&self.document)
    }

    /// The document-level text and structure signals.
    pub fn signals(&self) -> Result<DocumentSignals> {
        self.classifier.signals(&self.document)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Number of pages lopdf found in the page tree.
    pub fn page_count(&self) -> u32 {
        self.document.page_count()
    }

    /// Returns a reference to the parsed document.
    pub fn document(&self) -> &LopdfDocument {
        &self.document
    }

    /// Returns a reference to the active [`ClassifierConfig`].
    pub fn config(&self) -> &ClassifierConfig {
        self.classifier.config()
    }
}
