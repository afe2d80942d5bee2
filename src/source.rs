//! Parser collaborator interface.
//!
//! The classifier never touches PDF bytes itself. It talks to a parsed
//! document through these traits, so any parser (or a synthetic document in
//! tests) can be plugged in.

use crate::Result;

/// Object number identifying a page or node in the document's object graph.
pub type RefId = u32;

/// One discrete unit of extractable text on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    /// The raw text bytes shown by the operator, decoded lossily.
    pub text: String,
}

impl TextItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Root of a document's tagged-content structure tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureRoot {
    /// Object number of the `/StructTreeRoot` dictionary, or `None` when the
    /// catalog stores it inline.
    pub object_ref: Option<RefId>,
}

/// Opens raw PDF bytes into a [`DocumentHandle`].
pub trait PdfSource {
    /// Parse `bytes` into a document.
    ///
    /// Fails with [`CheckError::ParseError`](crate::CheckError::ParseError)
    /// when the document cannot be opened at all.
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn DocumentHandle>>;
}

/// A parsed document: page count, page accessor and document-wide metadata.
pub trait DocumentHandle {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Fetch page `index` (1-based).
    ///
    /// Fails with [`CheckError::PageError`](crate::CheckError::PageError)
    /// when the page object cannot be resolved.
    fn page(&self, index: u32) -> Result<Box<dyn PageHandle + '_>>;

    /// The document's structure tree root, if it has a non-null one.
    fn structure_tree_root(&self) -> Option<StructureRoot>;

    /// Number of optional content groups the document declares.
    fn optional_content_groups(&self) -> usize {
        0
    }
}

/// A single page of a [`DocumentHandle`].
pub trait PageHandle {
    /// Extract the page's text items; an empty vector means no text layer.
    fn text_items(&self) -> Result<Vec<TextItem>>;

    /// The page's reference number in the page tree, if it has one.
    fn structural_ref_id(&self) -> Option<RefId>;
}
