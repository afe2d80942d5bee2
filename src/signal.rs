use crate::source::DocumentHandle;
use crate::{Result, StructureHeuristic};

// ── PageSignal ────────────────────────────────────────────────────────────────

/// What a single page tells us about the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSignal {
    /// The page carries at least one extractable text item.
    pub has_text: bool,

    /// The page participates in an organized structural layer.
    pub has_structure: bool,
}

impl PageSignal {
    /// Signal for a page that could not be read.
    pub const UNREADABLE: PageSignal = PageSignal {
        has_text: false,
        has_structure: false,
    };
}

// ── DocumentSignals ───────────────────────────────────────────────────────────

/// Document-level signals, the logical OR of every visited [`PageSignal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentSignals {
    pub has_text: bool,
    pub has_structure: bool,
}

impl DocumentSignals {
    /// Fold one page into the running signals.
    #[must_use]
    pub fn absorb(self, page: PageSignal) -> Self {
        Self {
            has_text: self.has_text || page.has_text,
            has_structure: self.has_structure || page.has_structure,
        }
    }

    /// Returns `true` once no further page can change the signals.
    pub fn is_settled(&self) -> bool {
        self.has_text && self.has_structure
    }
}

impl FromIterator<PageSignal> for DocumentSignals {
    fn from_iter<I: IntoIterator<Item = PageSignal>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::absorb)
    }
}

// ── Extraction ────────────────────────────────────────────────────────────────

/// Compute the [`PageSignal`] for page `index` (1-based) of `document`.
///
/// Never fails: a page that cannot be fetched or whose text cannot be
/// extracted contributes [`PageSignal::UNREADABLE`], and the failure is
/// logged.
pub fn extract_page_signal(
    document: &dyn DocumentHandle,
    index: u32,
    heuristic: StructureHeuristic,
) -> PageSignal {
    match try_extract(document, index, heuristic) {
        Ok(signal) => {
            log::debug!(
                "page {index}: text={} structure={}",
                signal.has_text,
                signal.has_structure
            );
            signal
        }
        Err(e) => {
            log::warn!("page {index}: treating as empty after read failure: {e}");
            PageSignal::UNREADABLE
        }
    }
}

fn try_extract(
    document: &dyn DocumentHandle,
    index: u32,
    heuristic: StructureHeuristic,
) -> Result<PageSignal> {
    let page = document.page(index)?;
    let has_text = !page.text_items()?.is_empty();

    let has_structure = match heuristic {
        StructureHeuristic::Legacy => {
            page.structural_ref_id().is_some() || document.structure_tree_root().is_some()
        }
        StructureHeuristic::Strict => {
            document.structure_tree_root().is_some() || document.optional_content_groups() > 0
        }
    };

    Ok(PageSignal {
        has_text,
        has_structure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: PageSignal = PageSignal {
        has_text: true,
        has_structure: false,
    };
    const STRUCTURE: PageSignal = PageSignal {
        has_text: false,
        has_structure: true,
    };

    #[test]
    fn absorb_is_logical_or() {
        let signals = DocumentSignals::default().absorb(TEXT);
        assert!(signals.has_text);
        assert!(!signals.has_structure);
        assert!(!signals.is_settled());

        let signals = signals.absorb(PageSignal::UNREADABLE).absorb(STRUCTURE);
        assert!(signals.is_settled());
    }

    #[test]
    fn collecting_no_pages_yields_all_false() {
        let signals: DocumentSignals = std::iter::empty().collect();
        assert_eq!(signals, DocumentSignals::default());
    }
}
