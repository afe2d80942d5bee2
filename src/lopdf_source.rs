use std::collections::HashSet;

use crate::source::{DocumentHandle, PageHandle, PdfSource, RefId, StructureRoot, TextItem};
use crate::{pdf_utils, CheckError, Result};
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Operators that paint text: `Tj`, `TJ`, `'` and `"`.
const TEXT_SHOWING_OPERATORS: [&str; 4] = ["Tj", "TJ", "'", "\""];

// ── LopdfSource ───────────────────────────────────────────────────────────────

/// Default [`PdfSource`] backed by the `lopdf` parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfSource;

impl PdfSource for LopdfSource {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn DocumentHandle>> {
        Ok(Box::new(LopdfDocument::load_mem(bytes)?))
    }
}

// ── LopdfDocument ─────────────────────────────────────────────────────────────

/// A parsed lopdf document with its pages cached in page-tree order.
pub struct LopdfDocument {
    document: Document,
    page_ids: Vec<ObjectId>,
}

impl LopdfDocument {
    /// Parse a PDF from an in-memory byte slice.
    ///
    /// Zero-length input and anything lopdf refuses to load fail with
    /// [`CheckError::ParseError`].
    pub fn load_mem(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(CheckError::ParseError("input is empty".into()));
        }
        let document =
            Document::load_mem(bytes).map_err(|e| CheckError::ParseError(e.to_string()))?;

        // lopdf tolerates a missing /Root; without it there is no page tree.
        document
            .catalog()
            .map_err(|e| CheckError::ParseError(format!("missing or invalid catalog: {e}")))?;

        Ok(Self::from_document(document))
    }

    /// Wrap an already-loaded [`lopdf::Document`].
    pub fn from_document(document: Document) -> Self {
        let page_ids = document.get_pages().into_values().collect();
        Self { document, page_ids }
    }

    /// Returns a reference to the underlying [`lopdf::Document`].
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn catalog_entry(&self, key: &[u8]) -> Option<&Object> {
        self.document.catalog().ok()?.get(key).ok()
    }
}

impl DocumentHandle for LopdfDocument {
    fn page_count(&self) -> u32 {
        self.page_ids.len() as u32
    }

    fn page(&self, index: u32) -> Result<Box<dyn PageHandle + '_>> {
        let page_error = |reason: String| CheckError::PageError { page: index, reason };

        let id = index
            .checked_sub(1)
            .and_then(|i| self.page_ids.get(i as usize))
            .copied()
            .ok_or_else(|| page_error(format!("no page at index {index}")))?;

        let dict = self
            .document
            .get_object(id)
            .and_then(|o| o.as_dict())
            .map_err(|e| page_error(format!("page object {} {} is unusable: {e}", id.0, id.1)))?;

        let resources = pdf_utils::inherited(&self.document, dict, b"Resources")
            .and_then(|v| pdf_utils::resolve_dict(&self.document, v));

        Ok(Box::new(LopdfPage {
            document: &self.document,
            dict,
            resources,
            id,
            index,
        }))
    }

    fn structure_tree_root(&self) -> Option<StructureRoot> {
        let value = self.catalog_entry(b"StructTreeRoot")?;
        if pdf_utils::is_null(&self.document, value) {
            return None;
        }
        Some(StructureRoot {
            object_ref: value.as_reference().ok().map(|id| id.0),
        })
    }

    fn optional_content_groups(&self) -> usize {
        self.catalog_entry(b"OCProperties")
            .and_then(|v| pdf_utils::resolve_dict(&self.document, v))
            .and_then(|props| props.get(b"OCGs").ok())
            .and_then(|v| pdf_utils::resolve_array(&self.document, v))
            .map_or(0, Vec::len)
    }
}

// ── LopdfPage ─────────────────────────────────────────────────────────────────

struct LopdfPage<'a> {
    document: &'a Document,
    dict: &'a Dictionary,
    resources: Option<&'a Dictionary>,
    id: ObjectId,
    index: u32,
}

impl<'a> LopdfPage<'a> {
    fn page_error(&self, reason: String) -> CheckError {
        CheckError::PageError {
            page: self.index,
            reason,
        }
    }

    /// Concatenate the page's content streams, decompressing where needed.
    ///
    /// `/Contents` may be a single stream reference or an array of them; a
    /// page without `/Contents` is blank.
    fn content_bytes(&self) -> Result<Vec<u8>> {
        let contents = match self.dict.get(b"Contents") {
            Ok(obj) => obj,
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(id) => self.stream_bytes(*id),
            Object::Array(items) => {
                let mut content = Vec::new();
                for item in items {
                    let id = item.as_reference().map_err(|e| {
                        self.page_error(format!("/Contents array item is not a reference: {e}"))
                    })?;
                    let bytes = self.stream_bytes(id)?;
                    if !content.is_empty() {
                        content.push(b' ');
                    }
                    content.extend_from_slice(&bytes);
                }
                Ok(content)
            }
            _ => Err(self.page_error("/Contents is not a reference or array".into())),
        }
    }

    fn stream_bytes(&self, id: ObjectId) -> Result<Vec<u8>> {
        let stream = self
            .document
            .get_object(id)
            .and_then(|o| o.as_stream())
            .map_err(|e| self.page_error(format!("content stream {} {}: {e}", id.0, id.1)))?;
        self.decoded(stream)
    }

    fn decoded(&self, stream: &Stream) -> Result<Vec<u8>> {
        if stream.dict.get(b"Filter").is_ok() {
            stream
                .decompressed_content()
                .map_err(|e| self.page_error(format!("cannot decompress content stream: {e}")))
        } else {
            Ok(stream.content.clone())
        }
    }

    /// Scan one content stream for text, descending into form XObjects it
    /// paints with `Do`. `visited` holds every form already scanned on this
    /// page, so a form is read at most once and cycles terminate.
    fn collect_text(
        &self,
        bytes: &[u8],
        resources: Option<&'a Dictionary>,
        visited: &mut HashSet<ObjectId>,
        items: &mut Vec<TextItem>,
    ) -> Result<()> {
        let content = Content::decode(&pdf_utils::strip_inline_images(bytes))
            .map_err(|e| self.page_error(format!("cannot decode content stream: {e}")))?;

        for op in &content.operations {
            let operator = op.operator.as_str();
            if TEXT_SHOWING_OPERATORS.contains(&operator) {
                let shown = pdf_utils::shown_text(&op.operands);
                if !shown.is_empty() {
                    items.push(TextItem::new(String::from_utf8_lossy(&shown)));
                }
                continue;
            }
            if operator != "Do" {
                continue;
            }

            let Some(name) = op.operands.first().and_then(|o| o.as_name().ok()) else {
                continue;
            };
            let Some((id, form)) = self.form_xobject(name, resources) else {
                continue;
            };
            if !visited.insert(id) {
                log::debug!("page {}: form {} {} already scanned", self.index, id.0, id.1);
                continue;
            }

            let form_resources = form
                .dict
                .get(b"Resources")
                .ok()
                .and_then(|v| pdf_utils::resolve_dict(self.document, v))
                .or(resources);

            // A damaged form loses its own text, not the rest of the page.
            if let Err(e) = self
                .decoded(form)
                .and_then(|bytes| self.collect_text(&bytes, form_resources, visited, items))
            {
                log::warn!("page {}: skipping form {} {}: {e}", self.index, id.0, id.1);
            }
        }
        Ok(())
    }

    /// Resolve `/Name` to a form XObject, first in `resources` and then in
    /// the page's own resources.
    fn form_xobject(
        &self,
        name: &[u8],
        resources: Option<&'a Dictionary>,
    ) -> Option<(ObjectId, &'a Stream)> {
        [resources, self.resources]
            .into_iter()
            .flatten()
            .find_map(|dict| {
                let xobjects = pdf_utils::resolve_dict(self.document, dict.get(b"XObject").ok()?)?;
                xobjects.get(name).ok()?.as_reference().ok()
            })
            .and_then(|id| {
                let stream = self.document.get_object(id).ok()?.as_stream().ok()?;
                let subtype = stream.dict.get(b"Subtype").and_then(|v| v.as_name()).ok()?;
                (subtype == b"Form").then_some((id, stream))
            })
    }
}

impl PageHandle for LopdfPage<'_> {
    fn text_items(&self) -> Result<Vec<TextItem>> {
        let bytes = self.content_bytes()?;
        let mut items = Vec::new();
        self.collect_text(&bytes, self.resources, &mut HashSet::new(), &mut items)?;
        Ok(items)
    }

    fn structural_ref_id(&self) -> Option<RefId> {
        Some(self.id.0)
    }
}
