use std::path::Path;

use lopdf::Document;
use tracing::info;

use crate::document::Page;
use crate::{Error, Result};

/// Default page offset: the source corpus numbers body pages from the
/// start of the main text, 41 pages into the file.
pub const DEFAULT_PAGE_OFFSET: i64 = 41;

/// PDF loader producing one [`Page`] record per page.
pub struct PdfLoader {
    /// Subtracted from the zero-based page index to get [`Page::page_number`].
    pub page_offset: i64,
}

impl Default for PdfLoader {
    fn default() -> Self {
        Self {
            page_offset: DEFAULT_PAGE_OFFSET,
        }
    }
}

impl PdfLoader {
    /// Create a loader with an explicit page offset.
    #[must_use]
    pub fn with_offset(page_offset: i64) -> Self {
        Self { page_offset }
    }

    /// Open a PDF and extract text and statistics for every page.
    ///
    /// Pages that fail text extraction are recorded with empty text rather
    /// than aborting the whole document; scanned pages with no text layer
    /// are common in report PDFs.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<Page>> {
        let path = path.as_ref();
        let doc = Document::load(path).map_err(|e| Error::Pdf(e.to_string()))?;

        let page_ids: Vec<u32> = doc.get_pages().keys().copied().collect();
        let mut pages = Vec::with_capacity(page_ids.len());

        for (index, page_id) in page_ids.iter().enumerate() {
            let text = doc.extract_text(&[*page_id]).unwrap_or_default();
            pages.push(Page::new(index as i64 - self.page_offset, &text));
        }

        info!(
            path = %path.display(),
            pages = pages.len(),
            "extracted pdf text"
        );
        Ok(pages)
    }
}
