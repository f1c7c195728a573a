//! Document ingestion: PDF text extraction and chunking
//!
//! Produces a single bounded context string per uploaded document. Only the
//! first `max_chunks` chunks are kept; later content is silently dropped, a
//! deliberate simplification rather than a completeness guarantee.

pub mod chunker;

pub use chunker::TextSplitter;

use std::path::Path;
use thiserror::Error;

const DEFAULT_CHUNK_SIZE: usize = 1000;
const DEFAULT_CHUNK_OVERLAP: usize = 100;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported file type: {0} (only .pdf is accepted)")]
    UnsupportedFormat(String),
    #[error("failed to extract text: {0}")]
    Extraction(String),
    #[error("document contains no extractable text")]
    EmptyDocument,
}

/// Load and prepare text content from uploaded documents
pub struct ContentLoader {
    splitter: TextSplitter,
}

impl Default for ContentLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentLoader {
    pub fn new() -> Self {
        Self {
            splitter: TextSplitter::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP),
        }
    }

    /// Extract and split the document at `path`. The extension is checked
    /// before any I/O happens, so a rejected file has no side effects.
    pub fn load(&self, path: &Path) -> Result<Vec<String>, IngestError> {
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if !is_pdf {
            return Err(IngestError::UnsupportedFormat(path.display().to_string()));
        }

        let text = pdf_extract::extract_text(path)
            .map_err(|e| IngestError::Extraction(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(IngestError::EmptyDocument);
        }

        Ok(self.splitter.split(&text))
    }

    /// Extract the document context string: the first `max_chunks` chunks
    /// joined by blank lines, in page order.
    pub fn get_text(&self, path: &Path, max_chunks: usize) -> Result<String, IngestError> {
        let chunks = self.load(path)?;
        let kept = chunks.len().min(max_chunks);
        log::info!(
            "[INGEST] {} extracted as {} chunks, keeping {}",
            path.display(),
            chunks.len(),
            kept
        );
        Ok(assemble(chunks, max_chunks))
    }
}

fn assemble(chunks: Vec<String>, max_chunks: usize) -> String {
    chunks
        .into_iter()
        .take(max_chunks)
        .collect::<Vec<_>>()
        .join("\n\n")
}
