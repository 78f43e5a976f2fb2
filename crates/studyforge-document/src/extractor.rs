use crate::error::DocumentError;
use crate::types::ExtractedDocument;

/// Extract text and a page count from raw PDF bytes.
///
/// Parsing runs on the blocking pool. Pages are recovered from the form
/// feed separators `pdf-extract` inserts between pages; the concatenated
/// text joins them in page order. A corrupt, encrypted, or otherwise
/// unreadable file is an `Extraction` error, never an empty document —
/// empty extracted text is a separate condition the caller checks via
/// [`ExtractedDocument::is_empty`].
///
/// # Errors
///
/// Returns `DocumentError::Extraction` if the PDF cannot be parsed.
pub async fn extract(bytes: Vec<u8>) -> Result<ExtractedDocument, DocumentError> {
    let text = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| DocumentError::Extraction(e.to_string()))
    })
    .await
    .map_err(|e| DocumentError::Extraction(format!("pdf parsing task failed: {e}")))??;

    Ok(document_from_text(&text))
}

fn document_from_text(text: &str) -> ExtractedDocument {
    let pages: Vec<&str> = text
        .split('\x0C')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    ExtractedDocument {
        num_pages: pages.len().max(1),
        text: pages.join("\n\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_from_form_feeds() {
        let doc = document_from_text("page one\x0Cpage two\x0Cpage three");
        assert_eq!(doc.num_pages, 3);
        assert_eq!(doc.text, "page one\n\npage two\n\npage three");
    }

    #[test]
    fn no_form_feeds_is_one_page() {
        let doc = document_from_text("just one page of text");
        assert_eq!(doc.num_pages, 1);
    }

    #[test]
    fn blank_pages_are_dropped() {
        let doc = document_from_text("content\x0C   \x0Cmore");
        assert_eq!(doc.num_pages, 2);
    }

    #[test]
    fn empty_text_still_reports_one_page() {
        let doc = document_from_text("");
        assert_eq!(doc.num_pages, 1);
        assert!(doc.is_empty());
    }

    #[tokio::test]
    async fn garbage_bytes_are_an_extraction_error() {
        let result = extract(b"not a pdf at all".to_vec()).await;
        assert!(matches!(result, Err(DocumentError::Extraction(_))));
    }

    #[tokio::test]
    async fn truncated_header_is_an_extraction_error() {
        let result = extract(b"%PDF-1.7\n".to_vec()).await;
        assert!(matches!(result, Err(DocumentError::Extraction(_))));
    }
}
