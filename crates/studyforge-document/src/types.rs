/// Text pulled out of an uploaded PDF, with page-count metadata.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub text: String,
    pub num_pages: usize,
}

impl ExtractedDocument {
    /// True when the document contains no extractable text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_when_blank() {
        let doc = ExtractedDocument {
            text: "  \n\t ".into(),
            num_pages: 3,
        };
        assert!(doc.is_empty());
    }

    #[test]
    fn not_empty_with_content() {
        let doc = ExtractedDocument {
            text: "hello".into(),
            num_pages: 1,
        };
        assert!(!doc.is_empty());
    }
}
