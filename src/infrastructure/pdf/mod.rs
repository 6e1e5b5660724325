//! PDF page extraction
//!
//! Produces one [`PageRecord`] per page, in page order, using `lopdf`.

use std::path::Path;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::PageRecord;

/// Page text extractor backed by `lopdf`
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfLoader;

impl PdfLoader {
    /// Create a loader
    pub fn new() -> Self {
        Self
    }

    /// Extract pages from every file in order.
    ///
    /// The first file that cannot be read or parsed aborts the whole load.
    pub fn load_files<P: AsRef<Path>>(&self, paths: &[P]) -> DomainResult<Vec<PageRecord>> {
        let mut pages = Vec::new();
        for path in paths {
            pages.extend(self.load_file(path.as_ref())?);
        }
        Ok(pages)
    }

    /// Extract pages from one file
    pub fn load_file(&self, path: &Path) -> DomainResult<Vec<PageRecord>> {
        let filename = display_name(path);

        let bytes = std::fs::read(path)
            .map_err(|e| DomainError::Extraction(format!("{}: {e}", path.display())))?;
        let pages = self.load_bytes(&filename, &bytes)?;

        tracing::info!(file = %filename, pages = pages.len(), "extracted pdf pages");
        Ok(pages)
    }

    /// Extract pages from an in-memory document
    pub fn load_bytes(&self, filename: &str, bytes: &[u8]) -> DomainResult<Vec<PageRecord>> {
        let document = lopdf::Document::load_mem(bytes)
            .map_err(|e| DomainError::Extraction(format!("{filename}: {e}")))?;

        let mut records = Vec::new();
        for (page_number, _) in document.get_pages() {
            let text = match document.extract_text(&[page_number]) {
                Ok(text) => normalize(&text),
                Err(e) => {
                    // Image-only or oddly encoded pages carry no usable text
                    tracing::debug!(file = %filename, page = page_number, error = %e, "page has no extractable text");
                    String::new()
                }
            };
            records.push(PageRecord::new(filename, page_number, text)?);
        }

        Ok(records)
    }
}

/// File base name used as the chunk attribution
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};
    use tempfile::TempDir;

    fn write_pdf(path: &Path, page_texts: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in page_texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = i64::try_from(kids.len()).unwrap();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_pages_in_order_with_base_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.pdf");
        write_pdf(&path, &["First page", "Second page", "Third page"]);

        let pages = PdfLoader::new().load_files(&[&path]).unwrap();
        assert_eq!(pages.len(), 3);
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(page.filename, "report.pdf");
            assert_eq!(page.page_number as usize, i + 1);
            assert!(!page.text.contains('\r'));
            assert_eq!(page.text, page.text.trim());
        }
    }

    #[test]
    fn test_multiple_files_concatenate() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.pdf");
        let b = dir.path().join("b.pdf");
        write_pdf(&a, &["one"]);
        write_pdf(&b, &["two", "three"]);

        let pages = PdfLoader::new().load_files(&[a, b]).unwrap();
        let ids: Vec<(&str, u32)> = pages
            .iter()
            .map(|p| (p.filename.as_str(), p.page_number))
            .collect();
        assert_eq!(ids, vec![("a.pdf", 1), ("b.pdf", 1), ("b.pdf", 2)]);
    }

    #[test]
    fn test_missing_file_is_extraction_error() {
        let result = PdfLoader::new().load_files(&["/nonexistent/missing.pdf"]);
        assert!(matches!(result, Err(DomainError::Extraction(msg)) if msg.contains("missing.pdf")));
    }

    #[test]
    fn test_garbage_bytes_is_extraction_error() {
        let result = PdfLoader::new().load_bytes("broken.pdf", b"definitely not a pdf");
        assert!(matches!(result, Err(DomainError::Extraction(msg)) if msg.contains("broken.pdf")));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  a\r\nb\rc \n"), "a\nb\nc");
    }
}
