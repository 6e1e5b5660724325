//! Extracted page text, the input of the chunker.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// One page of text extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Base name of the source file
    pub filename: String,

    /// 1-based page number within the file
    pub page_number: u32,

    /// Extracted text, possibly empty
    pub text: String,
}

impl PageRecord {
    /// Create a page record, rejecting a zero page number.
    pub fn new(
        filename: impl Into<String>,
        page_number: u32,
        text: impl Into<String>,
    ) -> DomainResult<Self> {
        if page_number == 0 {
            return Err(DomainError::Validation(
                "page_number is 1-based and cannot be 0".to_string(),
            ));
        }

        Ok(Self {
            filename: filename.into(),
            page_number,
            text: text.into(),
        })
    }

    /// Returns true if the page carries no indexable text
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
