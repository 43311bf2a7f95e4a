//! Delimiter-based document splicing.
//!
//! A pure function: `(document, markers, replacement) -> document`. The
//! caller owns reading and writing the file; nothing here touches the
//! filesystem.

use thiserror::Error;

/// Errors that can occur while splicing a document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpliceError {
    /// A delimiter was not found in the document.
    #[error("marker not found in document: '{marker}'")]
    MarkerNotFound { marker: String },

    /// The end delimiter appears before the begin delimiter.
    #[error("end marker appears before begin marker")]
    MarkersOutOfOrder,
}

/// Replace the region between two delimiters with `replacement`.
///
/// Both delimiters are kept; exactly the text between the end of `begin`
/// and the start of `end` is replaced, verbatim — the caller includes any
/// surrounding newlines in `replacement`.
pub fn splice_between(
    document: &str,
    begin: &str,
    end: &str,
    replacement: &str,
) -> Result<String, SpliceError> {
    let begin_at = document.find(begin).ok_or_else(|| SpliceError::MarkerNotFound {
        marker: begin.to_string(),
    })?;
    let content_start = begin_at + begin.len();

    let end_at = match document[content_start..].find(end) {
        Some(rel) => content_start + rel,
        None => {
            // Distinguish a missing end marker from one placed before begin.
            return if document[..begin_at].contains(end) {
                Err(SpliceError::MarkersOutOfOrder)
            } else {
                Err(SpliceError::MarkerNotFound {
                    marker: end.to_string(),
                })
            };
        }
    };

    let mut out = String::with_capacity(document.len() + replacement.len());
    out.push_str(&document[..content_start]);
    out.push_str(replacement);
    out.push_str(&document[end_at..]);
    Ok(out)
}
