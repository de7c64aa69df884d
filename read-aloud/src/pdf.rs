//! PDF text extraction.
//!
//! `pdf-extract` returns the whole document as one string with form-feed
//! separators between pages; pages are split back out here so callers get
//! per-page text in page order.

use anyhow::{Context, Result};

/// Extract per-page text from PDF bytes, in page order.
pub fn extract_pages(data: &[u8]) -> Result<Vec<String>> {
    let text =
        pdf_extract::extract_text_from_mem(data).context("Failed to extract PDF text")?;
    Ok(text.split('\x0C').map(|page| page.to_string()).collect())
}

/// Extract the full document text: pages joined in order, whitespace
/// normalized, outer whitespace trimmed.
pub fn extract_text(data: &[u8]) -> Result<String> {
    let pages = extract_pages(data)?;
    Ok(normalize_whitespace(&pages.join("\n")))
}

/// Normalize whitespace left behind by extraction: collapse runs of
/// spaces and tabs into one space, collapse more than two consecutive
/// newlines, and trim the ends.
fn normalize_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_space = false;
    let mut newline_count = 0;

    for c in text.chars() {
        if c == '\n' {
            newline_count += 1;
            prev_was_space = false;
            if newline_count <= 2 {
                result.push('\n');
            }
        } else if c == ' ' || c == '\t' {
            newline_count = 0;
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            newline_count = 0;
            prev_was_space = false;
            result.push(c);
        }
    }

    result.trim().to_string()
}
