//! Document loader: turns a file on disk into page-level texts.
//!
//! Plain-text and markdown notes are the supported inputs. Form-feed
//! characters (`\x0c`) are honored as explicit page breaks (the classic
//! export format of PDF-to-text tools); otherwise paragraphs are packed
//! greedily into pages of at most [`PAGE_MAX_CHARS`] bytes. A paragraph
//! longer than the page budget becomes a page of its own rather than being
//! severed mid-sentence.

use std::fs;
use std::path::Path;

use crate::errors::note_store_error::NoteStoreError;

/// Upper byte bound for one synthesized page.
pub const PAGE_MAX_CHARS: usize = 2000;

/// Load a document and split it into page texts.
///
/// # Errors
/// - [`NoteStoreError::FileNotFound`] when the path does not exist
/// - [`NoteStoreError::Io`] when the file cannot be read
pub fn load_pages(path: &Path) -> Result<Vec<String>, NoteStoreError> {
    if !path.exists() {
        return Err(NoteStoreError::FileNotFound(path.to_path_buf()));
    }

    let raw = fs::read_to_string(path)?;
    Ok(split_pages(&raw))
}

/// Split raw document text into page texts (pure, testable core).
pub fn split_pages(raw: &str) -> Vec<String> {
    if raw.contains('\x0c') {
        return raw
            .split('\x0c')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
    }

    let mut pages: Vec<String> = Vec::new();
    let mut current = String::new();

    for para in raw.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
        if !current.is_empty() && current.len() + 2 + para.len() > PAGE_MAX_CHARS {
            pages.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push_str("\n\n");
        }
        current.push_str(para);
    }
    if !current.is_empty() {
        pages.push(current);
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_feed_marks_pages() {
        let pages = split_pages("page one\x0cpage two\x0c\x0c page three ");
        assert_eq!(pages, vec!["page one", "page two", "page three"]);
    }

    #[test]
    fn paragraphs_pack_into_bounded_pages() {
        let para = "x".repeat(1200);
        let raw = format!("{para}\n\n{para}\n\n{para}");
        let pages = split_pages(&raw);
        // 1200 + 2 + 1200 > 2000, so every paragraph lands on its own page.
        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|p| p.len() <= PAGE_MAX_CHARS));
    }

    #[test]
    fn short_paragraphs_share_a_page() {
        let pages = split_pages("alpha\n\nbeta\n\ngamma");
        assert_eq!(pages, vec!["alpha\n\nbeta\n\ngamma"]);
    }

    #[test]
    fn oversized_paragraph_stays_whole() {
        let para = "y".repeat(PAGE_MAX_CHARS + 500);
        let pages = split_pages(&para);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].len(), PAGE_MAX_CHARS + 500);
    }

    #[test]
    fn empty_input_yields_no_pages() {
        assert!(split_pages("").is_empty());
        assert!(split_pages("\n\n  \n\n").is_empty());
    }
}
