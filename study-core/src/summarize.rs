//! Notes summarizer: two-level windowed reduction over every stored chunk.
//!
//! The windowing exists solely to keep each gateway call under the
//! completion service's input-size limits; it is not semantic chunking.

use llm_gateway::{ChatMessage, CompletionOptions};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StudyError;
use crate::prompt::{build_final_summary_prompt, build_window_summary_prompt};
use crate::traits::{Completion, ContextSource};

/// Fixed response when the store holds no chunks.
pub const NO_NOTES_MESSAGE: &str = "No notes found in the database.";

/// Upper byte bound for one summarization window.
pub const MAX_WINDOW_CHARS: usize = 4000;

/// Requested summary depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SummaryMode {
    Brief,
    #[default]
    Detailed,
}

impl SummaryMode {
    /// Lenient parse of a user-supplied mode label: anything starting with
    /// "brief" (case-insensitive) is Brief, everything else Detailed.
    pub fn from_label(label: &str) -> Self {
        if label.trim().to_lowercase().starts_with("brief") {
            SummaryMode::Brief
        } else {
            SummaryMode::Detailed
        }
    }
}

/// Partition `text` into sequential windows of at most `max_chars` bytes,
/// preferring to cut at the nearest preceding newline. Falls back to a hard
/// cut (aligned to a UTF-8 boundary) when no newline exists in range.
///
/// Concatenating the returned windows reproduces the input exactly.
pub fn split_windows(text: &str, max_chars: usize) -> Vec<String> {
    // A UTF-8 char is at most 4 bytes; anything smaller cannot make progress.
    let max_chars = max_chars.max(4);

    let mut windows = Vec::new();
    let mut rest = text;

    while rest.len() > max_chars {
        let bound = floor_char_boundary(rest, max_chars);
        let cut = match rest[..bound].rfind('\n') {
            Some(pos) if pos > 0 => pos,
            _ => bound,
        };
        windows.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }
    if !rest.is_empty() {
        windows.push(rest.to_string());
    }

    windows
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Summarize every stored chunk into a brief or detailed final summary.
///
/// Empty store short-circuits to [`NO_NOTES_MESSAGE`] without any gateway
/// call. Otherwise each window is reduced to bullets independently, and one
/// final call synthesizes the partial summaries.
///
/// # Errors
/// [`StudyError::Llm`] when any gateway call fails.
pub async fn summarize_notes<C, S>(
    llm: &C,
    notes: &S,
    mode: SummaryMode,
) -> Result<String, StudyError>
where
    C: Completion,
    S: ContextSource,
{
    let docs = notes.retrieve_all().await;
    if docs.is_empty() {
        return Ok(NO_NOTES_MESSAGE.to_string());
    }

    let full_text = docs.join("\n\n");
    let windows = split_windows(&full_text, MAX_WINDOW_CHARS);

    let mut partials: Vec<String> = Vec::with_capacity(windows.len());
    for (i, window) in windows.iter().enumerate() {
        debug!(window = i + 1, total = windows.len(), "summarizing window");
        let summary = llm
            .complete(
                &[ChatMessage::user(build_window_summary_prompt(window))],
                None,
                CompletionOptions {
                    max_tokens: Some(500),
                    temperature: Some(0.2),
                },
            )
            .await?;
        partials.push(format!("Chunk {} Summary:\n{}", i + 1, summary));
    }

    let combined = partials.join("\n\n");
    let final_prompt = build_final_summary_prompt(&combined, mode == SummaryMode::Brief);

    let final_summary = llm
        .complete(
            &[ChatMessage::user(final_prompt)],
            None,
            CompletionOptions {
                max_tokens: Some(800),
                temperature: Some(0.2),
            },
        )
        .await?;

    Ok(final_summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockCompletion, MockSource};

    #[test]
    fn windows_are_bounded_and_lossless() {
        let line = "alpha beta gamma delta\n";
        let text = line.repeat(400); // ~9200 bytes
        let windows = split_windows(&text, 4000);

        assert!(windows.len() >= 3);
        assert!(windows.iter().all(|w| w.len() <= 4000));
        assert_eq!(windows.concat(), text);
        // Every cut landed on a newline, so no line was severed.
        for w in &windows[1..] {
            assert!(w.starts_with('\n'));
        }
    }

    #[test]
    fn window_split_hard_cuts_without_newlines() {
        let text = "x".repeat(9000);
        let windows = split_windows(&text, 4000);
        assert_eq!(
            windows.iter().map(String::len).collect::<Vec<_>>(),
            vec![4000, 4000, 1000]
        );
        assert_eq!(windows.concat(), text);
    }

    #[test]
    fn window_split_respects_utf8_boundaries() {
        let text = "é".repeat(3000); // 6000 bytes of 2-byte chars
        let windows = split_windows(&text, 4001);
        assert_eq!(windows.concat(), text);
        assert!(windows.iter().all(|w| w.len() <= 4001));
    }

    #[test]
    fn short_text_is_a_single_window() {
        let windows = split_windows("just a note", 4000);
        assert_eq!(windows, vec!["just a note"]);
        assert!(split_windows("", 4000).is_empty());
    }

    #[test]
    fn mode_label_parses_leniently() {
        assert_eq!(SummaryMode::from_label("Brief"), SummaryMode::Brief);
        assert_eq!(SummaryMode::from_label("  briefly "), SummaryMode::Brief);
        assert_eq!(SummaryMode::from_label("Detailed"), SummaryMode::Detailed);
        assert_eq!(SummaryMode::from_label("anything"), SummaryMode::Detailed);
    }

    #[tokio::test]
    async fn empty_store_short_circuits_without_gateway_calls() {
        let llm = MockCompletion::scripted(vec![]);
        let notes = MockSource::with_chunks(vec![]);

        let out = summarize_notes(&llm, &notes, SummaryMode::Brief)
            .await
            .unwrap();
        assert_eq!(out, NO_NOTES_MESSAGE);
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn two_level_reduction_synthesizes_partials() {
        let llm = MockCompletion::scripted(vec!["- bullet one", "FINAL SUMMARY"]);
        let notes = MockSource::with_chunks(vec!["short notes".into()]);

        let out = summarize_notes(&llm, &notes, SummaryMode::Detailed)
            .await
            .unwrap();
        assert_eq!(out, "FINAL SUMMARY");
        assert_eq!(llm.call_count(), 2);

        let prompts = llm.prompts();
        assert!(prompts[0].contains("short notes"));
        assert!(prompts[1].contains("Chunk 1 Summary:\n- bullet one"));
        assert!(prompts[1].contains("detailed structured summary"));
    }

    #[tokio::test]
    async fn brief_mode_asks_for_exactly_five_bullets() {
        let llm = MockCompletion::scripted(vec!["- partial", "BRIEF"]);
        let notes = MockSource::with_chunks(vec!["notes".into()]);

        summarize_notes(&llm, &notes, SummaryMode::Brief)
            .await
            .unwrap();
        let prompts = llm.prompts();
        assert!(prompts[1].contains("exactly 5 bullet points"));
    }
}
