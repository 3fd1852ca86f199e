//! Doubt solver: classify a query as a follow-up or a fresh question and
//! answer it from the notes.

use llm_gateway::{ChatMessage, CompletionOptions};
use tracing::debug;

use crate::error::StudyError;
use crate::prompt::{build_follow_up_prompt, build_fresh_doubt_prompt};
use crate::traits::{Completion, ContextSource};

/// Top-k chunks retrieved for a doubt query.
pub const DOUBT_CONTEXT_K: usize = 8;

/// Refinement phrases that mark a query as a follow-up to the prior answer.
/// Matched as case-insensitive substrings.
pub const FOLLOW_UP_PHRASES: [&str; 9] = [
    "explain better",
    "explain again",
    "simplify",
    "in better words",
    "clarify",
    "make it simpler",
    "explain more",
    "expand",
    "elaborate",
];

/// A query is a follow-up iff a prior answer exists and the query contains
/// at least one refinement phrase.
pub fn is_follow_up(question: &str, last_answer: &str) -> bool {
    if last_answer.is_empty() {
        return false;
    }
    let lower = question.to_lowercase();
    let lower = lower.trim();
    FOLLOW_UP_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// Answer `question` from the notes, or refine `last_answer` when the query
/// reads like a follow-up. Context is retrieved either way and passed to the
/// gateway as grounding.
///
/// # Errors
/// [`StudyError::Llm`] when the gateway call fails.
pub async fn solve_doubt<C, S>(
    llm: &C,
    notes: &S,
    question: &str,
    last_answer: &str,
) -> Result<String, StudyError>
where
    C: Completion,
    S: ContextSource,
{
    let docs = notes.retrieve(question, DOUBT_CONTEXT_K).await;
    let context = (!docs.is_empty()).then(|| docs.join("\n\n"));

    let follow_up = is_follow_up(question, last_answer);
    debug!(follow_up, chunks = docs.len(), "solving doubt");

    let prompt = if follow_up {
        build_follow_up_prompt(question, last_answer)
    } else {
        build_fresh_doubt_prompt(question)
    };

    let answer = llm
        .complete(
            &[ChatMessage::user(prompt)],
            context.as_deref(),
            CompletionOptions {
                max_tokens: Some(512),
                temperature: Some(0.2),
            },
        )
        .await?;

    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockCompletion, MockSource};

    #[test]
    fn follow_up_requires_prior_answer_and_phrase() {
        assert!(is_follow_up("please simplify that", "prior answer"));
        assert!(is_follow_up("Could you EXPLAIN BETTER?", "prior answer"));
        assert!(!is_follow_up("please simplify that", ""));
        assert!(!is_follow_up("what is entropy?", "prior answer"));
    }

    #[tokio::test]
    async fn fresh_question_gets_grounding_context() {
        let llm = MockCompletion::scripted(vec!["Entropy measures disorder."]);
        let notes = MockSource::with_chunks(vec!["entropy notes".into()]);

        let answer = solve_doubt(&llm, &notes, "what is entropy?", "")
            .await
            .unwrap();
        assert_eq!(answer, "Entropy measures disorder.");
        assert_eq!(llm.last_context().as_deref(), Some("entropy notes"));

        let prompts = llm.prompts();
        assert!(prompts[0].contains("what is entropy?"));
        assert!(prompts[0].contains("helpful tutor"));
    }

    #[tokio::test]
    async fn follow_up_prompt_carries_the_prior_answer() {
        let llm = MockCompletion::scripted(vec!["Simpler version."]);
        let notes = MockSource::with_chunks(vec![]);

        solve_doubt(&llm, &notes, "simplify please", "the old answer")
            .await
            .unwrap();

        let prompts = llm.prompts();
        assert!(prompts[0].contains("the old answer"));
        assert!(prompts[0].contains("follow-up"));
        // No chunks retrieved, so no grounding context is attached.
        assert_eq!(llm.last_context(), None);
    }
}
