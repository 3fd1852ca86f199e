//! Question generation: retrieve topic context, build the strict-format
//! prompt, invoke the gateway.

use llm_gateway::{ChatMessage, CompletionOptions};

use crate::error::StudyError;
use crate::prompt::{Difficulty, build_question_prompt};
use crate::traits::{Completion, ContextSource};

/// Top-k chunks retrieved for the quiz topic.
pub const GENERATION_CONTEXT_K: usize = 6;

/// Generate one raw multiple-choice question for `topic`.
///
/// The exclusion list is advisory for the model; authoritative duplicate
/// suppression happens in the session loop. Returns the raw model text; the
/// caller parses and validates it.
///
/// # Errors
/// - [`StudyError::Json`] if the exclusion list cannot be serialized
/// - [`StudyError::Llm`] when the gateway call fails
pub async fn generate_question<C, S>(
    llm: &C,
    notes: &S,
    topic: &str,
    difficulty: Difficulty,
    excluded: &[String],
) -> Result<String, StudyError>
where
    C: Completion,
    S: ContextSource,
{
    let docs = notes.retrieve(topic, GENERATION_CONTEXT_K).await;
    let context = (!docs.is_empty()).then(|| docs.join("\n\n"));

    let prompt = build_question_prompt(difficulty, excluded)?;

    let raw = llm
        .complete(
            &[ChatMessage::user(prompt)],
            context.as_deref(),
            CompletionOptions {
                max_tokens: Some(512),
                temperature: Some(0.2),
            },
        )
        .await?;

    Ok(raw)
}
