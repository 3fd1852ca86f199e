//! Prompt builders: fixed instruction strings plus compact format contracts.
//!
//! Keep these short and literal: the downstream parser depends on the exact
//! output contract named in the question prompt.

use serde::{Deserialize, Serialize};

/// How many previously accepted question texts are embedded into the
/// exclusion list of the generation prompt.
pub const MAX_EXCLUDED_IN_PROMPT: usize = 10;

/// Requested difficulty of a generated question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Display name used inside prompts and API payloads.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// The difficulty-specific generation instruction.
    pub fn instruction(&self) -> &'static str {
        match self {
            Difficulty::Easy => {
                "Create a simple recall-based MCQ about a concrete fact. Keep wording simple."
            }
            Difficulty::Medium => {
                "Create a conceptual MCQ that tests understanding, not mere recall."
            }
            Difficulty::Hard => {
                "Create an analytical/application MCQ that requires reasoning from the context."
            }
        }
    }
}

/// Build the strict-format question-generation prompt.
///
/// Embeds the difficulty instruction, a JSON list of the most recent
/// [`MAX_EXCLUDED_IN_PROMPT`] excluded question texts, and the exact output
/// contract the parser expects. The exclusion list is advisory only; the
/// session loop enforces uniqueness authoritatively.
///
/// # Errors
/// Returns a JSON error if the exclusion list cannot be serialized.
pub fn build_question_prompt(
    difficulty: Difficulty,
    excluded: &[String],
) -> Result<String, serde_json::Error> {
    let recent = &excluded[excluded.len().saturating_sub(MAX_EXCLUDED_IN_PROMPT)..];
    let used_json = serde_json::to_string(recent)?;

    Ok(format!(
        r#"You are an ASSISTANT that must output EXACTLY one multiple-choice question in this strict format.
Do not add anything else.

Difficulty: {difficulty}
Instruction: {instruction}

ADDITIONAL RULES:
- DO NOT repeat any question present in this JSON list (most recent first): {used_json}
- Randomize which letter (a/b/c/d) is the correct option.
- The correct option must be supported by the CONTEXT provided.
- Provide plausible distractors for other options.
- Output must use this exact format (with newlines):
Question: <your question text>
a) <option a text>
b) <option b text>
c) <option c text>
d) <option d text>
Correct: <a|b|c|d>

Context:
(Use only the context to generate the question.)
"#,
        difficulty = difficulty.label(),
        instruction = difficulty.instruction(),
    ))
}

/// Prompt asking the model to refine its previous answer.
pub fn build_follow_up_prompt(question: &str, last_answer: &str) -> String {
    format!(
        r#"You are a tutor. The user previously asked and you answered:

Previous assistant answer:
{last_answer}

Now the user asks (follow-up): {question}

Task: Improve, clarify, or simplify the previous answer. Correct any errors if present.
Keep it concise (2-4 sentences).
"#
    )
}

/// Prompt asking the model to answer a fresh question from the notes.
pub fn build_fresh_doubt_prompt(question: &str) -> String {
    format!(
        r#"You are a helpful tutor. Use the provided context (if any) to answer the user's question concisely.
If the answer is not present in the context, say: "I can't find that in your notes."
User Question: {question}

Answer in 2-4 sentences and, when helpful, give one brief supporting detail or example.
"#
    )
}

/// Prompt that reduces one text window to 3–5 bullets.
pub fn build_window_summary_prompt(window: &str) -> String {
    format!(
        r#"You are an expert summarizer. Summarize the following text into 3-5 concise bullets.
Text:
{window}
"#
    )
}

/// Prompt that synthesizes the final summary from all partial summaries.
pub fn build_final_summary_prompt(combined: &str, brief: bool) -> String {
    let final_instruction = if brief {
        "Create a brief summary containing exactly 5 bullet points.".to_string()
    } else {
        "Create a detailed structured summary with headings and subpoints. \
         Include major themes, key definitions, important examples, and explanations."
            .to_string()
    };

    format!(
        r#"You are an expert summarizer.

Here are summaries of all chunks:
{combined}

TASK:
{final_instruction}

Write the final summary below:
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_prompt_embeds_last_ten_exclusions() {
        let excluded: Vec<String> = (0..15).map(|i| format!("q{i}")).collect();
        let prompt = build_question_prompt(Difficulty::Medium, &excluded).unwrap();
        assert!(!prompt.contains("\"q4\""));
        assert!(prompt.contains("\"q5\""));
        assert!(prompt.contains("\"q14\""));
        assert!(prompt.contains("Correct: <a|b|c|d>"));
        assert!(prompt.contains(Difficulty::Medium.instruction()));
    }

    #[test]
    fn difficulty_deserializes_from_api_strings() {
        let d: Difficulty = serde_json::from_str("\"Hard\"").unwrap();
        assert_eq!(d, Difficulty::Hard);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }
}
