//! Quiz assembly: the retry/acceptance loop around generate → parse →
//! validate → dedup.

use std::collections::HashSet;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::StudyError;
use crate::generator::generate_question;
use crate::parser::parse_question;
use crate::prompt::Difficulty;
use crate::question::QuestionRecord;
use crate::traits::{Completion, ContextSource};

/// Attempt budget per question slot.
pub const MAX_ATTEMPTS_PER_QUESTION: usize = 8;

/// Lowercase hex SHA-256 of a question text.
pub fn hash_text(s: &str) -> String {
    let mut h = Sha256::new();
    h.update(s.as_bytes());
    format!("{:x}", h.finalize())
}

/// Append-only set of accepted question texts for one quiz session.
///
/// Membership is checked by exact trimmed text and by content hash,
/// redundantly. Discarded with the session.
#[derive(Debug, Default)]
pub struct UsedQuestionSet {
    texts: Vec<String>,
    hashes: HashSet<String>,
}

impl UsedQuestionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `question` (trimmed) was already accepted this session.
    pub fn contains(&self, question: &str) -> bool {
        let trimmed = question.trim();
        self.texts.iter().any(|t| t == trimmed) || self.hashes.contains(&hash_text(trimmed))
    }

    pub fn insert(&mut self, question: &str) {
        let trimmed = question.trim().to_string();
        self.hashes.insert(hash_text(&trimmed));
        self.texts.push(trimmed);
    }

    /// Accepted question texts in acceptance order (fed back into the
    /// generation prompt as the exclusion list).
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Assemble `num_questions` unique, validated questions for one session.
///
/// Each slot gets up to [`MAX_ATTEMPTS_PER_QUESTION`] attempts; a failed
/// gateway call, unparseable output, or a duplicate all consume one attempt.
/// An exhausted slot is logged and later slots still run; only a fully empty
/// result is an error.
///
/// # Errors
/// [`StudyError::QuizExhausted`] when not a single question was accepted.
pub async fn assemble_quiz<C, S>(
    llm: &C,
    notes: &S,
    topic: &str,
    difficulty: Difficulty,
    num_questions: usize,
) -> Result<Vec<QuestionRecord>, StudyError>
where
    C: Completion,
    S: ContextSource,
{
    let mut used = UsedQuestionSet::new();
    let mut questions: Vec<QuestionRecord> = Vec::with_capacity(num_questions);

    for slot in 0..num_questions {
        let mut accepted = false;

        for attempt in 0..MAX_ATTEMPTS_PER_QUESTION {
            let raw = match generate_question(llm, notes, topic, difficulty, used.texts()).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(slot, attempt, error = %e, "generation attempt failed");
                    continue;
                }
            };

            let parsed = parse_question(&raw);
            if !parsed.is_valid() {
                debug!(slot, attempt, "model output did not parse into a full question");
                continue;
            }
            if used.contains(&parsed.question) {
                debug!(slot, attempt, "duplicate question rejected");
                continue;
            }

            used.insert(&parsed.question);
            questions.push(parsed);
            accepted = true;
            break;
        }

        if !accepted {
            warn!(
                slot,
                topic, "attempt budget exhausted without a valid, unique question"
            );
        }
    }

    if questions.is_empty() {
        return Err(StudyError::QuizExhausted);
    }

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockCompletion, MockSource};

    const RAW_ONE: &str = "Question: First?\na) 1\nb) 2\nc) 3\nd) 4\nCorrect: a";
    const RAW_TWO: &str = "Question: Second?\na) 1\nb) 2\nc) 3\nd) 4\nCorrect: b";

    #[test]
    fn used_set_matches_by_text_and_hash() {
        let mut used = UsedQuestionSet::new();
        assert!(used.is_empty());
        used.insert("  What is ohm's law?  ");
        assert_eq!(used.len(), 1);
        assert!(used.contains("What is ohm's law?"));
        assert!(used.contains("  What is ohm's law?\n"));
        assert!(!used.contains("What is watt's law?"));
    }

    #[tokio::test]
    async fn duplicates_are_rejected_within_a_session() {
        let llm = MockCompletion::scripted(vec![RAW_ONE, RAW_ONE, RAW_TWO]);
        let notes = MockSource::with_chunks(vec!["ohm's law".into()]);

        let questions = assemble_quiz(&llm, &notes, "circuits", Difficulty::Medium, 2)
            .await
            .unwrap();

        assert_eq!(questions.len(), 2);
        assert_ne!(questions[0].question, questions[1].question);
        assert_eq!(questions[0].question, "First?");
        assert_eq!(questions[1].question, "Second?");
    }

    #[tokio::test]
    async fn exhausted_slot_does_not_block_later_slots() {
        // Slot 0 accepts; slot 1 sees only duplicates for its whole budget.
        let mut script = vec![RAW_ONE];
        script.extend(std::iter::repeat(RAW_ONE).take(MAX_ATTEMPTS_PER_QUESTION));
        let llm = MockCompletion::scripted(script);
        let notes = MockSource::with_chunks(vec!["notes".into()]);

        let questions = assemble_quiz(&llm, &notes, "circuits", Difficulty::Easy, 2)
            .await
            .unwrap();

        assert_eq!(questions.len(), 1);
    }

    #[tokio::test]
    async fn fully_unusable_output_fails_the_quiz() {
        let llm = MockCompletion::scripted(vec!["not a question at all"]);
        let notes = MockSource::with_chunks(vec![]);

        let err = assemble_quiz(&llm, &notes, "anything", Difficulty::Hard, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, StudyError::QuizExhausted));
    }

    #[tokio::test]
    async fn accepted_questions_feed_the_exclusion_prompt() {
        let llm = MockCompletion::scripted(vec![RAW_ONE, RAW_TWO]);
        let notes = MockSource::with_chunks(vec!["chunk".into()]);

        assemble_quiz(&llm, &notes, "topic", Difficulty::Medium, 2)
            .await
            .unwrap();

        // The second generation call must carry the first accepted question
        // in its exclusion list.
        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("[]"));
        assert!(prompts[1].contains("First?"));
    }
}
