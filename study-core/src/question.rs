//! The multiple-choice question record, its validation, and the
//! option-shuffling step.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Option labels in canonical order.
pub const OPTION_LABELS: [char; 4] = ['a', 'b', 'c', 'd'];

/// One parsed multiple-choice question.
///
/// After validation every field is non-empty and `correct` names one of the
/// four option labels. The record is mutated exactly once, by
/// [`shuffle_options`], and is read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub a: String,
    pub b: String,
    pub c: String,
    pub d: String,
    /// One of `a`/`b`/`c`/`d` once validated.
    pub correct: String,
}

impl QuestionRecord {
    /// Option text for a label; empty for anything outside `a`–`d`.
    pub fn option(&self, label: char) -> &str {
        match label.to_ascii_lowercase() {
            'a' => &self.a,
            'b' => &self.b,
            'c' => &self.c,
            'd' => &self.d,
            _ => "",
        }
    }

    pub(crate) fn set_option(&mut self, label: char, text: String) {
        match label.to_ascii_lowercase() {
            'a' => self.a = text,
            'b' => self.b = text,
            'c' => self.c = text,
            'd' => self.d = text,
            _ => {}
        }
    }

    /// True iff the question, all four options and the correct label are
    /// non-empty. No semantic validation beyond that.
    pub fn is_valid(&self) -> bool {
        !self.question.is_empty()
            && !self.a.is_empty()
            && !self.b.is_empty()
            && !self.c.is_empty()
            && !self.d.is_empty()
            && !self.correct.is_empty()
    }
}

/// Case-insensitive comparison of a user's answer label against the record.
pub fn check_answer(record: &QuestionRecord, user_answer: &str) -> bool {
    user_answer.eq_ignore_ascii_case(&record.correct)
}

/// Randomly permute the four options and re-point `correct` at the label now
/// holding the originally-correct text.
///
/// This decorrelates the model's own letter bias from the label the end user
/// sees. When the originally-correct text cannot be relocated by exact match
/// (duplicate option texts), `correct` falls back to a uniform-random label.
/// Later duplicates win the relocation, matching the parser's
/// last-match-wins handling of duplicate option labels.
pub(crate) fn shuffle_options<R: Rng + ?Sized>(record: &mut QuestionRecord, rng: &mut R) {
    let correct_label = record.correct.chars().next().unwrap_or('a');
    let correct_text = record.option(correct_label).to_string();

    let mut pairs: Vec<(char, String)> = OPTION_LABELS
        .iter()
        .map(|&l| (l, record.option(l).to_string()))
        .collect();
    pairs.shuffle(rng);

    let mut new_correct: Option<char> = None;
    for (idx, (_, text)) in pairs.iter().enumerate() {
        if *text == correct_text {
            new_correct = Some(OPTION_LABELS[idx]);
        }
    }
    for (idx, (_, text)) in pairs.into_iter().enumerate() {
        record.set_option(OPTION_LABELS[idx], text);
    }

    record.correct = match new_correct {
        Some(label) => label.to_string(),
        None => OPTION_LABELS[rng.gen_range(0..OPTION_LABELS.len())].to_string(),
    };
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn record() -> QuestionRecord {
        QuestionRecord {
            question: "What is 2+2?".into(),
            a: "3".into(),
            b: "4".into(),
            c: "5".into(),
            d: "6".into(),
            correct: "b".into(),
        }
    }

    #[test]
    fn shuffle_is_a_bijection_and_tracks_correct_text() {
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut q = record();
            shuffle_options(&mut q, &mut rng);

            let before: BTreeSet<&str> = ["3", "4", "5", "6"].into();
            let after: BTreeSet<&str> = OPTION_LABELS.iter().map(|&l| q.option(l)).collect();
            assert_eq!(before, after);

            let correct_label = q.correct.chars().next().unwrap();
            assert_eq!(q.option(correct_label), "4");
        }
    }

    #[test]
    fn shuffle_with_duplicate_correct_text_still_yields_a_label() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut q = record();
        q.c = "4".into(); // duplicate of the correct text
        shuffle_options(&mut q, &mut rng);
        assert!(OPTION_LABELS.contains(&q.correct.chars().next().unwrap()));
        assert_eq!(q.option(q.correct.chars().next().unwrap()), "4");
    }

    #[test]
    fn check_answer_is_case_insensitive() {
        let q = record();
        assert!(check_answer(&q, "B"));
        assert!(check_answer(&q, "b"));
        assert!(!check_answer(&q, "a"));
    }

    #[test]
    fn validation_rejects_any_empty_field() {
        assert!(record().is_valid());
        let mut q = record();
        q.c.clear();
        assert!(!q.is_valid());
        let mut q = record();
        q.correct.clear();
        assert!(!q.is_valid());
        assert!(!QuestionRecord::default().is_valid());
    }
}
