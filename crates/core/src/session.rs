use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{Question, QuestionSet};

/// A session passes only when its score is strictly above this percentage.
/// 75.00% exactly does not pass.
pub const PASS_THRESHOLD_PERCENT: f64 = 75.0;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot start a quiz with no questions")]
    EmptyQuestionSet,

    #[error("every question has already been answered")]
    AlreadyComplete,

    #[error("{remaining} questions are still unanswered")]
    Incomplete { remaining: usize },
}

//
// ─── PROGRESS & OUTCOME ────────────────────────────────────────────────────────
//

/// Aggregated view of how far a session has progressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

/// Pass/fail outcome of a scored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    NeedsPractice,
}

/// Final result of a completed quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    total: usize,
    correct: usize,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl ScoreReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Score as a percentage. The start guard keeps `total >= 1`, so the
    /// division is always defined.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        (self.correct as f64 / self.total as f64) * 100.0
    }

    /// Percentage formatted for display, always with two decimal places.
    #[must_use]
    pub fn percentage_text(&self) -> String {
        format!("{:.2}", self.percentage())
    }

    #[must_use]
    pub fn verdict(&self) -> Verdict {
        if self.percentage() > PASS_THRESHOLD_PERCENT {
            Verdict::Pass
        } else {
            Verdict::NeedsPractice
        }
    }
}

//
// ─── QUIZ SESSION ──────────────────────────────────────────────────────────────
//

/// One full scoring pass over a snapshot of the question set.
///
/// The snapshot is taken at [`QuizSession::start`], so the session order is
/// the set's display order at that moment; mutating the set afterwards does
/// not affect a running session. Questions are answered strictly in order
/// and the session runs to completion — there is no pause or cancellation.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    answered: usize,
    correct: usize,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Starts a session over a snapshot of `set`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyQuestionSet` if the set has no questions;
    /// callers must not prompt for any answers in that case.
    pub fn start(set: &QuestionSet, now: DateTime<Utc>) -> Result<Self, SessionError> {
        if set.is_empty() {
            return Err(SessionError::EmptyQuestionSet);
        }
        Ok(Self {
            questions: set.questions().to_vec(),
            answered: 0,
            correct: 0,
            started_at: now,
        })
    }

    /// The next unanswered question with its 1-based position, or `None`
    /// once every question has been answered.
    #[must_use]
    pub fn current(&self) -> Option<(usize, &Question)> {
        self.questions
            .get(self.answered)
            .map(|q| (self.answered + 1, q))
    }

    /// Grades one answer against the current question and advances.
    ///
    /// Returns whether the answer was accepted.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyComplete` if there is nothing left to
    /// answer.
    pub fn answer(&mut self, given: &str) -> Result<bool, SessionError> {
        let Some(question) = self.questions.get(self.answered) else {
            return Err(SessionError::AlreadyComplete);
        };
        let accepted = question.accepts(given);
        if accepted {
            self.correct += 1;
        }
        self.answered += 1;
        Ok(accepted)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.questions.len(),
            answered: self.answered,
            remaining: self.questions.len() - self.answered,
            is_complete: self.is_complete(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answered == self.questions.len()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Consumes the session and produces its score report.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Incomplete` if questions remain unanswered.
    pub fn finish(self, now: DateTime<Utc>) -> Result<ScoreReport, SessionError> {
        let remaining = self.questions.len() - self.answered;
        if remaining > 0 {
            return Err(SessionError::Incomplete { remaining });
        }
        Ok(ScoreReport {
            total: self.questions.len(),
            correct: self.correct,
            started_at: self.started_at,
            completed_at: now,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;
    use crate::time::fixed_now;

    fn sample_set(pairs: &[(&str, &str)]) -> QuestionSet {
        pairs
            .iter()
            .map(|(text, answer)| Question::new(*text, *answer).unwrap())
            .collect()
    }

    fn run(pairs: &[(&str, &str)], answers: &[&str]) -> ScoreReport {
        let set = sample_set(pairs);
        let mut session = QuizSession::start(&set, fixed_now()).unwrap();
        for given in answers {
            session.answer(given).unwrap();
        }
        session.finish(fixed_now()).unwrap()
    }

    #[test]
    fn empty_set_cannot_start() {
        let set = QuestionSet::new();
        let err = QuizSession::start(&set, fixed_now()).unwrap_err();
        assert_eq!(err, SessionError::EmptyQuestionSet);
    }

    #[test]
    fn all_correct_scores_one_hundred() {
        let report = run(
            &[("2+2?", "4"), ("Capital of France?", "Paris")],
            &["4", "paris"],
        );
        assert_eq!(report.correct(), 2);
        assert_eq!(report.percentage_text(), "100.00");
        assert_eq!(report.verdict(), Verdict::Pass);
    }

    #[test]
    fn half_correct_scores_fifty() {
        let report = run(
            &[("2+2?", "4"), ("Capital of France?", "Paris")],
            &["4", "Lyon"],
        );
        assert_eq!(report.correct(), 1);
        assert_eq!(report.percentage_text(), "50.00");
        assert_eq!(report.verdict(), Verdict::NeedsPractice);
    }

    #[test]
    fn zero_correct_scores_zero() {
        let report = run(&[("2+2?", "4")], &["5"]);
        assert_eq!(report.percentage_text(), "0.00");
        assert_eq!(report.verdict(), Verdict::NeedsPractice);
    }

    #[test]
    fn exactly_seventy_five_percent_does_not_pass() {
        let report = run(
            &[("a?", "1"), ("b?", "2"), ("c?", "3"), ("d?", "4")],
            &["1", "2", "3", "wrong"],
        );
        assert_eq!(report.percentage_text(), "75.00");
        assert_eq!(report.verdict(), Verdict::NeedsPractice);
    }

    #[test]
    fn just_above_threshold_passes() {
        let report = run(
            &[("a?", "1"), ("b?", "2"), ("c?", "3"), ("d?", "4"), ("e?", "5")],
            &["1", "2", "3", "4", "wrong"],
        );
        assert_eq!(report.percentage_text(), "80.00");
        assert_eq!(report.verdict(), Verdict::Pass);
    }

    #[test]
    fn questions_come_back_in_set_order() {
        let set = sample_set(&[("first?", "1"), ("second?", "2"), ("third?", "3")]);
        let mut session = QuizSession::start(&set, fixed_now()).unwrap();

        let mut seen = Vec::new();
        while let Some((position, question)) = session.current() {
            seen.push((position, question.text().to_owned()));
            session.answer("whatever").unwrap();
        }
        assert_eq!(
            seen,
            vec![
                (1, "first?".to_owned()),
                (2, "second?".to_owned()),
                (3, "third?".to_owned()),
            ]
        );
    }

    #[test]
    fn session_snapshot_ignores_later_set_mutation() {
        let mut set = sample_set(&[("a?", "1"), ("b?", "2")]);
        let mut session = QuizSession::start(&set, fixed_now()).unwrap();
        set.delete(1).unwrap();

        session.answer("1").unwrap();
        session.answer("2").unwrap();
        let report = session.finish(fixed_now()).unwrap();
        assert_eq!(report.total(), 2);
        assert_eq!(report.percentage_text(), "100.00");
    }

    #[test]
    fn answering_past_the_end_is_rejected() {
        let set = sample_set(&[("a?", "1")]);
        let mut session = QuizSession::start(&set, fixed_now()).unwrap();
        session.answer("1").unwrap();
        let err = session.answer("1").unwrap_err();
        assert_eq!(err, SessionError::AlreadyComplete);
    }

    #[test]
    fn finishing_early_is_rejected() {
        let set = sample_set(&[("a?", "1"), ("b?", "2")]);
        let mut session = QuizSession::start(&set, fixed_now()).unwrap();
        session.answer("1").unwrap();
        let err = session.finish(fixed_now()).unwrap_err();
        assert_eq!(err, SessionError::Incomplete { remaining: 1 });
    }

    #[test]
    fn progress_tracks_the_cursor() {
        let set = sample_set(&[("a?", "1"), ("b?", "2")]);
        let mut session = QuizSession::start(&set, fixed_now()).unwrap();

        let progress = session.progress();
        assert_eq!(progress.total, 2);
        assert_eq!(progress.answered, 0);
        assert_eq!(progress.remaining, 2);
        assert!(!progress.is_complete);

        session.answer("1").unwrap();
        session.answer("2").unwrap();
        let progress = session.progress();
        assert_eq!(progress.answered, 2);
        assert_eq!(progress.remaining, 0);
        assert!(progress.is_complete);
    }
}
