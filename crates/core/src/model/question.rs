use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("answer cannot be empty")]
    EmptyAnswer,
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question/answer input, as collected from the user or
/// rehydrated from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub answer: String,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(text: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            answer: answer.into(),
        }
    }

    /// Trims both fields and checks they are non-empty.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` or `QuestionError::EmptyAnswer` if
    /// either field is empty or whitespace-only.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }
        let answer = self.answer.trim();
        if answer.is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }

        Ok(Question {
            text: text.to_owned(),
            answer: answer.to_owned(),
        })
    }
}

/// A single question with its expected answer.
///
/// Immutable once created; the only way to build one is through
/// [`QuestionDraft::validate`] or the [`Question::new`] shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    answer: String,
}

impl Question {
    /// Validates and builds a question in one step.
    ///
    /// # Errors
    ///
    /// Same as [`QuestionDraft::validate`].
    pub fn new(
        text: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        QuestionDraft::new(text, answer).validate()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Whether `given` matches the expected answer.
    ///
    /// Comparison is case-insensitive (Unicode lowercasing); surrounding
    /// whitespace on the given answer is ignored.
    #[must_use]
    pub fn accepts(&self, given: &str) -> bool {
        given.trim().to_lowercase() == self.answer.to_lowercase()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_rejects_empty_text() {
        let err = QuestionDraft::new("   ", "4").validate().unwrap_err();
        assert_eq!(err, QuestionError::EmptyText);
    }

    #[test]
    fn draft_rejects_empty_answer() {
        let err = QuestionDraft::new("2+2?", " ").validate().unwrap_err();
        assert_eq!(err, QuestionError::EmptyAnswer);
    }

    #[test]
    fn draft_trims_both_fields() {
        let question = QuestionDraft::new("  2+2?  ", "  4 ").validate().unwrap();
        assert_eq!(question.text(), "2+2?");
        assert_eq!(question.answer(), "4");
    }

    #[test]
    fn accepts_is_case_insensitive() {
        let question = Question::new("Capital of France?", "Paris").unwrap();
        assert!(question.accepts("paris"));
        assert!(question.accepts("PARIS"));
        assert!(question.accepts("Paris"));
        assert!(!question.accepts("Lyon"));
    }

    #[test]
    fn accepts_ignores_surrounding_whitespace() {
        let question = Question::new("2+2?", "4").unwrap();
        assert!(question.accepts(" 4 "));
        assert!(question.accepts("4\n"));
    }

    #[test]
    fn accepts_folds_non_ascii_case() {
        let question = Question::new("Largest city in Turkey?", "İstanbul").unwrap();
        assert!(question.accepts("İSTANBUL"));
    }
}
