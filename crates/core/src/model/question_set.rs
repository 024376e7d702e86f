use thiserror::Error;

use crate::model::question::Question;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionSetError {
    #[error("position {position} is out of range (valid: 1..={size})")]
    OutOfRange { position: usize, size: usize },
}

//
// ─── QUESTION SET ──────────────────────────────────────────────────────────────
//

/// Ordered collection of questions.
///
/// Display positions are derived from the current order (`index + 1`), so
/// deleting an entry renumbers everything after it and positions stay dense
/// and contiguous from 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a question at the last position.
    pub fn push(&mut self, question: Question) {
        self.questions.push(question);
    }

    /// Removes the question at the given 1-based position and returns it.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSetError::OutOfRange` if `position` is zero or past
    /// the end; the set is left unchanged in that case.
    pub fn delete(&mut self, position: usize) -> Result<Question, QuestionSetError> {
        if position < 1 || position > self.questions.len() {
            return Err(QuestionSetError::OutOfRange {
                position,
                size: self.questions.len(),
            });
        }
        Ok(self.questions.remove(position - 1))
    }

    /// Listing of `(position, question)` pairs in display order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &Question)> {
        self.questions.iter().enumerate().map(|(i, q)| (i + 1, q))
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn clear(&mut self) {
        self.questions.clear();
    }
}

impl FromIterator<Question> for QuestionSet {
    fn from_iter<I: IntoIterator<Item = Question>>(iter: I) -> Self {
        Self {
            questions: iter.into_iter().collect(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
