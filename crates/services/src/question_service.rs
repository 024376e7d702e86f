use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{Question, QuestionDraft, QuestionSet, QuestionSetError};
use quiz_core::session::{QuizSession, ScoreReport};
use storage::repository::QuestionRepository;

use crate::error::QuestionServiceError;

/// Orchestrates the in-memory question set against its backing store.
///
/// Every mutation commits to storage first and only then updates the
/// in-memory set, so a storage failure leaves the set exactly as it was.
pub struct QuestionService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    #[must_use]
    pub fn new(clock: Clock, questions: Arc<dyn QuestionRepository>) -> Self {
        Self { clock, questions }
    }

    /// Rehydrates the full bank into an ordered set.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the bank cannot be read, or a question
    /// error if a persisted row no longer validates.
    pub async fn load_set(&self) -> Result<QuestionSet, QuestionServiceError> {
        let records = self.questions.load_all().await?;
        let mut set = QuestionSet::new();
        for record in records {
            set.push(record.into_question()?);
        }
        Ok(set)
    }

    /// Validates a draft, persists it, then appends it to the set.
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty text/answer, or a storage error
    /// if the append does not commit (the set is unchanged in both cases).
    pub async fn add_question(
        &self,
        set: &mut QuestionSet,
        draft: QuestionDraft,
    ) -> Result<(), QuestionServiceError> {
        let question = draft.validate()?;
        let id = self
            .questions
            .append(question.text(), question.answer())
            .await?;
        log::debug!("stored question {id}");
        set.push(question);
        Ok(())
    }

    /// Deletes the question at a 1-based display position from the store and
    /// the set, returning the removed question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSetError::OutOfRange` before any side effect if the
    /// position is invalid, or a storage error if the delete does not commit.
    pub async fn delete_question(
        &self,
        set: &mut QuestionSet,
        position: usize,
    ) -> Result<Question, QuestionServiceError> {
        if position < 1 || position > set.len() {
            return Err(QuestionSetError::OutOfRange {
                position,
                size: set.len(),
            }
            .into());
        }
        self.questions.delete_at(position).await?;
        Ok(set.delete(position)?)
    }

    /// Empties the bank and the set.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the clear does not commit; the set is
    /// unchanged in that case.
    pub async fn clear(&self, set: &mut QuestionSet) -> Result<(), QuestionServiceError> {
        self.questions.clear().await?;
        set.clear();
        Ok(())
    }

    /// Starts a quiz over a snapshot of the set.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyQuestionSet` if the set is empty.
    pub fn start_quiz(&self, set: &QuestionSet) -> Result<QuizSession, QuestionServiceError> {
        Ok(QuizSession::start(set, self.clock.now())?)
    }

    /// Completes a session and stamps the report with the service clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Incomplete` if questions remain unanswered.
    pub fn finish_quiz(&self, session: QuizSession) -> Result<ScoreReport, QuestionServiceError> {
        Ok(session.finish(self.clock.now())?)
    }
}
