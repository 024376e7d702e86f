use async_trait::async_trait;
use quiz_core::model::{Question, QuestionError, QuestionId};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for a question row.
///
/// This mirrors the domain `Question` plus the storage identifier, so
/// repositories can serialize/deserialize without leaking storage concerns
/// into the domain layer. The identifier never drives display positions;
/// those are derived from load order.
#[derive(Debug, Clone)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub text: String,
    pub answer: String,
}

impl QuestionRecord {
    /// Convert the record back into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the persisted text or answer fails
    /// validation.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        Question::new(self.text, self.answer)
    }
}

/// Repository contract for the question bank.
///
/// Positions are 1-based and refer to the current storage order, which is
/// ascending identifier order and therefore matches insertion order.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Fetch every question in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the bank cannot be read.
    async fn load_all(&self) -> Result<Vec<QuestionRecord>, StorageError>;

    /// Persist a new question at the end of the bank.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the question cannot be stored.
    async fn append(&self, text: &str, answer: &str) -> Result<QuestionId, StorageError>;

    /// Delete the question at the given 1-based position.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no row exists at that position,
    /// or other storage errors.
    async fn delete_at(&self, position: usize) -> Result<(), StorageError>;

    /// Delete every question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the bank cannot be cleared.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    inner: Arc<Mutex<InMemoryInner>>,
}

#[derive(Default)]
struct InMemoryInner {
    next_id: u64,
    rows: Vec<QuestionRecord>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn load_all(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.rows.clone())
    }

    async fn append(&self, text: &str, answer: &str) -> Result<QuestionId, StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.next_id += 1;
        let id = QuestionId::new(guard.next_id);
        guard.rows.push(QuestionRecord {
            id,
            text: text.to_owned(),
            answer: answer.to_owned(),
        });
        Ok(id)
    }

    async fn delete_at(&self, position: usize) -> Result<(), StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if position < 1 || position > guard.rows.len() {
            return Err(StorageError::NotFound);
        }
        guard.rows.remove(position - 1);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.rows.clear();
        // Fresh banks hand out identifiers from 1 again, like the SQLite
        // backend's sequence reset.
        guard.next_id = 0;
        Ok(())
    }
}

/// Aggregates the question repository behind a trait object for easy backend
/// swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            questions: Arc::new(InMemoryRepository::new()),
        }
    }
}
