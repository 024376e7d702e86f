use quiz_core::model::QuestionId;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{map_question_row, question_id_from_i64};
use crate::repository::{QuestionRecord, QuestionRepository, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn load_all(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, question_text, answer_text
            FROM questions
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(map_question_row(&row)?);
        }
        Ok(records)
    }

    async fn append(&self, text: &str, answer: &str) -> Result<QuestionId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO questions (question_text, answer_text)
            VALUES (?1, ?2)
            ",
        )
        .bind(text)
        .bind(answer)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        question_id_from_i64(res.last_insert_rowid())
    }

    async fn delete_at(&self, position: usize) -> Result<(), StorageError> {
        let offset = position.checked_sub(1).ok_or(StorageError::NotFound)?;
        let offset = i64::try_from(offset)
            .map_err(|_| StorageError::Serialization(format!("position overflow: {position}")))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        // Positions are not stored; the nth row in ascending id order is
        // the nth displayed question.
        let row = sqlx::query(
            r"
            SELECT id
            FROM questions
            ORDER BY id ASC
            LIMIT 1 OFFSET ?1
            ",
        )
        .bind(offset)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let Some(row) = row else {
            return Err(StorageError::NotFound);
        };
        let id: i64 = row.try_get("id").map_err(ser)?;

        sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM questions")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        log::info!("cleared the question bank");
        Ok(())
    }
}
