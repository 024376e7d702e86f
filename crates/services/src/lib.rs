#![forbid(unsafe_code)]

pub mod error;
pub mod question_service;

pub use quiz_core::Clock;

pub use error::QuestionServiceError;
pub use question_service::QuestionService;
