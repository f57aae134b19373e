//! Core data types that flow through the study pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An uploaded document held in the in-memory store. Immutable once created.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub text: String,
}

/// Listing entry for a stored document (id + display name only).
#[derive(Debug, Clone, Serialize)]
pub struct DocumentInfo {
    pub id: String,
    pub name: String,
}

/// A multiple-choice quiz item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

/// A two-sided flashcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// One entry in the append-only feedback log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub feature: String,
    pub item_name: String,
    pub thumbs_up: i64,
    pub rating: i64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}
