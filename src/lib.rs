//! # Study Buddy
//!
//! A document study-aid backend: upload documents, extract their text, and
//! turn them into summaries, quizzes, flashcards, and study plans.
//!
//! Generation prefers a remote large-language-model call and falls back to
//! a deterministic local pipeline on any remote failure. The local pipeline
//! is the interesting part: sentence segmentation, centroid-based
//! extractive summarization over embeddings, and template-driven
//! quiz/flashcard/plan generation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────────┐   ┌─────────────────────────┐
//! │  Upload  │──▶│ Text Extractor │──▶│  In-memory DocumentStore │
//! │ PDF/PPTX │   │  (extract)     │   └──────────┬──────────────┘
//! └──────────┘   └───────────────┘              │
//!                                               ▼
//!                              ┌─────────────────────────────┐
//!                              │  Remote generator (Gemini)  │── ok ──▶ answer
//!                              │  any failure falls through  │
//!                              └──────────────┬──────────────┘
//!                                             ▼
//!                              ┌─────────────────────────────┐
//!                              │ Local pipeline: segment →   │
//!                              │ embed → summarize / styles  │──▶ answer
//!                              │ / quiz / flashcards / plan  │
//!                              └─────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! sbd serve                          # start the HTTP API
//! sbd summarize notes.pdf --style qa # summarize a file locally
//! sbd quiz notes.txt --count 5       # quiz from a file
//! sbd plan "Linear Algebra" --days 7 # deterministic study plan
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`segment`] | Sentence segmentation |
//! | [`embedding`] | Embedding provider abstraction |
//! | [`summarize`] | Centroid extractive summarizer |
//! | [`styles`] | Style-keyed local summary templates |
//! | [`quiz`] | Local quiz and flashcard generation |
//! | [`plan`] | Deterministic study-plan synthesis |
//! | [`generate`] | Remote generator capability |
//! | [`study`] | Dual-path orchestration (remote → local fallback) |
//! | [`extract`] | Document text extraction |
//! | [`store`] | In-memory document store and feedback log |
//! | [`server`] | HTTP API |

pub mod config;
pub mod embedding;
pub mod extract;
pub mod generate;
pub mod models;
pub mod plan;
pub mod quiz;
pub mod segment;
pub mod server;
pub mod store;
pub mod study;
pub mod styles;
pub mod summarize;
