//! Dual-path study material generation.
//!
//! Every operation here composes a mode/style-specific instruction, tries
//! the remote generator when one is available, and on *any* failure —
//! timeout, HTTP error, malformed JSON — falls through to the local
//! deterministic pipeline. This fallback is the system's sole failure
//! recovery: a remote error is logged and absorbed, never returned.

use regex::Regex;

use crate::config::EmbeddingConfig;
use crate::generate::TextGenerator;
use crate::models::{Flashcard, QuizItem};
use crate::plan::study_plan;
use crate::quiz::{local_flashcards, local_quiz};
use crate::styles::local_styled_summary;

/// Per-document character budget for remote prompt context.
pub const REMOTE_CONTEXT_CHARS: usize = 4000;

// ============ Summaries ============

/// Produce a style-formatted summary, preferring the remote generator.
///
/// `context` is the (possibly truncated) text handed to the remote prompt;
/// `full_text` is what the local fallback formats. Keeping them separate
/// lets the boundary cap remote payload size without shortchanging the
/// local pipeline.
pub async fn styled_summary(
    generator: &dyn TextGenerator,
    embedding: &EmbeddingConfig,
    style: &str,
    context: &str,
    full_text: &str,
) -> String {
    if generator.is_available() {
        match generator.generate(&style_prompt(style, context)).await {
            Ok(answer) => return answer.trim().to_string(),
            Err(e) => eprintln!("remote summary failed, using local fallback: {e:#}"),
        }
    }
    local_styled_summary(embedding, style, full_text).await
}

/// Build the style-specific remote instruction.
fn style_prompt(style: &str, context: &str) -> String {
    match style {
        "simple" => format!(
            "You are a study assistant creating a SIMPLE SUMMARY.\n\n\
             STRICT REQUIREMENTS:\n\
             - Create EXACTLY 5 short bullet points\n\
             - Each bullet point should be 1-2 sentences maximum\n\
             - Focus on the most important concepts only\n\
             - Use simple, clear language\n\
             - Start each bullet with a relevant emoji\n\n\
             Context to summarize:\n{context}\n\n\
             Format your response as:\n\
             • [Emoji] [Short key point 1]\n\
             • [Emoji] [Short key point 2]\n\
             • [Emoji] [Short key point 3]\n\
             • [Emoji] [Short key point 4]\n\
             • [Emoji] [Short key point 5]"
        ),
        "detailed" => format!(
            "You are a study assistant creating a DETAILED COMPREHENSIVE SUMMARY.\n\n\
             STRICT REQUIREMENTS:\n\
             - Provide in-depth explanation with 3-4 main sections\n\
             - Each section should have a clear heading and 2-3 paragraphs of detailed explanation\n\
             - Include examples or definitions where relevant\n\
             - Total length should be 300-400 words\n\
             - Use markdown headers (##) for sections\n\
             - Include technical terms with explanations\n\n\
             Context to summarize:\n{context}\n\n\
             Format your response with clear sections and detailed explanations."
        ),
        "concept" => format!(
            "You are a study assistant creating a HIERARCHICAL CONCEPT MAP.\n\n\
             STRICT REQUIREMENTS:\n\
             - Create a multi-level bullet hierarchy showing topic relationships\n\
             - Use proper indentation to show parent-child relationships\n\
             - Include 1 main concept at the top\n\
             - 3-4 major subconcepts (indented once)\n\
             - 2-3 supporting details under each subconcept (indented twice)\n\
             - Use arrows (→) or dashes (-) to show connections\n\n\
             Context to summarize:\n{context}\n\n\
             Format as a hierarchical structure:\n\
             # Main Concept\n\
             \x20 - Major Subconcept 1\n\
             \x20   → Supporting detail\n\
             \x20 - Major Subconcept 2\n\
             \x20   → Supporting detail"
        ),
        "qa" => format!(
            "You are a study assistant creating a Q&A SUMMARY.\n\n\
             STRICT REQUIREMENTS:\n\
             - Generate EXACTLY 5 important questions\n\
             - Each question must be specific, start with What/Why/How/Explain,\n\
             \x20 and have a clear, comprehensive answer (2-4 sentences)\n\
             - Format each Q&A clearly with numbering\n\
             - Cover different aspects of the material\n\n\
             Context to summarize:\n{context}\n\n\
             Format your response as:\n\
             **Q1: [Question]**\n\
             A: [Detailed answer]\n\n\
             (Continue for all 5 questions)"
        ),
        "takeaways" => format!(
            "You are a study assistant creating KEY TAKEAWAYS.\n\n\
             STRICT REQUIREMENTS:\n\
             - List EXACTLY 10 essential learning points\n\
             - Each takeaway should be actionable or memorable, 1-2 sentences long,\n\
             \x20 and numbered clearly\n\
             - Mix concepts, facts, and practical insights\n\
             - Use bold text for emphasis on key terms\n\n\
             Context to summarize:\n{context}\n\n\
             Format your response as:\n\
             **Key Takeaways:**\n\n\
             1. [Important takeaway with **key term** bolded]\n\
             2. [Important takeaway with **key term** bolded]\n\
             ...\n\
             10. [Important takeaway with **key term** bolded]"
        ),
        _ => format!("Summarize the following content clearly and concisely:\n\n{context}"),
    }
}

// ============ Quizzes ============

/// Build up to `count` quiz items, preferring the remote generator.
///
/// The remote reply must be a JSON array of items; a reply that cannot be
/// parsed (directly or after salvaging the bracketed block) is treated the
/// same as a failed call.
pub async fn build_quiz(generator: &dyn TextGenerator, text: &str, count: usize) -> Vec<QuizItem> {
    if generator.is_available() {
        match generator.generate(&quiz_prompt(text, count)).await {
            Ok(reply) => match parse_json_array::<QuizItem>(&reply) {
                Some(items) => return items,
                None => eprintln!("remote quiz reply was not valid JSON, using local fallback"),
            },
            Err(e) => eprintln!("remote quiz failed, using local fallback: {e:#}"),
        }
    }
    local_quiz(text, count)
}

fn quiz_prompt(text: &str, count: usize) -> String {
    format!(
        "Generate {count} multiple choice questions (4 options each) based on the following content.\n\
         Return JSON strictly in this format:\n\
         [{{\"question\":\"...\", \"options\":[\"A\",\"B\",\"C\",\"D\"], \"answer\":\"A\"}}]\n\n\
         Content:\n{text}"
    )
}

// ============ Flashcards ============

/// Build flashcards, preferring the remote generator.
///
/// `count` is only a hint to the remote prompt; the local fallback always
/// caps at ten cards.
pub async fn build_flashcards(
    generator: &dyn TextGenerator,
    text: &str,
    count: usize,
) -> Vec<Flashcard> {
    if generator.is_available() {
        match generator.generate(&flashcard_prompt(text, count)).await {
            Ok(reply) => match parse_json_array::<Flashcard>(&reply) {
                Some(cards) => return cards,
                None => {
                    eprintln!("remote flashcard reply was not valid JSON, using local fallback")
                }
            },
            Err(e) => eprintln!("remote flashcards failed, using local fallback: {e:#}"),
        }
    }
    local_flashcards(text)
}

fn flashcard_prompt(text: &str, count: usize) -> String {
    format!(
        "Generate {count} flashcards from this content.\n\
         Return JSON: [{{\"front\":\"Question/Term\", \"back\":\"Answer/Definition\"}}]\n\n\
         Content:\n{text}"
    )
}

// ============ Study plans ============

/// Build a study plan, preferring the remote generator.
pub async fn build_plan(generator: &dyn TextGenerator, topic: &str, days: u32) -> String {
    if generator.is_available() {
        match generator.generate(&plan_prompt(topic, days)).await {
            Ok(answer) => return answer.trim().to_string(),
            Err(e) => eprintln!("remote study plan failed, using local fallback: {e:#}"),
        }
    }
    study_plan(topic, days)
}

fn plan_prompt(topic: &str, days: u32) -> String {
    format!(
        "Create a concise {days}-day study plan for: {topic}\n\n\
         Requirements:\n\
         - Be brief and actionable\n\
         - Use simple bullet points\n\
         - Each day should have a topic name, 3-4 key learning points, and 1-2 practice tasks\n\
         - Keep it under 500 words total\n\
         - Use emojis sparingly (only for day markers)\n\
         - NO markdown formatting (no **, no ###)\n\n\
         Format:\n\
         Day 1: [Topic Name]\n\
         • Learn: [Point 1]\n\
         • Learn: [Point 2]\n\
         • Practice: [Task]\n\n\
         Day 2: [Topic Name]\n\
         ...\n\n\
         End with 3 quick study tips."
    )
}

// ============ Remote reply parsing ============

/// Parse a JSON array out of a model reply.
///
/// Tries the whole reply first, then salvages the outermost `[...]` block
/// (models like to wrap JSON in prose or code fences). `None` means the
/// reply is unusable and the caller should fall back.
fn parse_json_array<T: serde::de::DeserializeOwned>(reply: &str) -> Option<Vec<T>> {
    if let Ok(items) = serde_json::from_str::<Vec<T>>(reply) {
        return Some(items);
    }
    let re = Regex::new(r"(?s)\[.*\]").ok()?;
    let block = re.find(reply)?;
    serde_json::from_str::<Vec<T>>(block.as_str()).ok()
}
