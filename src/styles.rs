//! Style-keyed local summary templates.
//!
//! The deterministic counterpart of the remote style prompts: each template
//! formats a fixed-position slice of the sentence sequence. These are
//! intentionally crude — no ranking beyond what `detailed` borrows from the
//! extractive summarizer — trading summary quality for determinism and zero
//! external dependency. Do not "improve" the selection without also
//! changing the remote prompts and the documented contract.

use crate::config::EmbeddingConfig;
use crate::segment::split_sentences;
use crate::summarize::extractive_summary;

/// Truncate to at most `n` characters (Unicode codepoints, not bytes).
///
/// Byte slicing would panic on multi-byte boundaries; display truncation
/// here counts codepoints the way the formats were originally defined.
pub fn truncate_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Produce a style-formatted summary without any remote call.
///
/// Style keys: `simple`, `detailed`, `concept`, `qa`, `takeaways`. Any
/// other key falls back to a generic six-sentence extractive summary.
pub async fn local_styled_summary(config: &EmbeddingConfig, style: &str, text: &str) -> String {
    match style {
        "simple" => {
            let sents = split_sentences(text);
            let bullets: Vec<String> = sents
                .iter()
                .take(5)
                .map(|s| format!("• {}", s))
                .collect();
            format!("**Simple Summary:**\n\n{}", bullets.join("\n"))
        }
        "detailed" => {
            let summary = extractive_summary(config, text, 10).await;
            format!(
                "**Detailed Summary:**\n\n{}\n\n*Note: This is a local fallback. For better results, configure the Gemini API.*",
                summary
            )
        }
        "concept" => {
            let sents = split_sentences(text);
            let mut map = String::from("**Concept Map:**\n\n# Main Topic\n");
            for (i, s) in sents.iter().take(8).enumerate() {
                if i % 2 == 0 {
                    map.push_str(&format!("  - {}...\n", truncate_chars(s, 80)));
                } else {
                    map.push_str(&format!("    → {}...\n", truncate_chars(s, 60)));
                }
            }
            map
        }
        "qa" => {
            let sents = split_sentences(text);
            let mut out = String::from("**Q&A Summary:**\n\n");
            for (i, s) in sents.iter().take(5).enumerate() {
                out.push_str(&format!(
                    "**Q{}: What about {}...?**\n",
                    i + 1,
                    truncate_chars(s, 40)
                ));
                out.push_str(&format!("A: {}\n\n", s));
            }
            out
        }
        "takeaways" => {
            let sents = split_sentences(text);
            let numbered: Vec<String> = sents
                .iter()
                .take(10)
                .enumerate()
                .map(|(i, s)| format!("{}. {}", i + 1, s))
                .collect();
            format!("**Key Takeaways:**\n\n{}", numbered.join("\n"))
        }
        _ => extractive_summary(config, text, 6).await,
    }
}
