//! Centroid-based extractive summarization.
//!
//! Picks the sentences closest to the mean of all sentence embedding
//! vectors. Selection order never leaks into the output: whatever the
//! scores, the chosen sentences come back in source order.

use crate::config::EmbeddingConfig;
use crate::embedding::embed_texts;
use crate::segment::split_sentences;

/// Guards the cosine denominator against zero-norm vectors.
const SCORE_EPSILON: f32 = 1e-9;

/// Summarize `text` down to at most `n` sentences, newline-joined.
///
/// Texts with `n` or fewer sentences are returned whole, in order, without
/// touching the embedding provider. Otherwise each sentence is scored by
/// cosine similarity to the centroid of all sentence vectors and the top
/// `n` are kept, ties broken by lower source index.
///
/// An embedding failure is absorbed: the summary degrades to the first `n`
/// sentences and the error is logged. The local pipeline never fails here.
pub async fn extractive_summary(config: &EmbeddingConfig, text: &str, n: usize) -> String {
    let sents = split_sentences(text);
    if sents.len() <= n {
        return sents.join("\n");
    }

    let vectors = match embed_texts(config, &sents).await {
        Ok(v) if v.len() == sents.len() => v,
        Ok(v) => {
            eprintln!(
                "embedding returned {} vectors for {} sentences; using leading sentences",
                v.len(),
                sents.len()
            );
            return sents[..n].join("\n");
        }
        Err(e) => {
            eprintln!("embedding failed, using leading sentences: {e:#}");
            return sents[..n].join("\n");
        }
    };

    let centroid = mean_vector(&vectors);
    let centroid_norm = norm(&centroid);

    let mut scored: Vec<(usize, f32)> = vectors
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let dot: f32 = v.iter().zip(centroid.iter()).map(|(x, y)| x * y).sum();
            (i, dot / (norm(v) * centroid_norm + SCORE_EPSILON))
        })
        .collect();

    // Score descending, source index ascending as the deterministic tie-break
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    let mut selected: Vec<usize> = scored[..n].iter().map(|(i, _)| *i).collect();
    selected.sort_unstable();

    selected
        .iter()
        .map(|&i| sents[i].as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn mean_vector(vectors: &[Vec<f32>]) -> Vec<f32> {
    let dims = vectors.first().map(|v| v.len()).unwrap_or(0);
    let mut mean = vec![0.0f32; dims];
    for v in vectors {
        for (m, x) in mean.iter_mut().zip(v.iter()) {
            *m += x;
        }
    }
    let count = vectors.len() as f32;
    for m in &mut mean {
        *m /= count;
    }
    mean
}

fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}
