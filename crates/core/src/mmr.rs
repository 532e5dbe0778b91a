//! Maximal Marginal Relevance selection over embedding vectors

use crate::error::CoreError;

/// Cosine similarity of two vectors. Zero-norm vectors score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, CoreError> {
    if a.len() != b.len() {
        return Err(CoreError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    let denom = norm_a * norm_b;
    if denom <= f32::EPSILON {
        return Ok(0.0);
    }
    Ok(dot / denom)
}

/// Pick up to `k` candidate indices balancing relevance and novelty.
///
/// The first pick is the candidate closest to `query`. Each following pick
/// maximizes `lambda_mult * sim(query, c) - (1 - lambda_mult) * max sim(c, selected)`.
/// `lambda_mult = 1.0` is plain relevance ranking, `0.0` is maximum diversity.
/// Ties keep the earlier candidate.
pub fn maximal_marginal_relevance(
    query: &[f32],
    candidates: &[Vec<f32>],
    lambda_mult: f32,
    k: usize,
) -> Result<Vec<usize>, CoreError> {
    if !(0.0..=1.0).contains(&lambda_mult) {
        return Err(CoreError::InvalidLambda(lambda_mult));
    }

    let limit = k.min(candidates.len());
    if limit == 0 {
        return Ok(Vec::new());
    }

    let query_scores = candidates
        .iter()
        .map(|candidate| cosine_similarity(query, candidate))
        .collect::<Result<Vec<_>, _>>()?;

    let mut selected = vec![argmax(&query_scores)];
    // Highest similarity of each candidate to anything selected so far
    let mut redundancy = vec![f32::NEG_INFINITY; candidates.len()];

    while selected.len() < limit {
        let last = &candidates[selected[selected.len() - 1]];
        for (idx, candidate) in candidates.iter().enumerate() {
            let sim = cosine_similarity(last, candidate)?;
            redundancy[idx] = redundancy[idx].max(sim);
        }

        let mut best_score = f32::NEG_INFINITY;
        let mut best_idx = None;
        for (idx, query_score) in query_scores.iter().enumerate() {
            if selected.contains(&idx) {
                continue;
            }
            let score = lambda_mult * query_score - (1.0 - lambda_mult) * redundancy[idx];
            if best_idx.is_none() || score > best_score {
                best_score = score;
                best_idx = Some(idx);
            }
        }

        match best_idx {
            Some(idx) => selected.push(idx),
            None => break,
        }
    }

    Ok(selected)
}

fn argmax(scores: &[f32]) -> usize {
    let mut best = 0;
    for (idx, score) in scores.iter().enumerate() {
        if *score > scores[best] {
            best = idx;
        }
    }
    best
}
