//! Ranking of question suggestions for a free-text query.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::index::{ArabicQuestionIndex, NormalizedIndex, QuestionVariant};
use super::normalize::normalize;
use super::scoring::word_similarity;
use super::SuggestError;

/// Most suggestions returned for one query.
pub const MAX_SUGGESTIONS: usize = 7;

/// Candidates scoring below this are dropped.
pub const MIN_MATCH_SCORE: f64 = 0.3;

/// Scores this close are ordered by text length instead.
pub const TIE_WINDOW: f64 = 0.1;

/// A ranked suggestion.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub question_id: String,
    pub text: String,
    pub score: f64,
    pub arabic_reference: String,
}

/// Rank up to [`MAX_SUGGESTIONS`] questions for `query`.
///
/// Exact normalized hits come in at 1.0; every index key is then scored with
/// [`word_similarity`] using its first variant, keeping the best score per
/// question id. Exact hits lead; the rest are ordered by score, with
/// near-equal scores ([`TIE_WINDOW`]) preferring the shorter text.
pub fn rank_suggestions(
    query: &str,
    index: &NormalizedIndex,
    arabic: &ArabicQuestionIndex,
) -> Result<Vec<Match>, SuggestError> {
    let query_norm = normalize(query);
    if query_norm.is_empty() {
        return Err(SuggestError::EmptyQuery);
    }

    let mut collected = Candidates::default();

    if let Some(exact) = index.get(&query_norm) {
        for variant in exact {
            collected.offer_exact(variant);
        }
    }

    for (key, variants) in index.iter() {
        let Some(first) = variants.first() else {
            continue;
        };
        let score = word_similarity(&query_norm, key);
        if score >= MIN_MATCH_SCORE {
            collected.offer(first, score);
        }
    }

    let mut ranked = collected.into_vec();
    order_by_score_then_length(&mut ranked);
    ranked.truncate(MAX_SUGGESTIONS);

    Ok(ranked
        .into_iter()
        .map(|c| Match {
            arabic_reference: arabic.get(&c.question_id).unwrap_or_default().to_string(),
            question_id: c.question_id,
            text: c.text,
            score: c.score,
        })
        .collect())
}

struct Candidate {
    question_id: String,
    text: String,
    score: f64,
    exact: bool,
}

/// Best candidate per question id, in first-seen order.
#[derive(Default)]
struct Candidates {
    items: Vec<Candidate>,
    by_qid: HashMap<String, usize>,
}

impl Candidates {
    /// Exact hits: the first variant seen for an id is kept.
    fn offer_exact(&mut self, variant: &QuestionVariant) {
        if self.by_qid.contains_key(&variant.question_id) {
            return;
        }
        self.push(variant, 1.0, true);
    }

    /// Partial hits replace an existing entry only with a strictly higher score.
    fn offer(&mut self, variant: &QuestionVariant, score: f64) {
        match self.by_qid.get(&variant.question_id) {
            Some(&pos) => {
                let existing = &mut self.items[pos];
                if score > existing.score {
                    existing.text = variant.original_text.clone();
                    existing.score = score;
                }
            }
            None => self.push(variant, score, false),
        }
    }

    fn push(&mut self, variant: &QuestionVariant, score: f64, exact: bool) {
        self.by_qid
            .insert(variant.question_id.clone(), self.items.len());
        self.items.push(Candidate {
            question_id: variant.question_id.clone(),
            text: variant.original_text.clone(),
            score,
            exact,
        });
    }

    fn into_vec(self) -> Vec<Candidate> {
        self.items
    }
}

fn compare(a: &Candidate, b: &Candidate) -> Ordering {
    // Reordered variants can also reach 1.0 once short tokens are ignored
    if a.exact != b.exact {
        return b.exact.cmp(&a.exact);
    }
    let diff = b.score - a.score;
    if diff.abs() > TIE_WINDOW {
        return if diff > 0.0 {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    a.text.chars().count().cmp(&b.text.chars().count())
}

/// Stable insertion sort with [`compare`].
///
/// The tie window makes `compare` non-transitive, which `slice::sort_by` is
/// allowed to reject, so the order is built by hand.
fn order_by_score_then_length(items: &mut [Candidate]) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
