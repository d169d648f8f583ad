//! Word-overlap similarity between a normalized query and a normalized
//! candidate question.

/// Query tokens shorter than this (in characters) are ignored entirely.
pub const MIN_WORD_LENGTH: usize = 2;

/// Score for a candidate that contains the whole query.
pub const SUBSTRING_SCORE: f64 = 0.9;

/// Credit for a query token that only partially overlaps a candidate token.
pub const PARTIAL_TOKEN_CREDIT: f64 = 0.7;

/// Similarity in `[0, 1]` between two already-normalized strings.
///
/// 1.0 on equality, 0.9 when the candidate contains the query, otherwise the
/// mean per-token credit over query tokens of at least [`MIN_WORD_LENGTH`]
/// characters: 1.0 for a verbatim token, 0.7 when a candidate token and the
/// query token contain one another, 0 otherwise.
pub fn word_similarity(query: &str, candidate: &str) -> f64 {
    if candidate == query {
        return 1.0;
    }
    if candidate.contains(query) {
        return SUBSTRING_SCORE;
    }

    let candidate_tokens: Vec<&str> = candidate.split_whitespace().collect();

    let mut credit = 0.0;
    let mut counted = 0usize;

    for token in query.split_whitespace() {
        if token.chars().count() < MIN_WORD_LENGTH {
            continue;
        }
        counted += 1;

        if candidate_tokens.contains(&token) {
            credit += 1.0;
        } else if candidate_tokens
            .iter()
            .any(|c| c.contains(token) || token.contains(c))
        {
            credit += PARTIAL_TOKEN_CREDIT;
        }
    }

    if counted == 0 {
        0.0
    } else {
        credit / counted as f64
    }
}
