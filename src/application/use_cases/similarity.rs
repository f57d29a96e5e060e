// ============================================================
// SIMILARITY SCORER
// ============================================================
// Normalized Levenshtein ratio between two strings

/// Similarity ratio in [0, 1]: 1.0 for identical strings, 0.0 when either
/// side is empty, otherwise `(max_len - edit_distance) / max_len`.
///
/// Symmetric: `calculate_similarity(a, b) == calculate_similarity(b, a)`.
pub fn calculate_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let max_len = a_chars.len().max(b_chars.len());

    let distance = levenshtein_distance(&a_chars, &b_chars);
    (max_len - distance) as f64 / max_len as f64
}

/// Classic Levenshtein edit distance, insert/delete/substitute cost 1 each.
/// Two-row dynamic programming, O(len(a) * len(b)) time, O(len(b)) space.
fn levenshtein_distance(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, &a_char) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &b_char) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(a_char != b_char);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
