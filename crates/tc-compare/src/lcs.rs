//! Longest-common-subsequence similarity over characters.
//!
//! Both documents are lowercased first, so the metric is case-insensitive.
//! The LCS length is normalized by the average of the two lowercased lengths.

/// Length of the longest common subsequence of `a` and `b`.
///
/// Classic DP table, kept to two rows since only the length is needed.
pub fn lcs_length<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (n, m) = (a.len(), b.len());
    if n == 0 || m == 0 {
        return 0;
    }

    // prev[j] = LCS length for a[..i - 1], b[..j]
    let mut prev = vec![0usize; m + 1];
    let mut current = vec![0usize; m + 1];

    for i in 1..=n {
        for j in 1..=m {
            current[j] = if a[i - 1] == b[j - 1] {
                prev[j - 1] + 1
            } else {
                prev[j].max(current[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut current);
    }

    prev[m]
}

/// Case-insensitive LCS similarity as a percentage:
/// `100 * lcs / average(len(left), len(right))`, clamped to `[0, 100]`.
/// Two empty strings score 100.
pub fn lcs_similarity(left: &str, right: &str) -> f64 {
    let a: Vec<char> = left.to_lowercase().chars().collect();
    let b: Vec<char> = right.to_lowercase().chars().collect();
    let average = (a.len() + b.len()) as f64 / 2.0;
    if average == 0.0 {
        return 100.0;
    }
    let length = lcs_length(&a, &b);
    (100.0 * length as f64 / average).clamp(0.0, 100.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
