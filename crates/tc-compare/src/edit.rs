//! Character-level edit metrics.
//!
//! - [`edit_ratio`]: Ratcliff/Obershelp matching ratio. The longest common
//!   substring is located, then the regions to its left and right are
//!   matched recursively. The total matched length `M` gives
//!   `200 * M / (len(left) + len(right))`.
//! - [`damerau_levenshtein`]: optimal-string-alignment distance (insert,
//!   delete, substitute, adjacent transpose, all unit cost) normalized by the
//!   longer length.
//!
//! Lengths are counted in Unicode scalar values, not bytes.

use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Edit ratio
// ---------------------------------------------------------------------------

/// Ratcliff/Obershelp similarity of `left` and `right` as a percentage.
///
/// Greedy longest-substring matching depends on argument order when several
/// equally long candidates exist. When the forward pass meets such a tie the
/// reversed order is evaluated too and the larger match count is used. Two
/// empty strings score 100; one empty string scores 0.
pub fn edit_ratio(left: &str, right: &str) -> f64 {
    let a: Vec<char> = left.chars().collect();
    let b: Vec<char> = right.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    let forward = match_blocks(&a, &b);
    let matches = if forward.ambiguous {
        forward.matched.max(match_blocks(&b, &a).matched)
    } else {
        forward.matched
    };
    (200.0 * matches as f64 / total as f64).clamp(0.0, 100.0)
}

/// Total length of the non-overlapping common runs found by recursive
/// longest-common-substring matching.
pub fn matching_characters(a: &[char], b: &[char]) -> usize {
    match_blocks(a, b).matched
}

struct BlockMatch {
    matched: usize,
    /// Some sub-problem had more than one longest block, so the outcome may
    /// depend on argument order.
    ambiguous: bool,
}

fn match_blocks(a: &[char], b: &[char]) -> BlockMatch {
    let mut outcome = BlockMatch {
        matched: 0,
        ambiguous: false,
    };
    if a.is_empty() || b.is_empty() {
        return outcome;
    }

    // Positions of each character in `b`, ascending.
    let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b_index.entry(ch).or_default().push(j);
    }
    let mut runs = RunRows::new(b.len());

    // Pending (alo, ahi, blo, bhi, limit) regions; explicit stack instead of
    // recursion. A sub-region never holds a longer block than its parent, so
    // the parent's block length bounds the child's search.
    let mut pending = vec![(0usize, a.len(), 0usize, b.len(), a.len().min(b.len()))];
    while let Some((alo, ahi, blo, bhi, limit)) = pending.pop() {
        let found = longest_match(a, &b_index, &mut runs, (alo, ahi, blo, bhi), limit);
        outcome.ambiguous |= found.tied;
        let (i, j, k) = (found.i, found.j, found.k);
        if k == 0 {
            continue;
        }
        outcome.matched += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j, k));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi, k));
        }
    }
    outcome
}

/// Dense run-length rows shared by every sub-problem of one matching pass.
///
/// `prev[j + 1]` is the length of the common run ending at `a[i - 1]` and
/// `b[j]`. Only touched slots are reset, so a row costs as much as the
/// number of matching positions it visits.
struct RunRows {
    prev: Vec<usize>,
    next: Vec<usize>,
    prev_touched: Vec<usize>,
    next_touched: Vec<usize>,
}

impl RunRows {
    fn new(b_len: usize) -> Self {
        Self {
            prev: vec![0; b_len + 1],
            next: vec![0; b_len + 1],
            prev_touched: Vec::new(),
            next_touched: Vec::new(),
        }
    }

    /// Retire the current `prev` row and promote `next` in its place.
    fn advance(&mut self) {
        for &slot in &self.prev_touched {
            self.prev[slot] = 0;
        }
        self.prev_touched.clear();
        std::mem::swap(&mut self.prev, &mut self.next);
        std::mem::swap(&mut self.prev_touched, &mut self.next_touched);
    }

    fn reset(&mut self) {
        self.advance();
        self.advance();
    }
}

struct LongestMatch {
    i: usize,
    j: usize,
    k: usize,
    tied: bool,
}

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// The block found satisfies `a[i..i+k] == b[j..j+k]`. Ties resolve to the
/// earliest `i`, then the earliest `j`. Scanning stops once a block of
/// length `limit` is found. `tied` is set when another block of the winning
/// length was seen, or may exist in the rows left unscanned.
fn longest_match(
    a: &[char],
    b_index: &HashMap<char, Vec<usize>>,
    runs: &mut RunRows,
    (alo, ahi, blo, bhi): (usize, usize, usize, usize),
    limit: usize,
) -> LongestMatch {
    let mut best = LongestMatch {
        i: alo,
        j: blo,
        k: 0,
        tied: false,
    };

    for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
        if let Some(positions) = b_index.get(ch) {
            let start = positions.partition_point(|&j| j < blo);
            for &j in positions[start..].iter().take_while(|&&j| j < bhi) {
                let k = runs.prev[j] + 1;
                runs.next[j + 1] = k;
                runs.next_touched.push(j + 1);
                if k > best.k {
                    best = LongestMatch {
                        i: i + 1 - k,
                        j: j + 1 - k,
                        k,
                        tied: false,
                    };
                } else if k == best.k {
                    best.tied = true;
                }
            }
        }
        runs.advance();
        if best.k >= limit {
            best.tied |= i + 1 < ahi;
            break;
        }
    }

    runs.reset();
    best
}

// ---------------------------------------------------------------------------
// Damerau–Levenshtein
// ---------------------------------------------------------------------------

/// Minimum number of unit-cost insertions, deletions, substitutions and
/// adjacent transpositions turning `left` into `right` (optimal string
/// alignment variant).
pub fn damerau_levenshtein_distance(left: &str, right: &str) -> usize {
    let a: Vec<char> = left.chars().collect();
    let b: Vec<char> = right.chars().collect();
    let (n, m) = (a.len(), b.len());
    if n == 0 {
        return m;
    }
    if m == 0 {
        return n;
    }

    // Three rolling rows: i - 2, i - 1 and i.
    let mut before_prev = vec![0usize; m + 1];
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut current = vec![0usize; m + 1];

    for i in 1..=n {
        current[0] = i;
        for j in 1..=m {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut d = (prev[j] + 1)
                .min(current[j - 1] + 1)
                .min(prev[j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                d = d.min(before_prev[j - 2] + 1);
            }
            current[j] = d;
        }
        std::mem::swap(&mut before_prev, &mut prev);
        std::mem::swap(&mut prev, &mut current);
    }

    prev[m]
}

/// Damerau–Levenshtein distance normalized to a similarity percentage:
/// `100 * (1 - distance / max(len))`, floored at 0. Two empty strings score 100.
pub fn damerau_levenshtein(left: &str, right: &str) -> f64 {
    let longer = left.chars().count().max(right.chars().count());
    if longer == 0 {
        return 100.0;
    }
    let distance = damerau_levenshtein_distance(left, right);
    (100.0 * (1.0 - distance as f64 / longer as f64)).clamp(0.0, 100.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn ratio_identical_is_100() {
        assert_eq!(edit_ratio("The quick brown fox", "The quick brown fox"), 100.0);
    }

    #[test]
    fn ratio_both_empty_is_100() {
        assert_eq!(edit_ratio("", ""), 100.0);
    }

    #[test]
    fn ratio_one_empty_is_0() {
        assert_eq!(edit_ratio("", "hello"), 0.0);
        assert_eq!(edit_ratio("hello", ""), 0.0);
    }

    #[test]
    fn ratio_disjoint_is_0() {
        assert_eq!(edit_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn ratio_single_substitution() {
        // "ab" matches, 200 * 2 / 6.
        let r = edit_ratio("abc", "abd");
        assert!((r - 200.0 * 2.0 / 6.0).abs() < 1e-9, "got {}", r);
    }

    #[test]
    fn matching_recurses_both_sides() {
        // Longest block "bcd", then "a" on the left side and "f" on the right.
        let m = matching_characters(&chars("abcdxf"), &chars("a_bcd_f"));
        assert_eq!(m, 5);
    }

    #[test]
    fn matching_prefers_earliest_longest_block() {
        let m = matching_characters(&chars("abab"), &chars("ab"));
        assert_eq!(m, 2);
    }

    #[test]
    fn ratio_is_symmetric_on_tie_sensitive_input() {
        let (l, r) = ("abxcd", "cdxab");
        assert_eq!(edit_ratio(l, r), edit_ratio(r, l));
    }

    /// Straightforward recursive matcher used as a reference.
    fn reference_matching(a: &[char], b: &[char]) -> usize {
        let (mut bi, mut bj, mut bk) = (0, 0, 0);
        for i in 0..a.len() {
            for j in 0..b.len() {
                let mut k = 0;
                while i + k < a.len() && j + k < b.len() && a[i + k] == b[j + k] {
                    k += 1;
                }
                if k > bk {
                    (bi, bj, bk) = (i, j, k);
                }
            }
        }
        if bk == 0 {
            return 0;
        }
        bk + reference_matching(&a[..bi], &b[..bj])
            + reference_matching(&a[bi + bk..], &b[bj + bk..])
    }

    #[test]
    fn matching_agrees_with_reference() {
        let pairs = [
            ("abcdxf", "a_bcd_f"),
            ("abab", "ab"),
            ("abxcd", "cdxab"),
            ("the quick brown fox", "quick the fox brown"),
            ("aaaaab", "baaaaa"),
            ("mississippi", "missouri"),
            ("xyzxyzxyz", "zyxzyxzyx"),
        ];
        for (l, r) in pairs {
            let (a, b) = (chars(l), chars(r));
            assert_eq!(matching_characters(&a, &b), reference_matching(&a, &b), "{} / {}", l, r);
            assert_eq!(matching_characters(&b, &a), reference_matching(&b, &a), "{} / {}", r, l);
        }
    }

    #[test]
    fn unique_longest_blocks_are_not_ambiguous() {
        assert!(!match_blocks(&chars("abcdxf"), &chars("a_bcd_f")).ambiguous);
        assert!(!match_blocks(&chars("identical"), &chars("identical")).ambiguous);
        assert!(match_blocks(&chars("abab"), &chars("ab")).ambiguous);
    }

    #[test]
    fn ratio_on_periodic_input_stays_fast() {
        // Every common block has length one, which forces the deepest
        // possible split chain.
        let periodic = |step: usize| -> String {
            (0..2000)
                .map(|i| char::from(b'a' + (i * step % 26) as u8))
                .collect()
        };
        let (left, right) = (periodic(7), periodic(11));

        let start = std::time::Instant::now();
        let r = edit_ratio(&left, &right);
        let elapsed = start.elapsed();

        assert!(r > 0.0 && r < 100.0, "got {}", r);
        assert_eq!(r, edit_ratio(&right, &left));
        assert!(elapsed.as_secs() < 2, "took {:?}", elapsed);
    }

    #[test]
    fn ratio_counts_chars_not_bytes() {
        // 4 of 5 chars match on each side.
        let r = edit_ratio("café!", "cafe!");
        assert!((r - 200.0 * 4.0 / 10.0).abs() < 1e-9, "got {}", r);
    }

    #[test]
    fn distance_basic_cases() {
        assert_eq!(damerau_levenshtein_distance("", ""), 0);
        assert_eq!(damerau_levenshtein_distance("", "abc"), 3);
        assert_eq!(damerau_levenshtein_distance("abc", ""), 3);
        assert_eq!(damerau_levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(damerau_levenshtein_distance("abc", "abd"), 1);
    }

    #[test]
    fn adjacent_transposition_costs_one() {
        assert_eq!(damerau_levenshtein_distance("ab", "ba"), 1);
        assert_eq!(damerau_levenshtein_distance("abcdef", "abdcef"), 1);
    }

    #[test]
    fn optimal_string_alignment_does_not_edit_twice() {
        // OSA forbids editing a transposed pair again: "ca" -> "abc" is 3.
        assert_eq!(damerau_levenshtein_distance("ca", "abc"), 3);
    }

    #[test]
    fn normalized_score_single_substitution() {
        let s = damerau_levenshtein("abc", "abd");
        assert!((s - 100.0 * (1.0 - 1.0 / 3.0)).abs() < 1e-9, "got {}", s);
        assert!((s - 66.67).abs() < 0.01);
    }

    #[test]
    fn normalized_score_edges() {
        assert_eq!(damerau_levenshtein("", ""), 100.0);
        assert_eq!(damerau_levenshtein("", "hello"), 0.0);
        assert_eq!(damerau_levenshtein("same", "same"), 100.0);
        assert_eq!(damerau_levenshtein("abc", "xyz"), 0.0);
    }

    #[test]
    fn damerau_is_symmetric() {
        let pairs = [("kitten", "sitting"), ("ca", "abc"), ("flaw", "lawn")];
        for (l, r) in pairs {
            assert_eq!(damerau_levenshtein(l, r), damerau_levenshtein(r, l));
        }
    }
}
