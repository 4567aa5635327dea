//! Longest common subsequence length.

/// Length of the longest common subsequence of `a` and `b`.
///
/// Classic O(|a|·|b|) dynamic programme, keeping a single row sized to the
/// shorter sequence.
pub fn lcs_length<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if inner.is_empty() {
        return 0;
    }

    let mut row = vec![0usize; inner.len() + 1];
    for x in outer {
        // `diag` holds row[j - 1] from the previous outer iteration.
        let mut diag = 0;
        for (j, y) in inner.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if x == y {
                diag + 1
            } else {
                above.max(row[j])
            };
            diag = above;
        }
    }
    row[inner.len()]
}
