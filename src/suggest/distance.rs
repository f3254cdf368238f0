//! Levenshtein edit distance over Unicode scalar values.

/// Classic edit distance: single-character insertions, deletions and
/// substitutions at unit cost.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Edit distance capped at `max`.
///
/// Returns the exact distance when it is at most `max`, otherwise `max + 1`.
/// Candidates whose length alone differs by more than `max` are rejected
/// without running the DP, and the scan stops as soon as a whole row
/// exceeds `max`.
pub fn bounded_distance(a: &str, b: &str, max: usize) -> usize {
    let over = max.saturating_add(1);
    let (a_len, b_len) = (a.chars().count(), b.chars().count());

    if a_len.abs_diff(b_len) > max {
        return over;
    }
    if a_len.max(b_len) <= max {
        // distance never exceeds the longer length
        return distance(a, b);
    }

    // both non-empty here: an empty side would fail one of the checks above
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        let mut row_min = curr[0];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
            row_min = row_min.min(curr[j + 1]);
        }
        if row_min > max {
            return over;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    match prev[b.len()] {
        d if d > max => over,
        d => d,
    }
}
