//! Alignment DP (C2) and backtracking (C3).
//!
//! The DP table is the engine's core data structure: a modified edit
//! distance over pitch sequences that additionally recognizes short-range
//! reorderings ("move" and "swap") at a fraction of the cost of an
//! insert+delete pair, and that allows the reference to be freely trimmed
//! at both ends.

mod backtrack;

pub use backtrack::backtrack;

/// Cost of a substitution, a reference-only deletion, or a played-only
/// insertion.
pub const OP_COST: i32 = 5;

/// Cost of a move (note reordered by up to [`MAX_MOVE_SWAP`] positions) or
/// an adjacent swap of two notes.
pub const MOVE_SWAP_COST: i32 = 1;

/// Maximum span, in positions, a move or swap may reach.
pub const MAX_MOVE_SWAP: usize = 5;

/// A dense `(n+1) x (m+1)` cost table stored as a single contiguous
/// buffer, row-major over the reference axis. `dp[i][j]` is the minimum
/// cost to convert the first `i` reference notes into some subsequence
/// ending at position `j` of the played sequence.
pub struct DpTable {
    n: usize,
    m: usize,
    data: Vec<i32>,
}

impl DpTable {
    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        i * (self.m + 1) + j
    }

    /// Reads `dp[i][j]`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i32 {
        self.data[self.index(i, j)]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: i32) {
        let idx = self.index(i, j);
        self.data[idx] = value;
    }

    /// Number of reference notes this table was built for.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of played notes this table was built for.
    pub fn m(&self) -> usize {
        self.m
    }
}

/// Computes the alignment DP table for `ref_pitches` against
/// `played_pitches`. Complexity is `O(n * m)` with a constant factor from
/// the `k in 1..=5` move/swap window; compute order is reference-axis
/// outer, played-axis inner, so the inner loop is cache-friendly.
pub fn compute_dp(ref_pitches: &[i32], played_pitches: &[i32]) -> DpTable {
    let n = ref_pitches.len();
    let m = played_pitches.len();
    let mut table = DpTable {
        n,
        m,
        data: vec![0; (n + 1) * (m + 1)],
    };

    // dp[0][j] = j * OP_COST: every played-prefix must be inserted.
    for j in 1..=m {
        table.set(0, j, j as i32 * OP_COST);
    }
    // dp[i][0] = 0 for i > 0: free trimming of any reference prefix.
    // (already zero-initialized)

    for i in 1..=n {
        let r = ref_pitches[i - 1];
        for j in 1..=m {
            let sub_cost = if r == played_pitches[j - 1] { 0 } else { OP_COST };
            let mut best = table
                .get(i - 1, j - 1)
                .saturating_add(sub_cost)
                .min(table.get(i - 1, j).saturating_add(OP_COST))
                .min(table.get(i, j - 1).saturating_add(OP_COST));

            // Move forward: s[i-1] reappears later in the played sequence.
            for k in 1..=MAX_MOVE_SWAP {
                if j + k <= m && r == played_pitches[j + k - 1] {
                    best = best.min(table.get(i - 1, j + k).saturating_add(MOVE_SWAP_COST));
                }
            }

            // Move backward: s[i-1] reappears earlier in the played sequence.
            for k in 1..=MAX_MOVE_SWAP {
                if j >= 1 + k && r == played_pitches[j - 1 - k] {
                    best = best.min(table.get(i - 1, j - 1 - k).saturating_add(MOVE_SWAP_COST));
                }
            }

            // Adjacent swap of span k: s[i-1] <-> s[i-1-k].
            for k in 1..=MAX_MOVE_SWAP {
                if i >= 1 + k
                    && j >= 1 + k
                    && r == played_pitches[j - 1 - k]
                    && ref_pitches[i - 1 - k] == played_pitches[j - 1]
                {
                    best = best.min(table.get(i - 1 - k, j - 1 - k).saturating_add(MOVE_SWAP_COST));
                }
            }

            table.set(i, j, best);
        }
    }

    table
}

/// Finds `i* = argmin_i dp[i][m]`, the reference prefix length that best
/// explains the full played sequence once trailing reference material is
/// freely trimmed away.
pub fn best_end_row(table: &DpTable) -> usize {
    let m = table.m();
    (0..=table.n())
        .min_by_key(|&i| table.get(i, m))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests;
