//! Backtracker (C3): walks the DP table from its best end cell back to the
//! origin, emitting the edit script and the aligned index pairs.

use super::{DpTable, MAX_MOVE_SWAP, MOVE_SWAP_COST, OP_COST};
use crate::edit::{Edit, EditOperation};
use crate::error::{EngineResult, ScoringError};
use crate::note::Note;

/// Reconstructs the edit script and aligned pairs for `table`, built over
/// `reference` and `played`. Starts at `(i*, m)` where `i* = argmin_i
/// dp[i][m]` and walks toward `(0, 0)`, choosing at each step the first
/// predecessor (in the deterministic check order from §4.3) whose
/// recorded cost matches `dp[i][j]`.
///
/// Returns edits in order of increasing reference position and aligned
/// pairs in order of increasing reference index, both restored to forward
/// order by a final reverse.
pub fn backtrack(
    table: &DpTable,
    reference: &[Note],
    played: &[Note],
) -> EngineResult<(Vec<Edit>, Vec<(usize, usize)>)> {
    let m = table.m();
    let mut i = super::best_end_row(table);
    let mut j = m;

    let mut edits = Vec::new();
    let mut aligned = Vec::new();

    while i > 0 && j > 0 {
        let r = reference[i - 1].pitch;
        let sub_cost = if r == played[j - 1].pitch { 0 } else { OP_COST };

        if table.get(i, j) == table.get(i - 1, j - 1) + sub_cost {
            aligned.push((i - 1, j - 1));
            if sub_cost != 0 {
                edits.push(Edit {
                    operation: EditOperation::Substitute,
                    pos: i - 1,
                    t_pos: j - 1,
                    s_char: Some(reference[i - 1].clone()),
                    t_char: Some(played[j - 1].clone()),
                });
            }
            i -= 1;
            j -= 1;
            continue;
        }

        if table.get(i, j) == table.get(i - 1, j) + OP_COST {
            edits.push(Edit {
                operation: EditOperation::Delete,
                pos: i - 1,
                t_pos: j,
                s_char: Some(reference[i - 1].clone()),
                t_char: None,
            });
            i -= 1;
            continue;
        }

        if table.get(i, j) == table.get(i, j - 1) + OP_COST {
            edits.push(Edit {
                operation: EditOperation::Insert,
                pos: i,
                t_pos: j - 1,
                s_char: Some(reference[i - 1].clone()),
                t_char: Some(played[j - 1].clone()),
            });
            j -= 1;
            continue;
        }

        // Move backward: s[i-1] matches an earlier played note.
        let mut moved = false;
        for k in 1..=MAX_MOVE_SWAP {
            if j >= 1 + k
                && table.get(i, j) == table.get(i - 1, j - 1 - k) + MOVE_SWAP_COST
                && r == played[j - 1 - k].pitch
            {
                aligned.push((i - 1, j - 1 - k));
                i -= 1;
                j -= 1 + k;
                moved = true;
                break;
            }
        }
        if moved {
            continue;
        }

        // Move forward: s[i-1] matches a later played note.
        for k in 1..=MAX_MOVE_SWAP {
            if j + k <= m
                && table.get(i, j) == table.get(i - 1, j + k) + MOVE_SWAP_COST
                && r == played[j + k - 1].pitch
            {
                aligned.push((i - 1, j + k));
                i -= 1;
                j += k;
                moved = true;
                break;
            }
        }
        if moved {
            continue;
        }

        // Adjacent swap of span k.
        for k in 1..=MAX_MOVE_SWAP {
            if i >= 1 + k
                && j >= 1 + k
                && table.get(i, j) == table.get(i - 1 - k, j - 1 - k) + MOVE_SWAP_COST
                && r == played[j - 1 - k].pitch
                && reference[i - 1 - k].pitch == played[j - 1].pitch
            {
                aligned.push((i - 1, j - 1 - k));
                aligned.push((i - 1 - k, j - 1));
                i -= 1 + k;
                j -= 1 + k;
                moved = true;
                break;
            }
        }
        if moved {
            continue;
        }

        return Err(ScoringError::AlignmentStuck { i, j });
    }

    // Leading inserts: the reference ran out (i == 0) before the played
    // sequence did. Unlike the original implementation, `s_char` here
    // reports the first reference note for context when one exists,
    // rather than mis-indexing the reference by the played position.
    while j > 0 {
        edits.push(Edit {
            operation: EditOperation::Insert,
            pos: 0,
            t_pos: j - 1,
            s_char: reference.first().cloned(),
            t_char: Some(played[j - 1].clone()),
        });
        j -= 1;
    }

    edits.reverse();
    aligned.reverse();
    Ok((edits, aligned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::compute_dp;
    use pretty_assertions::assert_eq;

    fn notes(pitches: &[i32]) -> Vec<Note> {
        pitches
            .iter()
            .enumerate()
            .map(|(i, &p)| Note::new(p, i as f64 * 0.5))
            .collect()
    }

    #[test]
    fn identity_has_no_edits_and_diagonal_alignment() {
        let r = notes(&[60, 62, 64]);
        let p = r.clone();
        let pitches: Vec<i32> = r.iter().map(|n| n.pitch).collect();
        let table = compute_dp(&pitches, &pitches);
        let (edits, aligned) = backtrack(&table, &r, &p).unwrap();
        assert!(edits.is_empty());
        assert_eq!(aligned, vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn single_substitution() {
        let r = notes(&[60, 62, 64]);
        let p = notes(&[60, 63, 64]);
        let r_p: Vec<i32> = r.iter().map(|n| n.pitch).collect();
        let p_p: Vec<i32> = p.iter().map(|n| n.pitch).collect();
        let table = compute_dp(&r_p, &p_p);
        let (edits, _) = backtrack(&table, &r, &p).unwrap();
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].operation, EditOperation::Substitute);
        assert_eq!(edits[0].pos, 1);
        assert_eq!(edits[0].t_pos, 1);
    }

    #[test]
    fn single_insertion() {
        let r = notes(&[60, 64]);
        let p = notes(&[60, 62, 64]);
        let r_p: Vec<i32> = r.iter().map(|n| n.pitch).collect();
        let p_p: Vec<i32> = p.iter().map(|n| n.pitch).collect();
        let table = compute_dp(&r_p, &p_p);
        let (edits, _) = backtrack(&table, &r, &p).unwrap();
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].operation, EditOperation::Insert);
        assert_eq!(edits[0].pos, 1);
        assert_eq!(edits[0].t_pos, 1);
    }

    #[test]
    fn trailing_reference_is_trimmed_for_free() {
        let r = notes(&[60, 62, 64, 65, 67]);
        let p = notes(&[60, 62, 64]);
        let r_p: Vec<i32> = r.iter().map(|n| n.pitch).collect();
        let p_p: Vec<i32> = p.iter().map(|n| n.pitch).collect();
        let table = compute_dp(&r_p, &p_p);
        let (edits, aligned) = backtrack(&table, &r, &p).unwrap();
        assert!(edits.is_empty());
        assert_eq!(aligned, vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn move_within_window_costs_less_than_substitution() {
        let r = notes(&[60, 62, 64, 65]);
        let p = notes(&[60, 64, 62, 65]);
        let r_p: Vec<i32> = r.iter().map(|n| n.pitch).collect();
        let p_p: Vec<i32> = p.iter().map(|n| n.pitch).collect();
        let table = compute_dp(&r_p, &p_p);
        let (edits, _) = backtrack(&table, &r, &p).unwrap();
        assert!(edits.iter().all(|e| e.operation != EditOperation::Substitute));
    }
}
