use super::*;
use pretty_assertions::assert_eq;

#[test]
fn empty_played_has_zero_cost_everywhere() {
    let table = compute_dp(&[60, 62, 64], &[]);
    for i in 0..=3 {
        assert_eq!(table.get(i, 0), 0);
    }
}

#[test]
fn empty_reference_forces_full_insertion_cost() {
    let table = compute_dp(&[], &[60, 62, 64]);
    assert_eq!(table.get(0, 3), 3 * OP_COST);
}

#[test]
fn identical_sequences_cost_nothing_at_the_diagonal() {
    let pitches = [60, 62, 64, 65];
    let table = compute_dp(&pitches, &pitches);
    assert_eq!(table.get(4, 4), 0);
    assert_eq!(best_end_row(&table), 4);
}

#[test]
fn bounded_cost_never_exceeds_pure_insert_delete() {
    let reference = [60, 61, 62, 63, 64];
    let played = [70, 71, 72];
    let table = compute_dp(&reference, &played);
    let n = reference.len();
    let m = played.len();
    let worst_case = (n + m) as i32 * OP_COST;
    for i in 0..=n {
        for j in 0..=m {
            assert!(table.get(i, j) <= worst_case);
        }
    }
}

#[test]
fn trailing_trim_does_not_penalize_unreached_reference() {
    let played = [60, 62, 64];
    let short_ref = [60, 62, 64];
    let long_ref = [60, 62, 64, 90, 91, 92, 93];

    let short_table = compute_dp(&short_ref, &played);
    let long_table = compute_dp(&long_ref, &played);

    let short_best = (0..=short_ref.len())
        .map(|i| short_table.get(i, played.len()))
        .min()
        .unwrap();
    let long_best = (0..=long_ref.len())
        .map(|i| long_table.get(i, played.len()))
        .min()
        .unwrap();

    assert_eq!(short_best, long_best);
}
