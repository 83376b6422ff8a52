use cascade_array::ArrayError;

use crate::decay::*;
use crate::test_util::*;

#[test]
fn distinct_parent_finds_first_other_species() {
    // Species A,A,B in one chain: particle 2's nearest different-species
    // ancestor is particle 0.
    let parents = vec![-1i64, 0, 1];
    let species = vec![1i64, 1, 2];
    let out = run_data(
        distinct_parent,
        vec![parents.into(), species.into()],
    )
    .unwrap();
    assert_eq!(flat_i64(&out), vec![-1, -1, 0]);
}

#[test]
fn distinct_parent_skips_same_species_relays() {
    // 0(A) -> 1(B) -> 2(B) -> 3(B): particle 3 walks the B chain up to 0.
    let parents = vec![-1i64, 0, 1, 2];
    let species = vec![7i64, 4, 4, 4];
    let out = run_data(
        distinct_parent,
        vec![parents.into(), species.into()],
    )
    .unwrap();
    assert_eq!(flat_i64(&out), vec![-1, 0, 0, 0]);
}

#[test]
fn distinct_parent_rejects_dangling_links() {
    let parents = vec![5i64];
    let species = vec![1i64];
    let err = run_data(
        distinct_parent,
        vec![parents.into(), species.into()],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ArrayError::BoundsViolation { index: 5, len: 1, .. }
    ));
}

#[test]
fn distinct_parent_rejects_unequal_buffers() {
    let err = run_data(
        distinct_parent,
        vec![vec![-1i64, 0].into(), vec![1i64].into()],
    )
    .unwrap_err();
    assert!(matches!(err, ArrayError::ShapeMismatch { .. }));
}

#[test]
fn children_collects_forward_matches() {
    // One event: 0 is root, 1 and 2 are children of 0, 3 is a child of 1.
    let offsets = vec![0i64, 4];
    let parents = vec![-1i64, 0, 0, 1];
    let out = run_data(children, vec![offsets.into(), parents.into()]).unwrap();
    assert_eq!(
        sublists_i64(&out),
        vec![vec![1, 2], vec![3], vec![], vec![]]
    );
}

#[test]
fn children_never_crosses_event_boundaries() {
    // Particle 2 claims particle 0 (previous event) as parent; the scan is
    // confined to each segment, so neither side sees the link.
    let offsets = vec![0i64, 2, 3];
    let parents = vec![-1i64, -1, 0];
    let out = run_data(children, vec![offsets.into(), parents.into()]).unwrap();
    assert_eq!(sublists_i64(&out), vec![Vec::<i64>::new(), vec![], vec![]]);
}

#[test]
fn children_rejects_offsets_content_disagreement() {
    let err = run_data(children, vec![vec![0i64, 3].into(), vec![-1i64, 0].into()]).unwrap_err();
    assert!(matches!(err, ArrayError::LengthMismatch { end: 3, len: 2 }));
}

#[test]
fn deep_children_skip_same_species_relays() {
    // 0(Q) -> 1(A) -> 2(A) -> {3(B), 4(A, childless)}.
    // Particle 1 starts the A lineage: its deep children are the
    // different-species child 3 and the dead-end relay 4. Particles inside
    // the lineage report nothing.
    let offsets = vec![0i64, 5];
    let parents = vec![-1i64, 0, 1, 2, 2];
    let species = vec![9i64, 1, 1, 2, 1];
    let out = run_data(
        distinct_children_deep,
        vec![offsets.into(), parents.into(), species.into()],
    )
    .unwrap();
    assert_eq!(
        sublists_i64(&out),
        vec![vec![], vec![3, 4], vec![], vec![], vec![]]
    );
}

#[test]
fn deep_children_emit_sibling_leaves_once_each() {
    // Two same-species sibling relays (2 and 3), both childless: each is
    // emitted exactly once, in relay discovery order.
    let offsets = vec![0i64, 4];
    let parents = vec![-1i64, 0, 1, 1];
    let species = vec![9i64, 1, 1, 1];
    let out = run_data(
        distinct_children_deep,
        vec![offsets.into(), parents.into(), species.into()],
    )
    .unwrap();
    assert_eq!(
        sublists_i64(&out),
        vec![vec![], vec![2, 3], vec![], vec![]]
    );
}

#[test]
fn deep_children_report_discovery_order() {
    // 0(Q) -> 1(A); 1's children interleave species: 2(B), 3(A), and 3's
    // child 4(B). Discovery order is scan order, not tree order.
    let offsets = vec![0i64, 5];
    let parents = vec![-1i64, 0, 1, 1, 3];
    let species = vec![9i64, 1, 2, 1, 2];
    let out = run_data(
        distinct_children_deep,
        vec![offsets.into(), parents.into(), species.into()],
    )
    .unwrap();
    assert_eq!(
        sublists_i64(&out),
        vec![vec![], vec![2, 4], vec![], vec![], vec![]]
    );
}

#[test]
fn deep_children_rejects_dangling_links() {
    let offsets = vec![0i64, 2];
    let parents = vec![-1i64, 9];
    let species = vec![1i64, 2];
    let err = run_data(
        distinct_children_deep,
        vec![offsets.into(), parents.into(), species.into()],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ArrayError::BoundsViolation { index: 9, len: 2, .. }
    ));
}

#[test]
fn distinct_parent_form_steals_parent_boundaries() {
    let out = run_form(
        distinct_parent_form,
        vec![jagged_form("part_parent"), jagged_form("part_species")],
    )
    .unwrap();
    let list = out.as_list().unwrap();
    assert_eq!(list.form_key, "part_parent");
    assert_eq!(
        list.content.form_key(),
        "part_parent,!content,part_species,!content,!distinct_parent"
    );
}

#[test]
fn children_form_is_doubly_nested() {
    let out = run_form(
        children_form,
        vec![numeric_form("evt_offsets"), jagged_form("part_parent")],
    )
    .unwrap();
    let outer = out.as_list().unwrap();
    assert_eq!(outer.form_key, "evt_offsets");
    let inner = outer.content.as_list().unwrap();
    assert_eq!(inner.form_key, "evt_offsets,part_parent,!content,!children");
    assert_eq!(
        inner.content.form_key(),
        "evt_offsets,part_parent,!content,!children,!content"
    );
}

#[test]
fn deep_children_form_keys_all_inputs() {
    let out = run_form(
        distinct_children_deep_form,
        vec![
            numeric_form("evt_offsets"),
            jagged_form("part_parent"),
            jagged_form("part_species"),
        ],
    )
    .unwrap();
    let outer = out.as_list().unwrap();
    let inner = outer.content.as_list().unwrap();
    assert_eq!(
        inner.form_key,
        "evt_offsets,part_parent,!content,part_species,!content,!distinct_children_deep"
    );
}

#[test]
fn traversal_forms_reject_flat_particle_operands() {
    let err = run_form(
        distinct_parent_form,
        vec![numeric_form("part_parent"), jagged_form("part_species")],
    )
    .unwrap_err();
    assert!(matches!(err, ArrayError::StructuralMismatch { .. }));
}
