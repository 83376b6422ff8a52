#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! The cascade operation library.
//!
//! Kernels over jagged particle-event data, registered into the
//! `cascade-engine` stack machine in paired data/form flavors:
//! - `project` — read-only structural projections (offsets, content, ...)
//! - `translate` — index-space translation between local (per-event) and
//!   global (flat) addressing
//! - `decay` — parent/child/ancestor traversal over flattened decay graphs
//! - `range` — expansion of (begin, end) boundary pairs and value gathers
//!
//! [`standard_registry`] returns a registry with every operation installed.

pub mod decay;
pub mod project;
pub mod range;
pub mod translate;

#[cfg(test)]
mod decay_tests;
#[cfg(test)]
mod test_util;

use cascade_engine::{EngineError, Operation, Registry};

/// Install every cascade operation into `registry`.
pub fn register_all(registry: &mut Registry) -> Result<(), EngineError> {
    let table: &[(&str, usize, cascade_engine::DataKernel, cascade_engine::FormKernel)] = &[
        ("offsets", 1, project::offsets, project::offsets_form),
        ("starts", 1, project::starts, project::starts_form),
        ("stops", 1, project::stops, project::stops_form),
        ("content", 1, project::content, project::content_form),
        ("tags", 1, project::tags, project::tags_form),
        ("index", 1, project::index, project::index_form),
        (
            "counts_to_offsets",
            1,
            translate::counts_to_offsets,
            translate::counts_to_offsets_form,
        ),
        (
            "local_to_global",
            2,
            translate::local_to_global,
            translate::local_to_global_form,
        ),
        (
            "counts_to_nested_index",
            2,
            translate::counts_to_nested_index,
            translate::counts_to_nested_index_form,
        ),
        (
            "grow_local_index",
            2,
            translate::grow_local_index,
            translate::grow_local_index_form,
        ),
        (
            "nested_local_to_global",
            2,
            translate::nested_local_to_global,
            translate::nested_local_to_global_form,
        ),
        (
            "nested_index",
            2,
            translate::nested_index,
            translate::nested_index_form,
        ),
        (
            "event_index",
            1,
            translate::event_index,
            translate::event_index_form,
        ),
        (
            "distinct_parent",
            2,
            decay::distinct_parent,
            decay::distinct_parent_form,
        ),
        ("children", 2, decay::children, decay::children_form),
        (
            "distinct_children_deep",
            3,
            decay::distinct_children_deep,
            decay::distinct_children_deep_form,
        ),
        (
            "index_ranges",
            2,
            range::index_ranges,
            range::index_ranges_form,
        ),
        (
            "begin_end_mapping",
            3,
            range::begin_end_mapping,
            range::begin_end_mapping_form,
        ),
        (
            "begin_end_mapping_nested",
            3,
            range::begin_end_mapping_nested,
            range::begin_end_mapping_nested_form,
        ),
        (
            "begin_end_mapping_points",
            3,
            range::begin_end_mapping_points,
            range::begin_end_mapping_points_form,
        ),
    ];

    for &(name, arity, data, form) in table {
        registry.register(Operation::new(name, arity, data, form))?;
    }
    Ok(())
}

/// A registry with the full cascade operation set installed.
pub fn standard_registry() -> Registry {
    let mut registry = Registry::new();
    register_all(&mut registry).expect("standard operation names are unique");
    registry
}
