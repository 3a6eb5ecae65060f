//! Scope classification: is a value inside the root package?
//!
//! Values whose owning package or module falls under the inspected root
//! are "internal"; everything else is foreign and is marked with an
//! external warning instead of being recursed into (unless the caller
//! opts into full external traversal).
//!
//! The match is a dotted-path prefix, not a raw string prefix: root
//! `foo` claims `foo` and `foo.bar`, never `foobar`. Values with no
//! reportable owner are foreign.

use crate::reflect::{ObjectId, Reflect};

/// True if `value`'s owning module/package name falls under the root
/// namespace's qualified name.
pub fn in_root<R: Reflect>(graph: &R, root: ObjectId, value: ObjectId) -> bool {
    let root_name = graph.qualname(root);
    match graph.owner(value) {
        Some(owner) => {
            owner == root_name
                || owner
                    .strip_prefix(root_name)
                    .is_some_and(|rest| rest.starts_with('.'))
        }
        None => false,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn members_of_root_are_internal() {
        let mut g = GraphBuilder::new();
        let pkg = g.package("pkg", "/src/pkg");
        let util = g.module("pkg.util", "/src/pkg/util.py");
        let helper = g.class("pkg.util.Helper", "/src/pkg/util.py");
        let graph = g.finish();

        assert!(in_root(&graph, pkg, pkg));
        assert!(in_root(&graph, pkg, util));
        assert!(in_root(&graph, pkg, helper));
    }

    #[test]
    fn foreign_modules_are_external() {
        let mut g = GraphBuilder::new();
        let pkg = g.package("pkg", "/src/pkg");
        let os = g.package("os", "/usr/lib/python/os");
        let graph = g.finish();

        assert!(!in_root(&graph, pkg, os));
    }

    #[test]
    fn prefix_match_respects_dot_boundaries() {
        let mut g = GraphBuilder::new();
        let pkg = g.package("foo", "/src/foo");
        let lookalike = g.package("foobar", "/src/foobar");
        let nested = g.module("foo.bar", "/src/foo/bar.py");
        let graph = g.finish();

        assert!(!in_root(&graph, pkg, lookalike));
        assert!(in_root(&graph, pkg, nested));
    }

    #[test]
    fn missing_owner_is_external() {
        let mut g = GraphBuilder::new();
        let pkg = g.package("pkg", "/src/pkg");
        let anon = g.value("mystery", "object");
        let graph = g.finish();

        assert!(!in_root(&graph, pkg, anon));
    }
}
