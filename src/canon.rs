//! Canonicality oracle: does a symbol *belong* to a namespace?
//!
//! The host runtime does not record "defined here" versus "imported
//! here" as a first-class fact, so this is a layered heuristic with a
//! known residual error rate, applied in ranked order:
//!
//! 1. Unwrap decorated indirections on both the namespace and the value
//!    before anything else.
//! 2. Builtins are never canonical — no reliable source attribution
//!    exists for them.
//! 3. Package namespace: a sub-namespace is canonical iff its source
//!    location is nested inside the package directory; any other value
//!    is canonical iff it was defined in the package's initializer file.
//! 4. Module namespace: a value is canonical iff it was defined in the
//!    module's own source file.
//! 5. Class namespace: a bound method must be bound to exactly this
//!    class (inherited methods are not canonical to the subclass — no
//!    MRO walk); a method descriptor must declare this class as owner; a
//!    plain function's qualified path, minus its trailing member name,
//!    must equal the class's bare name; a property is canonical if any
//!    of its function-valued accessors passes the function rule;
//!    anything else is canonical by default.
//!
//! Missing provenance (no source location, no receiver) always answers
//! "no", never an error. The oracle is consulted only in canonical
//! display mode.

use std::path::PathBuf;

use crate::reflect::{ObjectId, ObjectKind, Reflect, SourceLocation};

/// Conventional package initializer file name, joined onto the package
/// directory when a package's own defining file is needed.
const PACKAGE_INITIALIZER: &str = "__init__.py";

/// Decide whether `value` is defined in `namespace` rather than merely
/// reachable from it.
pub fn is_canonical<R: Reflect>(graph: &R, namespace: ObjectId, value: ObjectId) -> bool {
    let namespace = graph.resolve_wrapped(namespace);
    let value = graph.resolve_wrapped(value);

    if matches!(graph.kind(value), ObjectKind::Builtin) {
        return false;
    }

    match graph.kind(namespace) {
        ObjectKind::Package => in_package(graph, namespace, value),
        ObjectKind::Module => same_source_file(graph, namespace, value),
        _ => in_class(graph, namespace, value),
    }
}

/// Package rule: sub-namespaces by directory nesting, plain values by
/// initializer-file equality.
fn in_package<R: Reflect>(graph: &R, package: ObjectId, value: ObjectId) -> bool {
    let Some(pkg_dir) = graph.defining_source(package).and_then(SourceLocation::dir) else {
        return false;
    };
    if graph.kind(value).is_module() {
        // Sub-package directory or module file nested under the package
        // directory. Component-wise prefix, so `pkg2/` never matches `pkg/`.
        match graph.defining_source(value) {
            Some(loc) => loc.path().starts_with(pkg_dir),
            None => false,
        }
    } else {
        let initializer: PathBuf = pkg_dir.join(PACKAGE_INITIALIZER);
        match graph.defining_source(value).and_then(SourceLocation::file) {
            Some(file) => file == initializer,
            None => false,
        }
    }
}

/// Module rule: defined in the module's own source file.
fn same_source_file<R: Reflect>(graph: &R, module: ObjectId, value: ObjectId) -> bool {
    let module_file = graph.defining_source(module).and_then(SourceLocation::file);
    let value_file = graph.defining_source(value).and_then(SourceLocation::file);
    match (module_file, value_file) {
        (Some(m), Some(v)) => m == v,
        _ => false,
    }
}

/// Class rules, dispatched on the value's kind.
fn in_class<R: Reflect>(graph: &R, class: ObjectId, value: ObjectId) -> bool {
    match graph.kind(value) {
        ObjectKind::Method { receiver } => *receiver == Some(class),
        ObjectKind::MethodDescriptor { owner } => *owner == Some(class),
        ObjectKind::Function => declared_in_class(graph, class, value),
        ObjectKind::Property {
            getter,
            setter,
            deleter,
        } => [getter, setter, deleter]
            .into_iter()
            .flatten()
            .any(|accessor| {
                matches!(graph.kind(*accessor), ObjectKind::Function)
                    && declared_in_class(graph, class, *accessor)
            }),
        _ => true,
    }
}

/// Function rule: the qualified declaration path, stripped of its
/// trailing member name, must equal the class's bare name.
///
/// Deliberately literal: a method of a nested class carries the outer
/// path too and will not match. No attempt is made to improve on the
/// heuristic.
fn declared_in_class<R: Reflect>(graph: &R, class: ObjectId, function: ObjectId) -> bool {
    let qualname = graph.qualname(function);
    let declared_owner = qualname
        .rsplit_once('.')
        .map(|(owner, _)| owner)
        .unwrap_or(qualname);
    let class_name = graph.qualname(class).rsplit('.').next().unwrap_or_default();
    declared_owner == class_name
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::reflect::SignatureState;

    #[test]
    fn builtins_are_never_canonical() {
        let mut g = GraphBuilder::new();
        let module = g.module("pkg.util", "/src/pkg/util.py");
        let len = g.builtin("len");
        let graph = g.finish();

        assert!(!is_canonical(&graph, module, len));
    }

    #[test]
    fn module_owns_values_from_its_own_file() {
        let mut g = GraphBuilder::new();
        let module = g.module("pkg.util", "/src/pkg/util.py");
        let local = g.function("pkg.util.f", "/src/pkg/util.py");
        let imported = g.function("other.g", "/src/other.py");
        let graph = g.finish();

        assert!(is_canonical(&graph, module, local));
        assert!(!is_canonical(&graph, module, imported));
    }

    #[test]
    fn value_without_source_is_not_canonical_to_a_module() {
        let mut g = GraphBuilder::new();
        let module = g.module("pkg.util", "/src/pkg/util.py");
        let dynamic = g.value("made_up", "object");
        let graph = g.finish();

        assert!(!is_canonical(&graph, module, dynamic));
    }

    #[test]
    fn package_owns_nested_subpackages_and_modules() {
        let mut g = GraphBuilder::new();
        let pkg = g.package("pkg", "/src/pkg");
        let sub = g.package("pkg.sub", "/src/pkg/sub");
        let module = g.module("pkg.util", "/src/pkg/util.py");
        let foreign = g.module("other", "/elsewhere/other.py");
        let graph = g.finish();

        assert!(is_canonical(&graph, pkg, sub));
        assert!(is_canonical(&graph, pkg, module));
        assert!(!is_canonical(&graph, pkg, foreign));
    }

    #[test]
    fn sibling_directory_prefix_does_not_leak() {
        let mut g = GraphBuilder::new();
        let pkg = g.package("pkg", "/src/pkg");
        let sibling = g.module("pkg2.util", "/src/pkg2/util.py");
        let graph = g.finish();

        // "/src/pkg2" is a string prefix of neither component of "/src/pkg".
        assert!(!is_canonical(&graph, pkg, sibling));
    }

    #[test]
    fn package_owns_values_from_its_initializer_only() {
        let mut g = GraphBuilder::new();
        let pkg = g.package("pkg", "/src/pkg");
        let in_init = g.function("pkg.f", "/src/pkg/__init__.py");
        let in_submodule = g.function("pkg.util.g", "/src/pkg/util.py");
        let graph = g.finish();

        assert!(is_canonical(&graph, pkg, in_init));
        // Reachable at package level through a re-export, but defined in
        // a submodule file.
        assert!(!is_canonical(&graph, pkg, in_submodule));
    }

    #[test]
    fn bound_method_requires_exact_receiver() {
        let mut g = GraphBuilder::new();
        let base = g.class("Base", "/src/pkg/util.py");
        let derived = g.class("Derived", "/src/pkg/util.py");
        let inherited = g.method("Base.m", "/src/pkg/util.py", Some(base));
        let own = g.method("Derived.n", "/src/pkg/util.py", Some(derived));
        let unbound = g.method("Base.o", "/src/pkg/util.py", None);
        let graph = g.finish();

        assert!(is_canonical(&graph, derived, own));
        // Inherited from Base: reachable from Derived but not canonical there.
        assert!(!is_canonical(&graph, derived, inherited));
        assert!(is_canonical(&graph, base, inherited));
        assert!(!is_canonical(&graph, base, unbound));
    }

    #[test]
    fn descriptor_requires_declared_owner() {
        let mut g = GraphBuilder::new();
        let class = g.class("Vec", "/src/pkg/vec.py");
        let other = g.class("Mat", "/src/pkg/mat.py");
        let desc = g.push(crate::reflect::Object {
            qualname: "Vec.norm".into(),
            kind: ObjectKind::MethodDescriptor { owner: Some(class) },
            type_name: "method_descriptor".into(),
            owner: Some("pkg.vec".into()),
            source: None,
            wrapped: None,
            members: Vec::new(),
            signature: SignatureState::Opaque,
        });
        let graph = g.finish();

        assert!(is_canonical(&graph, class, desc));
        assert!(!is_canonical(&graph, other, desc));
    }

    #[test]
    fn plain_function_matches_class_by_qualified_path() {
        let mut g = GraphBuilder::new();
        let class = g.class("pkg.util.Helper", "/src/pkg/util.py");
        let own = g.function("Helper.run", "/src/pkg/util.py");
        let foreign = g.function("Other.run", "/src/pkg/util.py");
        let toplevel = g.function("run", "/src/pkg/util.py");
        let graph = g.finish();

        assert!(is_canonical(&graph, class, own));
        assert!(!is_canonical(&graph, class, foreign));
        assert!(!is_canonical(&graph, class, toplevel));
    }

    #[test]
    fn property_follows_its_accessor_functions() {
        let mut g = GraphBuilder::new();
        let class = g.class("Helper", "/src/pkg/util.py");
        let getter = g.function("Helper.x", "/src/pkg/util.py");
        let foreign_setter = g.function("Other.set_x", "/src/pkg/util.py");
        let owned = g.push(crate::reflect::Object {
            qualname: "Helper.x".into(),
            kind: ObjectKind::Property {
                getter: Some(getter),
                setter: Some(foreign_setter),
                deleter: None,
            },
            type_name: "property".into(),
            owner: Some("pkg.util".into()),
            source: None,
            wrapped: None,
            members: Vec::new(),
            signature: SignatureState::NotCallable,
        });
        let orphan = g.push(crate::reflect::Object {
            qualname: "Helper.y".into(),
            kind: ObjectKind::Property {
                getter: None,
                setter: None,
                deleter: None,
            },
            type_name: "property".into(),
            owner: Some("pkg.util".into()),
            source: None,
            wrapped: None,
            members: Vec::new(),
            signature: SignatureState::NotCallable,
        });
        let graph = g.finish();

        // One matching accessor is enough.
        assert!(is_canonical(&graph, class, owned));
        assert!(!is_canonical(&graph, class, orphan));
    }

    #[test]
    fn other_class_members_are_canonical_by_default() {
        let mut g = GraphBuilder::new();
        let class = g.class("Helper", "/src/pkg/util.py");
        let constant = g.value("LIMIT", "int");
        let graph = g.finish();

        assert!(is_canonical(&graph, class, constant));
    }

    #[test]
    fn indirections_unwrap_before_evaluation() {
        let mut g = GraphBuilder::new();
        let module = g.module("pkg.util", "/src/pkg/util.py");
        let target = g.function("pkg.util.f", "/src/pkg/util.py");
        let wrapper = g.function("pkg.util.f", "/src/decorators.py");
        g.set_wrapped(wrapper, target);
        let graph = g.finish();

        // The wrapper reports the decorator's source file; the unwrapped
        // target is what gets judged.
        assert!(is_canonical(&graph, module, wrapper));
    }
}
