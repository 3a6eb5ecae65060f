//! Symbol formatting: one display line per symbol.
//!
//! A formatted symbol is `ColoredName::kind`. The kind tag is `package`
//! for a namespace rooted at a source directory, otherwise the value's
//! reported runtime type name. With signatures enabled, callables render
//! their parameter list and return annotation inline; a callable whose
//! signature could not be introspected renders `(???)` with the
//! placeholder flagged in red.

use crate::reflect::{ObjectId, ParamKind, Parameter, Reflect, SignatureState, SourceLocation};
use crate::style::{kind_color, Palette, ARG_COLOR, KWARG_COLOR, PLAIN_COLOR, WARN_COLOR};

/// Compute the display kind tag for an object.
pub fn display_tag<R: Reflect>(graph: &R, id: ObjectId) -> String {
    let is_package = graph.kind(id).is_namespace()
        && matches!(graph.defining_source(id), Some(SourceLocation::Dir(_)));
    if is_package {
        "package".to_string()
    } else {
        graph.type_name(id).to_string()
    }
}

/// Renders symbol display lines.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    /// Render parameter lists for callables.
    pub signatures: bool,
    /// Color application.
    pub palette: Palette,
}

impl Formatter {
    /// Format one symbol occurrence as `ColoredName::kind`.
    ///
    /// `name` is the attribute name the symbol was reached under, which
    /// for aliases differs from the object's own qualified name.
    pub fn format<R: Reflect>(&self, name: &str, graph: &R, id: ObjectId) -> String {
        let tag = display_tag(graph, id);
        let color = kind_color(&tag);

        let mut display = name.to_string();
        if self.signatures {
            match graph.signature(id) {
                SignatureState::NotCallable => {}
                SignatureState::Opaque => {
                    display = format!("{}({})", display, self.palette.bold("???", WARN_COLOR));
                }
                SignatureState::Known(sig) => {
                    let params: Vec<String> =
                        sig.params.iter().map(|p| self.parameter(p)).collect();
                    display = format!("{}({})", display, params.join(", "));
                    if let Some(ret) = &sig.return_annotation {
                        display = format!("{} -> {}", display, ret.text());
                    }
                }
            }
        }

        format!("{}::{}", self.palette.paint(&display, color), tag)
    }

    /// Format one parameter per its kind.
    fn parameter(&self, param: &Parameter) -> String {
        // Annotated names render as name::Type before kind styling.
        let name = match &param.annotation {
            Some(ann) => format!("{}::{}", param.name, ann.text()),
            None => param.name.clone(),
        };

        if param.name == "self" || param.name == "cls" {
            // Receiver parameters: emphasized, no kind decoration.
            return self.palette.bold(&param.text(), PLAIN_COLOR);
        }

        match param.kind {
            ParamKind::VarPositional => format!("*{}", self.palette.bold(&name, ARG_COLOR)),
            ParamKind::VarKeyword => format!("**{}", self.palette.bold(&name, KWARG_COLOR)),
            ParamKind::PositionalOrKeyword => match &param.default {
                Some(default) => format!(
                    "{}={}",
                    self.palette.paint(&name, KWARG_COLOR),
                    self.palette.paint(&default.to_string(), PLAIN_COLOR)
                ),
                None => self.palette.paint(&name, ARG_COLOR),
            },
            // Positional-only / keyword-only and friends: generic fallback.
            _ => self.palette.paint(&param.text(), ARG_COLOR),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::reflect::{Annotation, DefaultValue, Signature};

    fn formatter(signatures: bool) -> Formatter {
        Formatter {
            signatures,
            palette: Palette::plain(),
        }
    }

    #[test]
    fn package_tag_wins_over_type_name() {
        let mut g = GraphBuilder::new();
        let pkg = g.package("pkg", "/src/pkg");
        let module = g.module("pkg.util", "/src/pkg/util.py");
        let graph = g.finish();

        assert_eq!(formatter(false).format("pkg", &graph, pkg), "pkg::package");
        assert_eq!(
            formatter(false).format("util", &graph, module),
            "util::module"
        );
    }

    #[test]
    fn plain_values_use_their_type_name() {
        let mut g = GraphBuilder::new();
        let version = g.value("version", "str");
        let graph = g.finish();

        assert_eq!(
            formatter(false).format("version", &graph, version),
            "version::str"
        );
    }

    #[test]
    fn signatures_off_leaves_callables_bare() {
        let mut g = GraphBuilder::new();
        let f = g.function("pkg.f", "/src/pkg/mod.py");
        g.signature(
            f,
            vec![Parameter::new("x", ParamKind::PositionalOrKeyword)],
            None,
        );
        let graph = g.finish();

        assert_eq!(formatter(false).format("f", &graph, f), "f::function");
    }

    #[test]
    fn positional_and_defaulted_parameters() {
        let mut g = GraphBuilder::new();
        let f = g.function("pkg.f", "/src/pkg/mod.py");
        g.signature(
            f,
            vec![
                Parameter::new("x", ParamKind::PositionalOrKeyword),
                Parameter::new("y", ParamKind::PositionalOrKeyword)
                    .with_default(DefaultValue::Expr("2".into())),
            ],
            None,
        );
        let graph = g.finish();

        assert_eq!(
            formatter(true).format("f", &graph, f),
            "f(x, y=2)::function"
        );
    }

    #[test]
    fn string_defaults_are_quoted() {
        let mut g = GraphBuilder::new();
        let f = g.function("pkg.f", "/src/pkg/mod.py");
        g.signature(
            f,
            vec![Parameter::new("sep", ParamKind::PositionalOrKeyword)
                .with_default(DefaultValue::Str(", ".into()))],
            None,
        );
        let graph = g.finish();

        assert_eq!(
            formatter(true).format("f", &graph, f),
            "f(sep=\", \")::function"
        );
    }

    #[test]
    fn variadic_markers() {
        let mut g = GraphBuilder::new();
        let f = g.function("pkg.f", "/src/pkg/mod.py");
        g.signature(
            f,
            vec![
                Parameter::new("args", ParamKind::VarPositional),
                Parameter::new("kwargs", ParamKind::VarKeyword),
            ],
            None,
        );
        let graph = g.finish();

        assert_eq!(
            formatter(true).format("f", &graph, f),
            "f(*args, **kwargs)::function"
        );
    }

    #[test]
    fn annotations_and_return_type() {
        let mut g = GraphBuilder::new();
        let f = g.function("pkg.f", "/src/pkg/mod.py");
        g.signature(
            f,
            vec![
                Parameter::new("x", ParamKind::PositionalOrKeyword)
                    .with_annotation(Annotation::Type("int".into())),
                Parameter::new("hint", ParamKind::PositionalOrKeyword)
                    .with_annotation(Annotation::Expr("Optional[str]".into())),
            ],
            Some(Annotation::Type("bool".into())),
        );
        let graph = g.finish();

        assert_eq!(
            formatter(true).format("f", &graph, f),
            "f(x::int, hint::Optional[str]) -> bool::function"
        );
    }

    #[test]
    fn no_return_annotation_omits_the_arrow() {
        let mut g = GraphBuilder::new();
        let f = g.function("pkg.f", "/src/pkg/mod.py");
        g.set_signature(f, SignatureState::Known(Signature::default()));
        let graph = g.finish();

        assert_eq!(formatter(true).format("f", &graph, f), "f()::function");
    }

    #[test]
    fn receiver_parameters_render_undecorated() {
        let mut g = GraphBuilder::new();
        let class = g.class("Helper", "/src/pkg/mod.py");
        let m = g.method("Helper.run", "/src/pkg/mod.py", Some(class));
        g.signature(
            m,
            vec![
                Parameter::new("self", ParamKind::PositionalOrKeyword),
                Parameter::new("n", ParamKind::PositionalOrKeyword),
            ],
            None,
        );
        let graph = g.finish();

        assert_eq!(
            formatter(true).format("run", &graph, m),
            "run(self, n)::method"
        );
    }

    #[test]
    fn opaque_signature_renders_placeholder() {
        let mut g = GraphBuilder::new();
        let b = g.builtin("len");
        let graph = g.finish();

        assert_eq!(
            formatter(true).format("len", &graph, b),
            "len(???)::builtin_function_or_method"
        );
    }

    #[test]
    fn keyword_only_parameters_use_the_fallback_form() {
        let mut g = GraphBuilder::new();
        let f = g.function("pkg.f", "/src/pkg/mod.py");
        g.signature(
            f,
            vec![Parameter::new("retries", ParamKind::KeywordOnly)
                .with_default(DefaultValue::Expr("3".into()))],
            None,
        );
        let graph = g.finish();

        assert_eq!(
            formatter(true).format("f", &graph, f),
            "f(retries=3)::function"
        );
    }
}
