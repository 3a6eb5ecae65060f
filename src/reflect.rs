//! Reflection data model and the capability facade.
//!
//! This module defines what the rest of the crate knows about a reflected
//! object graph:
//! - [`ObjectId`]: identity of one object in the graph
//! - [`Object`]: everything the host runtime reported about that object
//! - [`ObjectKind`]: a closed variant over the runtime's kind taxonomy
//! - [`Signature`] / [`Parameter`]: ordered callable parameter lists
//! - [`Reflect`]: the facade trait the walker, oracle, and formatter consume
//!
//! The facade is deliberately read-only and infallible: a value with no
//! source location or no signature reports `None`, never an error. Absence
//! of provenance is a normal case (builtins, dynamically constructed
//! namespaces), not a failure.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ============================================================================
// Identity
// ============================================================================

/// Identity of one object within a reflection snapshot.
///
/// Two members referring to the same `ObjectId` are aliases of the same
/// object; the visitation ledger keys on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Create a new object ID.
    pub fn new(id: u32) -> Self {
        ObjectId(id)
    }

    /// Arena index for this ID.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obj_{}", self.0)
    }
}

// ============================================================================
// Kinds
// ============================================================================

/// Closed variant over the runtime's kind taxonomy.
///
/// The host runtime classifies every reachable value into exactly one of
/// these. `Package`, `Module`, and `Class` are namespaces (they have
/// members and the walker may recurse into them); everything else is a
/// terminal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectKind {
    /// A package: a namespace whose source location is a directory.
    Package,
    /// A plain (non-package) module.
    Module,
    /// A class.
    Class,
    /// A plain function.
    Function,
    /// A bound method; `receiver` is the object it is bound to, when the
    /// runtime reported one.
    Method {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        receiver: Option<ObjectId>,
    },
    /// An unbound method descriptor; `owner` is its declared owning class.
    MethodDescriptor {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        owner: Option<ObjectId>,
    },
    /// A property with up to three accessor functions.
    Property {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        getter: Option<ObjectId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        setter: Option<ObjectId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        deleter: Option<ObjectId>,
    },
    /// A builtin/native callable with no reliable source attribution.
    Builtin,
    /// Any other terminal value.
    Value,
}

impl ObjectKind {
    /// True for kinds the walker may recurse into.
    pub fn is_namespace(&self) -> bool {
        matches!(
            self,
            ObjectKind::Package | ObjectKind::Module | ObjectKind::Class
        )
    }

    /// True for module-like kinds (packages included).
    pub fn is_module(&self) -> bool {
        matches!(self, ObjectKind::Package | ObjectKind::Module)
    }
}

// ============================================================================
// Source locations
// ============================================================================

/// Defining source location reported by the runtime.
///
/// Packages report the directory holding their sources; everything else
/// reports the file it was defined in. Dynamically constructed objects
/// report nothing at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceLocation {
    /// Defined in this source file.
    File(PathBuf),
    /// A package rooted at this directory.
    Dir(PathBuf),
}

impl SourceLocation {
    /// The path regardless of file/directory flavor.
    pub fn path(&self) -> &Path {
        match self {
            SourceLocation::File(p) => p,
            SourceLocation::Dir(p) => p,
        }
    }

    /// The file path, if this is a file location.
    pub fn file(&self) -> Option<&Path> {
        match self {
            SourceLocation::File(p) => Some(p),
            SourceLocation::Dir(_) => None,
        }
    }

    /// The directory path, if this is a directory location.
    pub fn dir(&self) -> Option<&Path> {
        match self {
            SourceLocation::File(_) => None,
            SourceLocation::Dir(p) => Some(p),
        }
    }
}

// ============================================================================
// Signatures
// ============================================================================

/// Parameter kind tags, mirroring the runtime's parameter taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Positional-only parameter.
    PositionalOnly,
    /// Ordinary parameter, fillable positionally or by keyword.
    PositionalOrKeyword,
    /// Variadic positional (`*args`).
    VarPositional,
    /// Keyword-only parameter.
    KeywordOnly,
    /// Variadic keyword (`**kwargs`).
    VarKeyword,
}

/// A type annotation attached to a parameter or return value.
///
/// Annotations that are themselves types render by bare name; any more
/// exotic annotation form renders by its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Annotation {
    /// The annotation is a type; render its bare name.
    Type(String),
    /// Anything else; render verbatim.
    Expr(String),
}

impl Annotation {
    /// Display text for this annotation.
    pub fn text(&self) -> &str {
        match self {
            Annotation::Type(name) => name,
            Annotation::Expr(text) => text,
        }
    }
}

/// A parameter default value.
///
/// String defaults render quoted; every other default renders by its
/// textual form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    /// A string default; rendered as `"..."`.
    Str(String),
    /// Any other default; rendered verbatim.
    Expr(String),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Str(s) => write!(f, "\"{}\"", s),
            DefaultValue::Expr(text) => write!(f, "{}", text),
        }
    }
}

/// One ordered callable parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter kind tag.
    pub kind: ParamKind,
    /// Default value, if the parameter has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    /// Type annotation, if the parameter carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Annotation>,
}

impl Parameter {
    /// A bare parameter with no default and no annotation.
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Parameter {
            name: name.into(),
            kind,
            default: None,
            annotation: None,
        }
    }

    /// Attach a default value.
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Attach a type annotation.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = Some(annotation);
        self
    }

    /// Full textual form: name, annotation, default.
    ///
    /// Used as the generic fallback for parameter kinds with no dedicated
    /// rendering (positional-only and keyword-only markers, receivers).
    pub fn text(&self) -> String {
        let mut out = self.name.clone();
        if let Some(ann) = &self.annotation {
            out.push_str("::");
            out.push_str(ann.text());
        }
        if let Some(default) = &self.default {
            out.push('=');
            out.push_str(&default.to_string());
        }
        out
    }
}

/// An introspected callable signature: ordered parameters plus an optional
/// return annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Signature {
    /// Parameters in declaration order. Order is significant.
    pub params: Vec<Parameter>,
    /// Return annotation, if the callable declares one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_annotation: Option<Annotation>,
}

/// Signature introspection outcome for an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SignatureState {
    /// The object is not callable; no signature applies.
    #[default]
    NotCallable,
    /// The object is callable but its signature could not be introspected.
    /// Renders as `(???)`.
    Opaque,
    /// The signature was introspected successfully.
    Known(Signature),
}

// ============================================================================
// Objects and members
// ============================================================================

/// One named member of a namespace. Enumeration order is significant and
/// preserved end to end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Attribute name under which the target is reachable.
    pub name: String,
    /// The member's value.
    pub target: ObjectId,
}

impl Member {
    /// Create a new member entry.
    pub fn new(name: impl Into<String>, target: ObjectId) -> Self {
        Member {
            name: name.into(),
            target,
        }
    }
}

/// Everything the host runtime reported about one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    /// Qualified (dotted) name.
    pub qualname: String,
    /// Kind classification.
    #[serde(flatten)]
    pub kind: ObjectKind,
    /// Reported runtime type name (`module`, `type`, `function`, the
    /// instance type for plain values, ...). Used as the display kind tag.
    pub type_name: String,
    /// Dotted name of the owning package or module, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Defining source location, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceLocation>,
    /// Underlying target if this object is a decorated indirection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapped: Option<ObjectId>,
    /// Ordered members, for namespace kinds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,
    /// Signature introspection outcome.
    #[serde(default)]
    pub signature: SignatureState,
}

// ============================================================================
// Facade
// ============================================================================

/// The reflection capability facade.
///
/// The walker, canonicality oracle, scope classifier, and formatter are
/// generic over this trait; [`crate::graph::ObjectGraph`] is the shipped
/// implementation. Every method is read-only and total: callers must
/// treat `None`/empty answers as normal, not exceptional.
pub trait Reflect {
    /// Ordered members of a namespace. Empty for terminal values.
    fn members(&self, id: ObjectId) -> &[Member];

    /// Kind classification of an object.
    fn kind(&self, id: ObjectId) -> &ObjectKind;

    /// Qualified name of an object.
    fn qualname(&self, id: ObjectId) -> &str;

    /// Reported runtime type name of an object.
    fn type_name(&self, id: ObjectId) -> &str;

    /// Dotted name of the owning package or module, when reported.
    fn owner(&self, id: ObjectId) -> Option<&str>;

    /// Defining source location, when reported.
    fn defining_source(&self, id: ObjectId) -> Option<&SourceLocation>;

    /// Follow decorated indirections to the underlying target.
    ///
    /// Returns `id` unchanged for objects that wrap nothing. Chains of
    /// wrappers are followed to the end.
    fn resolve_wrapped(&self, id: ObjectId) -> ObjectId;

    /// Signature introspection outcome for an object.
    fn signature(&self, id: ObjectId) -> &SignatureState;
}

// ============================================================================
// Tests
// ============================================================================
