//! Arena-backed reflection snapshot: the shipped [`Reflect`] provider.
//!
//! An [`ObjectGraph`] holds every reflected object in a flat arena indexed
//! by [`ObjectId`]. Identity is the arena index, so aliasing (one object
//! reachable under many names) and re-export cycles are representable
//! directly; the walker's ledger keys on the index.
//!
//! Snapshots arrive as JSON produced by a host-runtime dumper. All object
//! references (members, wrappers, receivers, owners, property accessors)
//! are validated eagerly at load time so traversal never sees a dangling
//! id and can index the arena without checks.
//!
//! [`GraphBuilder`] constructs graphs in memory, for tests and for
//! embedders that own a live reflection source. Members are wired after
//! nodes exist, so cycles are straightforward to build.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LsapiError;
use crate::reflect::{
    Member, Object, ObjectId, ObjectKind, Parameter, Reflect, Signature, SignatureState,
    SourceLocation,
};

// ============================================================================
// ObjectGraph
// ============================================================================

/// A validated reflection snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectGraph {
    objects: Vec<Object>,
}

impl ObjectGraph {
    /// Parse a snapshot from JSON and validate all object references.
    pub fn from_json(json: &str) -> Result<ObjectGraph, LsapiError> {
        let graph: ObjectGraph = serde_json::from_str(json)?;
        graph.validate()?;
        Ok(graph)
    }

    /// Read and parse a snapshot file.
    pub fn load(path: &Path) -> Result<ObjectGraph, LsapiError> {
        let json = fs::read_to_string(path).map_err(|source| LsapiError::SnapshotRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Number of objects in the snapshot.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if the snapshot holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Access one object.
    pub fn get(&self, id: ObjectId) -> &Object {
        &self.objects[id.index()]
    }

    /// Find the namespace with the given qualified name.
    ///
    /// Used to locate the requested root package; terminal values are not
    /// addressable this way.
    pub fn resolve(&self, qualname: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .position(|obj| obj.kind.is_namespace() && obj.qualname == qualname)
            .map(|idx| ObjectId::new(idx as u32))
    }

    /// Check that every object reference lands inside the arena.
    fn validate(&self) -> Result<(), LsapiError> {
        let len = self.objects.len();
        let check = |parent: &Object, name: &str, target: ObjectId| {
            if target.index() >= len {
                Err(LsapiError::DanglingReference {
                    parent: parent.qualname.clone(),
                    name: name.to_string(),
                    target,
                })
            } else {
                Ok(())
            }
        };
        for obj in &self.objects {
            for member in &obj.members {
                check(obj, &member.name, member.target)?;
            }
            if let Some(target) = obj.wrapped {
                check(obj, "__wrapped__", target)?;
            }
            match &obj.kind {
                ObjectKind::Method { receiver: Some(id) } => check(obj, "__self__", *id)?,
                ObjectKind::MethodDescriptor { owner: Some(id) } => check(obj, "__objclass__", *id)?,
                ObjectKind::Property {
                    getter,
                    setter,
                    deleter,
                } => {
                    for id in [getter, setter, deleter].into_iter().flatten() {
                        check(obj, "accessor", *id)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl Reflect for ObjectGraph {
    fn members(&self, id: ObjectId) -> &[Member] {
        &self.get(id).members
    }

    fn kind(&self, id: ObjectId) -> &ObjectKind {
        &self.get(id).kind
    }

    fn qualname(&self, id: ObjectId) -> &str {
        &self.get(id).qualname
    }

    fn type_name(&self, id: ObjectId) -> &str {
        &self.get(id).type_name
    }

    fn owner(&self, id: ObjectId) -> Option<&str> {
        self.get(id).owner.as_deref()
    }

    fn defining_source(&self, id: ObjectId) -> Option<&SourceLocation> {
        self.get(id).source.as_ref()
    }

    fn resolve_wrapped(&self, id: ObjectId) -> ObjectId {
        // Bounded so a malformed wrapper cycle cannot hang the traversal.
        let mut current = id;
        for _ in 0..self.objects.len() {
            match self.get(current).wrapped {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    fn signature(&self, id: ObjectId) -> &SignatureState {
        &self.get(id).signature
    }
}

// ============================================================================
// GraphBuilder
// ============================================================================

/// In-memory graph construction.
///
/// Nodes are created first, then wired together with [`member`]; cyclic
/// member references need no special handling. The convenience
/// constructors fill in the type name, owner, and signature defaults a
/// host-runtime dumper would report for that kind; everything is
/// overridable afterwards.
///
/// [`member`]: GraphBuilder::member
#[derive(Debug, Default)]
pub struct GraphBuilder {
    objects: Vec<Object>,
}

impl GraphBuilder {
    /// Start an empty graph.
    pub fn new() -> Self {
        GraphBuilder::default()
    }

    /// Add an arbitrary object.
    pub fn push(&mut self, object: Object) -> ObjectId {
        let id = ObjectId::new(self.objects.len() as u32);
        self.objects.push(object);
        id
    }

    /// Add a package rooted at `dir`. Its owner is itself.
    pub fn package(&mut self, qualname: &str, dir: impl Into<PathBuf>) -> ObjectId {
        self.push(Object {
            qualname: qualname.to_string(),
            kind: ObjectKind::Package,
            type_name: "module".to_string(),
            owner: Some(qualname.to_string()),
            source: Some(SourceLocation::Dir(dir.into())),
            wrapped: None,
            members: Vec::new(),
            signature: SignatureState::NotCallable,
        })
    }

    /// Add a plain module defined in `file`. Its owner is its dotted parent.
    pub fn module(&mut self, qualname: &str, file: impl Into<PathBuf>) -> ObjectId {
        self.push(Object {
            qualname: qualname.to_string(),
            kind: ObjectKind::Module,
            type_name: "module".to_string(),
            owner: dotted_parent(qualname),
            source: Some(SourceLocation::File(file.into())),
            wrapped: None,
            members: Vec::new(),
            signature: SignatureState::NotCallable,
        })
    }

    /// Add a class defined in `file`.
    pub fn class(&mut self, qualname: &str, file: impl Into<PathBuf>) -> ObjectId {
        self.push(Object {
            qualname: qualname.to_string(),
            kind: ObjectKind::Class,
            type_name: "type".to_string(),
            owner: dotted_parent(qualname),
            source: Some(SourceLocation::File(file.into())),
            wrapped: None,
            members: Vec::new(),
            signature: SignatureState::Known(Signature::default()),
        })
    }

    /// Add a plain function defined in `file`.
    pub fn function(&mut self, qualname: &str, file: impl Into<PathBuf>) -> ObjectId {
        self.push(Object {
            qualname: qualname.to_string(),
            kind: ObjectKind::Function,
            type_name: "function".to_string(),
            owner: dotted_parent(qualname),
            source: Some(SourceLocation::File(file.into())),
            wrapped: None,
            members: Vec::new(),
            signature: SignatureState::Known(Signature::default()),
        })
    }

    /// Add a bound method with the given receiver.
    pub fn method(
        &mut self,
        qualname: &str,
        file: impl Into<PathBuf>,
        receiver: Option<ObjectId>,
    ) -> ObjectId {
        self.push(Object {
            qualname: qualname.to_string(),
            kind: ObjectKind::Method { receiver },
            type_name: "method".to_string(),
            owner: dotted_parent(qualname),
            source: Some(SourceLocation::File(file.into())),
            wrapped: None,
            members: Vec::new(),
            signature: SignatureState::Known(Signature::default()),
        })
    }

    /// Add a builtin callable: no source, opaque signature.
    pub fn builtin(&mut self, qualname: &str) -> ObjectId {
        self.push(Object {
            qualname: qualname.to_string(),
            kind: ObjectKind::Builtin,
            type_name: "builtin_function_or_method".to_string(),
            owner: None,
            source: None,
            wrapped: None,
            members: Vec::new(),
            signature: SignatureState::Opaque,
        })
    }

    /// Add a terminal data value of the given runtime type.
    pub fn value(&mut self, name: &str, type_name: &str) -> ObjectId {
        self.push(Object {
            qualname: name.to_string(),
            kind: ObjectKind::Value,
            type_name: type_name.to_string(),
            owner: None,
            source: None,
            wrapped: None,
            members: Vec::new(),
            signature: SignatureState::NotCallable,
        })
    }

    /// Append a named member to a namespace. Order of calls is the
    /// enumeration order the walker sees.
    pub fn member(&mut self, parent: ObjectId, name: &str, target: ObjectId) -> &mut Self {
        self.objects[parent.index()]
            .members
            .push(Member::new(name, target));
        self
    }

    /// Override an object's owning module/package name.
    pub fn set_owner(&mut self, id: ObjectId, owner: Option<&str>) -> &mut Self {
        self.objects[id.index()].owner = owner.map(str::to_string);
        self
    }

    /// Override an object's defining source location.
    pub fn set_source(&mut self, id: ObjectId, source: Option<SourceLocation>) -> &mut Self {
        self.objects[id.index()].source = source;
        self
    }

    /// Mark an object as a decorated indirection over `target`.
    pub fn set_wrapped(&mut self, id: ObjectId, target: ObjectId) -> &mut Self {
        self.objects[id.index()].wrapped = Some(target);
        self
    }

    /// Replace an object's signature state.
    pub fn set_signature(&mut self, id: ObjectId, state: SignatureState) -> &mut Self {
        self.objects[id.index()].signature = state;
        self
    }

    /// Set an introspected signature from a parameter list.
    pub fn signature(
        &mut self,
        id: ObjectId,
        params: Vec<Parameter>,
        return_annotation: Option<crate::reflect::Annotation>,
    ) -> &mut Self {
        self.set_signature(
            id,
            SignatureState::Known(Signature {
                params,
                return_annotation,
            }),
        )
    }

    /// Finish construction.
    pub fn finish(self) -> ObjectGraph {
        ObjectGraph {
            objects: self.objects,
        }
    }
}

/// Dotted parent of a qualified name, if it has one.
fn dotted_parent(qualname: &str) -> Option<String> {
    qualname
        .rsplit_once('.')
        .map(|(parent, _)| parent.to_string())
}

// ============================================================================
// Tests
// ============================================================================
