//! lsapi: list the names a loaded package exposes, as a readable tree.
//!
//! Walks everything reachable from a root namespace — sub-namespaces,
//! types, callables, data values — and renders one line per symbol. Two
//! decision procedures do the real work: the canonicality oracle
//! ([`canon`]), which judges whether a symbol is *defined in* a namespace
//! or merely visible there, and the visitation ledger ([`walk`]), which
//! keeps an aliased, cyclic symbol graph from recursing forever or
//! printing the same subtree twice.
//!
//! Reflection is a capability interface: the traversal is generic over
//! [`reflect::Reflect`], and [`graph::ObjectGraph`] is the shipped
//! provider, loaded from a JSON snapshot of the host runtime's object
//! graph.

// Reflection model and providers
pub mod graph;
pub mod reflect;

// Decision procedures
pub mod canon;
pub mod filter;
pub mod scope;

// Rendering
pub mod format;
pub mod style;
pub mod walk;

// Error handling
pub mod error;

pub use error::LsapiError;
