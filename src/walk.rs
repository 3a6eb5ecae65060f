//! Tree traversal: ordering, grouping, recursion guards, emission.
//!
//! The walker is the only writer. It renders the root line at depth 0,
//! then walks members depth-first: enumerate, name-filter, (optionally)
//! consult the canonicality oracle, partition into values / classes /
//! sub-namespaces, and emit each group in enumeration order with tree
//! connectors.
//!
//! The symbol graph is a DAG with aliases, and re-export cycles are
//! common. The [`Ledger`] maps each namespace identity to the path it
//! was first rendered under; a later encounter emits a `[see <path>]`
//! back-reference instead of recursing. This is both the termination
//! guarantee (absent a depth limit) and the duplicate-subtree guard.
//! Terminal values never enter the ledger — the same function object
//! reachable under two names simply renders twice.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::{self, Write};

use tracing::debug;

use crate::canon::is_canonical;
use crate::filter::NameFilter;
use crate::format::{display_tag, Formatter};
use crate::reflect::{Member, ObjectId, ObjectKind, Reflect};
use crate::scope::in_root;
use crate::style::{Palette, TreeStyle, WARN_COLOR};

// ============================================================================
// Options
// ============================================================================

/// Traversal policy for one invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// Name eligibility policy.
    pub filter: NameFilter,
    /// Show symbols only under their canonical namespace.
    pub canonical: bool,
    /// Recurse into namespaces outside the root package.
    pub external: bool,
    /// Render callable signatures.
    pub signatures: bool,
    /// Do not render symbols nested beyond this depth (root is depth 0).
    pub max_depth: Option<u32>,
}

// ============================================================================
// Visitation ledger
// ============================================================================

/// First-visit record of namespace identities.
///
/// Scoped to one [`Walker`], reset only by starting a new invocation.
/// Each identity maps to exactly one path: the first discovered in
/// pre-order.
#[derive(Debug, Default)]
pub struct Ledger {
    paths: HashMap<ObjectId, String>,
}

impl Ledger {
    /// Empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    /// The path a namespace was first rendered under, if visited.
    pub fn path_of(&self, id: ObjectId) -> Option<&str> {
        self.paths.get(&id).map(String::as_str)
    }

    /// Record a first visit. A second record for the same identity is a
    /// traversal bug; the first path always wins.
    pub fn record(&mut self, id: ObjectId, path: String) {
        match self.paths.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(path);
            }
            Entry::Occupied(existing) => {
                debug_assert!(false, "{} already recorded as {}", id, existing.get());
            }
        }
    }

    /// Number of namespaces visited.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True if nothing was visited yet.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

// ============================================================================
// Walker
// ============================================================================

/// Depth-first tree renderer over a reflected object graph.
pub struct Walker<'g, R: Reflect, W: Write> {
    graph: &'g R,
    root: ObjectId,
    opts: WalkOptions,
    style: TreeStyle,
    palette: Palette,
    formatter: Formatter,
    ledger: Ledger,
    out: W,
}

impl<'g, R: Reflect, W: Write> Walker<'g, R, W> {
    /// Set up a traversal of `graph` rooted at `root`.
    pub fn new(
        graph: &'g R,
        root: ObjectId,
        opts: WalkOptions,
        style: TreeStyle,
        palette: Palette,
        out: W,
    ) -> Self {
        Walker {
            graph,
            root,
            opts,
            style,
            palette,
            formatter: Formatter {
                signatures: opts.signatures,
                palette,
            },
            ledger: Ledger::new(),
            out,
        }
    }

    /// Render the whole tree.
    ///
    /// `root_display` is the name the root line is printed under. The
    /// root itself is emitted at depth 0 and is exempt from the external
    /// and cycle checks; its members start at depth 1.
    pub fn render(&mut self, root_display: &str) -> io::Result<()> {
        let line = self.formatter.format(root_display, self.graph, self.root);
        writeln!(self.out, "{}", line)?;
        self.walk(self.root, 1, "")
    }

    /// The ledger, for callers that want to inspect visitation afterwards.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn walk(&mut self, namespace: ObjectId, depth: u32, tab: &str) -> io::Result<()> {
        let graph = self.graph;

        // Partition surviving members: data before types before
        // sub-namespaces, each group in enumeration order.
        let mut values: Vec<&'g Member> = Vec::new();
        let mut classes: Vec<&'g Member> = Vec::new();
        let mut namespaces: Vec<&'g Member> = Vec::new();
        for member in graph.members(namespace) {
            if !self.opts.filter.admits(&member.name) {
                continue;
            }
            if self.opts.canonical && !is_canonical(graph, namespace, member.target) {
                debug!(name = %member.name, "pruned non-canonical member");
                continue;
            }
            match graph.kind(member.target) {
                kind if kind.is_module() => namespaces.push(member),
                ObjectKind::Class => classes.push(member),
                _ => values.push(member),
            }
        }

        let ordered: Vec<&'g Member> = values
            .into_iter()
            .chain(classes)
            .chain(namespaces)
            .collect();
        let Some((last, rest)) = ordered.split_last() else {
            return Ok(());
        };

        for &member in rest {
            let tab_branch = format!("{}{}", tab, self.style.fork);
            let subtab = format!("{}{}", tab, self.style.line);
            self.emit(namespace, member, depth, &tab_branch, &subtab)?;
        }
        let tab_stop = format!("{}{}", tab, self.style.stop);
        let subtab = format!("{}{}", tab, self.style.open);
        self.emit(namespace, last, depth, &tab_stop, &subtab)
    }

    /// Emit one symbol line and, for namespace values, decide between
    /// external marker, back-reference, truncation, and recursion.
    fn emit(
        &mut self,
        parent: ObjectId,
        member: &Member,
        depth: u32,
        tab: &str,
        subtab: &str,
    ) -> io::Result<()> {
        let graph = self.graph;
        let line = format!(
            "{}{}",
            tab,
            self.formatter.format(&member.name, graph, member.target)
        );

        if !graph.kind(member.target).is_namespace() {
            return writeln!(self.out, "{}", line);
        }

        if !self.opts.external && !in_root(graph, self.root, member.target) {
            let note = format!(
                "[external {} {}]",
                display_tag(graph, member.target),
                graph.qualname(member.target)
            );
            debug!(name = %member.name, "external namespace, not recursing");
            return writeln!(self.out, "{} {}", line, self.palette.bold(&note, WARN_COLOR));
        }

        if let Some(path) = self.ledger.path_of(member.target) {
            let note = format!("[see {}]", path);
            debug!(name = %member.name, path, "already visited, emitting back-reference");
            return writeln!(self.out, "{} {}", line, self.palette.bold(&note, WARN_COLOR));
        }

        let path = format!("{}.{}", graph.qualname(parent), member.name);
        self.ledger.record(member.target, path);
        writeln!(self.out, "{}", line)?;

        if self.opts.max_depth.is_some_and(|limit| depth >= limit) {
            let marker = self.palette.bold("[...]", WARN_COLOR);
            writeln!(self.out, "{}{}{}", subtab, self.style.stop, marker)
        } else {
            self.walk(member.target, depth + 1, subtab)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
