//! Structural shape classification for split queries.
//!
//! The classifier decides which rewrite rule applies. It is a heuristic over
//! two bounded scans, not a grammar: `<identifier>.name` references in the
//! RETURN expression, and node-close/relationship-open juxtapositions in the
//! pre-RETURN clause. Ambiguity resolves toward [`Shape::PathLike`], since
//! returning a whole path is structurally valid even when a single-node
//! return would have sufficed.

use std::sync::LazyLock;

use regex::Regex;

use crate::splitter::ClauseTriple;

static SHORTEST_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)shortestpath").unwrap());
static NAME_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\.name\b").unwrap());
// `)` meeting `-[` or `<-[`, or `]-`/`]->` meeting `(`: a multi-hop traversal.
static REL_PATTERN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\)<?-\[|\]->?\(").unwrap());

/// The rewrite rule selected for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Contains a built-in shortest-path traversal; passed through untouched.
    ShortestPath,
    /// At most one `.name` reference and no relationship traversal. The
    /// rewrite returns the referenced node.
    ///
    /// Known limitation: a query with zero `.name` references and no
    /// relationship pattern (an aggregate return, say) still lands here and
    /// the rewrite falls back to a default identifier.
    SingleNode,
    /// Anything else; the rewrite returns a bound path.
    PathLike,
}

/// Whether the raw query contains the shortest-path marker (any case).
///
/// The substring check also covers `allShortestPaths`. Marked queries bypass
/// clause splitting entirely, so callers check this before [`crate::splitter::split`].
pub fn has_shortest_path_marker(query: &str) -> bool {
    SHORTEST_PATH_RE.is_match(query)
}

/// Classify a query from its raw text and split form.
pub fn classify(query: &str, triple: &ClauseTriple) -> Shape {
    if has_shortest_path_marker(query) {
        return Shape::ShortestPath;
    }
    let name_refs = name_ref_count(&triple.return_expr);
    let multi_hop = REL_PATTERN_RE.is_match(&triple.pre_return);
    if name_refs <= 1 && !multi_hop {
        Shape::SingleNode
    } else {
        Shape::PathLike
    }
}

/// Count `<identifier>.name` references in an expression.
pub fn name_ref_count(expr: &str) -> usize {
    NAME_REF_RE.find_iter(expr).count()
}

/// The identifier bound by the first `<identifier>.name` reference, if any.
pub fn first_name_ref(expr: &str) -> Option<&str> {
    NAME_REF_RE
        .captures(expr)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str()))
}
