//! The rewrite engine: turns a classified source query into its UI-dialect
//! form.
//!
//! Three rules, total over [`Shape`]:
//! - shortest-path queries pass through untouched (terminator stripped);
//! - single-node queries get a synthesized `RETURN <identifier> AS result`;
//! - path-like queries get a path variable bound in their first MATCH clause
//!   and a `RETURN <path-variable>`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{QshiftError, QshiftResult};
use crate::shape::{self, Shape};
use crate::splitter::{self, ClauseTriple};

/// Conventional path variable injected when a traversal binds none.
const PATH_VAR: &str = "p";
/// Fallback node identifier when no `.name` reference names one.
const DEFAULT_NODE_VAR: &str = "n";

static MATCH_KW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bMATCH\b").unwrap());
// An existing path binding: `<identifier> =` directly after the keyword.
static BINDING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+([A-Za-z_][A-Za-z0-9_]*)\s*=").unwrap());

/// Convert one source-dialect query to the UI dialect.
///
/// The full per-record pipeline: terminator stripping, the shortest-path
/// bypass, clause splitting, classification, and the shape's rewrite rule.
///
/// # Example
///
/// ```
/// let out = qshift::convert_query("MATCH (a)-[:MemberOf]->(b) RETURN a.name, b.name;").unwrap();
/// assert_eq!(out, "MATCH p=(a)-[:MemberOf]->(b)\nRETURN p");
/// ```
pub fn convert_query(query: &str) -> QshiftResult<String> {
    let stripped = splitter::strip_terminator(query);
    if stripped.is_empty() {
        return Err(QshiftError::EmptyQuery);
    }
    // The bypass is decided on the raw text: shortest-path traversals are
    // opaque to the rewrite rules and skip clause splitting entirely.
    if shape::has_shortest_path_marker(stripped) {
        return Ok(stripped.to_string());
    }
    let triple = splitter::split(stripped)?;
    let shape = shape::classify(stripped, &triple);
    Ok(rewrite(stripped, &triple, shape))
}

/// Apply the rewrite rule selected for `shape`.
pub fn rewrite(stripped: &str, triple: &ClauseTriple, shape: Shape) -> String {
    match shape {
        Shape::ShortestPath => stripped.to_string(),
        Shape::SingleNode => rewrite_single_node(triple),
        Shape::PathLike => rewrite_path_like(triple),
    }
}

fn rewrite_single_node(triple: &ClauseTriple) -> String {
    let ident = shape::first_name_ref(&triple.return_expr)
        .or_else(|| shape::first_name_ref(&triple.order_tail))
        .unwrap_or(DEFAULT_NODE_VAR);

    let mut out = format!("{}\nRETURN {} AS result", triple.pre_return, ident);
    if !triple.order_tail.is_empty() {
        out.push('\n');
        out.push_str(&triple.order_tail);
    }
    out
}

fn rewrite_path_like(triple: &ClauseTriple) -> String {
    let (pre_return, path_var) = ensure_path_binding(&triple.pre_return);

    let mut out = format!("{pre_return}\nRETURN {path_var}");
    if !triple.order_tail.is_empty() {
        out.push('\n');
        out.push_str(&triple.order_tail);
    }
    out
}

/// Make sure the first MATCH clause binds a path variable.
///
/// Returns the (possibly modified) pre-RETURN clause and the variable to
/// return. An existing binding is reused unchanged, so re-running the
/// rewrite on its own output injects nothing.
fn ensure_path_binding(pre_return: &str) -> (String, String) {
    let Some(kw) = MATCH_KW_RE.find(pre_return) else {
        // No traversal clause to anchor an injection on; leave the clause
        // alone and return the conventional variable.
        return (pre_return.to_string(), PATH_VAR.to_string());
    };

    let rest = &pre_return[kw.end()..];
    if let Some(caps) = BINDING_RE.captures(rest) {
        return (pre_return.to_string(), caps[1].to_string());
    }

    let mut bound = String::with_capacity(pre_return.len() + PATH_VAR.len() + 2);
    bound.push_str(&pre_return[..kw.end()]);
    bound.push(' ');
    bound.push_str(PATH_VAR);
    bound.push('=');
    bound.push_str(rest.trim_start());
    (bound, PATH_VAR.to_string())
}
