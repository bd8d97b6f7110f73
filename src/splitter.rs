//! Clause splitting: a source query string is segmented into the text before
//! its RETURN clause, the RETURN expression itself, and an optional trailing
//! ORDER BY clause.
//!
//! This is deliberately not a grammar parser. The rewrite rules downstream
//! only need these three segments, and the boundaries are found with bounded
//! word-boundary scans.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{QshiftError, QshiftResult};

static RETURN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bRETURN\b").unwrap());
static ORDER_BY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bORDER\s+BY\b").unwrap());

/// The three segments of a split query. Intermediate only; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseTriple {
    /// Everything before the RETURN keyword, trailing whitespace trimmed.
    pub pre_return: String,
    /// The RETURN expression, trailing commas and whitespace trimmed.
    pub return_expr: String,
    /// The ORDER BY clause including its keyword, or empty when absent.
    pub order_tail: String,
}

/// Strip a trailing statement terminator (and surrounding whitespace).
pub fn strip_terminator(query: &str) -> &str {
    let trimmed = query.trim();
    trimmed
        .strip_suffix(';')
        .map(str::trim_end)
        .unwrap_or(trimmed)
}

/// Split a query at its first RETURN keyword boundary.
///
/// Fails with [`QshiftError::MalformedQuery`] when no case-insensitive,
/// word-boundary RETURN is present.
pub fn split(query: &str) -> QshiftResult<ClauseTriple> {
    let stripped = strip_terminator(query);
    let ret = RETURN_RE
        .find(stripped)
        .ok_or_else(|| QshiftError::malformed(stripped))?;

    let pre_return = stripped[..ret.start()].trim_end().to_string();
    let rest = &stripped[ret.end()..];

    let (return_expr, order_tail) = match ORDER_BY_RE.find(rest) {
        Some(ord) => (
            trim_expr(&rest[..ord.start()]),
            rest[ord.start()..].trim().to_string(),
        ),
        None => (trim_expr(rest), String::new()),
    };

    Ok(ClauseTriple {
        pre_return,
        return_expr,
        order_tail,
    })
}

fn trim_expr(expr: &str) -> String {
    expr.trim()
        .trim_end_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_split() {
        let triple = split("MATCH (n:User) RETURN n.name;").unwrap();
        assert_eq!(triple.pre_return, "MATCH (n:User)");
        assert_eq!(triple.return_expr, "n.name");
        assert_eq!(triple.order_tail, "");
    }

    #[test]
    fn test_case_insensitive_keywords() {
        let triple = split("match (n) return n.name order by n.name desc").unwrap();
        assert_eq!(triple.pre_return, "match (n)");
        assert_eq!(triple.return_expr, "n.name");
        assert_eq!(triple.order_tail, "order by n.name desc");
    }

    #[test]
    fn test_order_tail_extracted() {
        let triple =
            split("MATCH (u:User) RETURN u.name ORDER BY u.name ASC").unwrap();
        assert_eq!(triple.return_expr, "u.name");
        assert_eq!(triple.order_tail, "ORDER BY u.name ASC");
    }

    #[test]
    fn test_trailing_comma_trimmed() {
        let triple = split("MATCH (a)-[r]->(b) RETURN a.name, b.name, ORDER BY a.name").unwrap();
        assert_eq!(triple.return_expr, "a.name, b.name");
    }

    #[test]
    fn test_no_return_is_malformed() {
        let err = split("MATCH (n:User) WHERE n.enabled = true").unwrap_err();
        assert!(matches!(err, QshiftError::MalformedQuery(_)));
    }

    #[test]
    fn test_return_requires_word_boundary() {
        // "returned" must not count as a RETURN keyword.
        let err = split("MATCH (n) WHERE n.returned = true").unwrap_err();
        assert!(matches!(err, QshiftError::MalformedQuery(_)));
    }

    #[test]
    fn test_strip_terminator() {
        assert_eq!(strip_terminator("RETURN n; "), "RETURN n");
        assert_eq!(strip_terminator("  RETURN n  "), "RETURN n");
        assert_eq!(strip_terminator("RETURN n"), "RETURN n");
    }
}
