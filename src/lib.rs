//! # qshift — query-dialect transpiler
//!
//! qshift rewrites stored Cypher queries into the dialect the graph UI's
//! custom-query importer understands. It applies a small set of structural
//! rewrite rules rather than parsing the full grammar: queries are split at
//! their RETURN boundary, classified by shape, and rewritten to return either
//! a single node or a bound path.
//!
//! ## Quick Example
//!
//! ```rust
//! use qshift::prelude::*;
//!
//! let out = convert_query("MATCH (a)-[:MemberOf]->(b) RETURN a.name, b.name").unwrap();
//! assert_eq!(out, "MATCH p=(a)-[:MemberOf]->(b)\nRETURN p");
//! ```
//!
//! ## Rewrite rules
//!
//! | Shape        | Rule                                            |
//! |--------------|-------------------------------------------------|
//! | ShortestPath | Pass through verbatim (terminator stripped)     |
//! | SingleNode   | Synthesize `RETURN <identifier> AS result`      |
//! | PathLike     | Bind a path variable, `RETURN <path-variable>`  |

pub mod convert;
pub mod error;
pub mod filter;
pub mod library;
pub mod rewrite;
pub mod shape;
pub mod splitter;

pub use rewrite::convert_query;

pub mod prelude {
    pub use crate::convert::{convert, ConversionBatch, RecordFailure};
    pub use crate::error::{QshiftError, QshiftResult};
    pub use crate::filter::{admit, build_inclusion_set};
    pub use crate::library::{
        load_library, parse_library, ConvertedRecord, QueryDocument, QueryRecord,
    };
    pub use crate::rewrite::convert_query;
    pub use crate::shape::Shape;
    pub use crate::splitter::{split, ClauseTriple};
}
