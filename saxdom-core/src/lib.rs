//! SAXDOM Core
//!
//! Builds an in-memory, navigable document tree (a DOM) from a stream of
//! SAX-style parse events, and provides query primitives to locate nodes,
//! attributes, and text by structural path.
//!
//! # Architecture
//!
//! - **event.rs** - the structural event vocabulary the builder consumes
//! - **tree.rs** - arena-backed node model: Document, Node, NodeKind
//! - **builder.rs** - SAX-to-DOM state machine with a node budget
//! - **walker.rs** - iterative, explicitly-stacked preorder traversal
//! - **query.rs** - name/path search with strict or lenient semantics
//!
//! Tokenization, character decoding, and I/O live outside this crate; the
//! builder only sees the event vocabulary.

pub mod builder;
pub mod error;
pub mod event;
pub mod query;
mod trace;
pub mod tree;
pub mod walker;

pub use builder::{BuilderState, DomBuilder};
pub use error::DomError;
pub use event::Event;
pub use query::{
    get_node_attribute_value, get_node_value, retrieve_sub_node, search_node,
    search_tag_attribute_value, search_tag_value,
};
pub use tree::{Attribute, Document, ElementView, Node, NodeId, NodeKind};
pub use walker::StackWalker;
