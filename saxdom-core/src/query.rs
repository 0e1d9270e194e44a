//! Name-based search and value extraction over a built tree.
//!
//! Every entry point takes a `strict` flag with uniform semantics: in
//! strict mode a missing element/attribute/text surfaces as an error; in
//! lenient mode it is absorbed into the documented default, the empty
//! string. Nothing is ever silently dropped - lenient mode is an explicit
//! caller choice, not a logging fallback.
//!
//! Scanning skips Comment and Text nodes when matching names; only
//! Element nodes participate in name searches.

use crate::error::DomError;
use crate::tree::{Document, Node};
use crate::walker::StackWalker;

/// Finds the first descendant element named `tag_name` under the document
/// element, in document order.
///
/// The document element itself must be named `root_node_name`; a mismatch
/// or a missing descendant is [`DomError::NodeNotFound`].
pub fn search_node<'doc, 'a>(
    doc: &'doc Document<'a>,
    root_node_name: &str,
    tag_name: &str,
) -> Result<Node<'doc, 'a>, DomError> {
    let root = doc
        .root_element()
        .filter(|el| el.node_name() == root_node_name)
        .ok_or_else(|| DomError::NodeNotFound(root_node_name.to_string()))?;

    let mut walker = StackWalker::new(doc, root.id(), 0);
    // First visit is the document element itself; the search is over its
    // descendants.
    let _ = walker.next_node();
    while let Some(node) = walker.next_node() {
        if node.is_element() && node.node_name() == tag_name {
            return Ok(node);
        }
    }
    Err(DomError::NodeNotFound(tag_name.to_string()))
}

/// Finds the named element in `node`'s child list, skipping comments and
/// character data. [`DomError::NodeNotFound`] when no child matches.
pub fn retrieve_sub_node<'doc, 'a>(
    name: &str,
    node: Node<'doc, 'a>,
) -> Result<Node<'doc, 'a>, DomError> {
    node.children()
        .find(|child| child.is_element() && child.node_name() == name)
        .ok_or_else(|| DomError::NodeNotFound(name.to_string()))
}

/// Extracts an attribute value from an element node.
///
/// A non-element argument is [`DomError::InvalidNode`] regardless of
/// strictness. A missing attribute is [`DomError::AttributeNotFound`] in
/// strict mode and `""` in lenient mode.
pub fn get_node_attribute_value(
    node: Node<'_, '_>,
    attribute_name: &str,
    strict: bool,
) -> Result<String, DomError> {
    let element = node
        .as_element()
        .ok_or(DomError::InvalidNode("attribute lookup requires an element node"))?;
    match element.attr(attribute_name) {
        Some(value) => Ok(value.to_string()),
        None if strict => Err(DomError::AttributeNotFound(attribute_name.to_string())),
        None => Ok(String::new()),
    }
}

/// Extracts the character data of `node`: the concatenation of its direct
/// Text children (comments between runs do not interrupt collection).
///
/// With no Text child at all, strict mode fails with
/// [`DomError::TextNotFound`]; lenient mode yields `""`.
pub fn get_node_value(node: Node<'_, '_>, strict: bool) -> Result<String, DomError> {
    let mut value = String::new();
    let mut found = false;
    for child in node.children() {
        if let Some(text) = child.text() {
            value.push_str(text);
            found = true;
        }
    }
    if found {
        Ok(value)
    } else if strict {
        Err(DomError::TextNotFound)
    } else {
        Ok(String::new())
    }
}

/// Walks the tree for `tag_name` and extracts its character data;
/// composition of [`search_node`] and [`get_node_value`] with the strict
/// flag applied to both stages.
pub fn search_tag_value(
    doc: &Document<'_>,
    root_node_name: &str,
    tag_name: &str,
    strict: bool,
) -> Result<String, DomError> {
    let node = match search_node(doc, root_node_name, tag_name) {
        Ok(node) => node,
        Err(err) if strict => return Err(err),
        Err(_) => return Ok(String::new()),
    };
    get_node_value(node, strict)
}

/// Walks the tree for `tag_name` and extracts one of its attributes;
/// composition of [`search_node`] and [`get_node_attribute_value`] with
/// the strict flag applied to both stages.
pub fn search_tag_attribute_value(
    doc: &Document<'_>,
    root_node_name: &str,
    tag_name: &str,
    attribute_name: &str,
    strict: bool,
) -> Result<String, DomError> {
    let node = match search_node(doc, root_node_name, tag_name) {
        Ok(node) => node,
        Err(err) if strict => return Err(err),
        Err(_) => return Ok(String::new()),
    };
    get_node_attribute_value(node, attribute_name, strict)
}
