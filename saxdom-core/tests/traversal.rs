//! Stack walker tests: document order, visit ceiling, subtree pruning,
//! and the skip_children protocol.

use pretty_assertions::assert_eq;
use saxdom_core::{Document, DomError, Event, StackWalker};

// =============================================================================
// Test Helpers
// =============================================================================

fn el(name: &str) -> Event<'_> {
    Event::ElementStart {
        name,
        attributes: vec![],
        namespace: None,
    }
}

fn end() -> Event<'static> {
    Event::ElementEnd
}

/// The tree used throughout:
///
/// ```text
/// trx
/// |-- cli
/// |   |-- doc
/// |   `-- cta
/// |-- auth
/// |   |-- pin
/// |   `-- est
/// `-- info
///     `-- ipaddr
/// ```
fn sample() -> Document<'static> {
    Document::from_events(
        vec![
            Event::DocumentStart,
            el("trx"),
            el("cli"),
            el("doc"),
            end(),
            el("cta"),
            end(),
            end(),
            el("auth"),
            el("pin"),
            end(),
            el("est"),
            end(),
            end(),
            el("info"),
            el("ipaddr"),
            end(),
            end(),
            end(),
            Event::DocumentEnd,
        ],
        0,
    )
    .unwrap()
}

fn walk_names(walker: &mut StackWalker<'_, '_>) -> Vec<String> {
    let mut names = Vec::new();
    while let Some(node) = walker.next_node() {
        names.push(node.node_name().to_string());
    }
    names
}

// =============================================================================
// Document Order
// =============================================================================

#[test]
fn test_preorder_matches_emission_order() {
    let doc = sample();
    let mut walker = StackWalker::new(&doc, doc.root_element().unwrap().id(), 0);
    assert_eq!(
        walk_names(&mut walker),
        vec!["trx", "cli", "doc", "cta", "auth", "pin", "est", "info", "ipaddr"]
    );
}

#[test]
fn test_walk_includes_text_and_comments() {
    let doc = Document::from_events(
        vec![
            Event::DocumentStart,
            el("a"),
            Event::Characters { text: "x" },
            el("b"),
            end(),
            Event::Comment { text: "note" },
            end(),
            Event::DocumentEnd,
        ],
        0,
    )
    .unwrap();
    let mut walker = StackWalker::new(&doc, doc.root_element().unwrap().id(), 0);
    assert_eq!(
        walk_names(&mut walker),
        vec!["a", "#text", "b", "#comment"]
    );
}

#[test]
fn test_walk_from_document_node() {
    let doc = sample();
    let mut walker = StackWalker::new(&doc, doc.root().id(), 0);
    let names = walk_names(&mut walker);
    assert_eq!(names[0], "#document");
    assert_eq!(names[1], "trx");
    assert_eq!(names.len(), 10);
}

#[test]
fn test_walk_subtree_only() {
    let doc = sample();
    let root = doc.root_element().unwrap();
    let auth = root.first_child().unwrap().next_sibling().unwrap();
    let mut walker = StackWalker::new(&doc, auth.id(), 0);
    assert_eq!(walk_names(&mut walker), vec!["auth", "pin", "est"]);
}

#[test]
fn test_has_next_does_not_consume() {
    let doc = sample();
    let mut walker = StackWalker::new(&doc, doc.root_element().unwrap().id(), 0);
    assert!(walker.has_next());
    assert!(walker.has_next());
    let first = walker.next_node().unwrap();
    assert_eq!(first.node_name(), "trx");
}

// =============================================================================
// Visit Ceiling
// =============================================================================

#[test]
fn test_visit_ceiling_stops_the_walk() {
    let doc = sample();
    let mut walker = StackWalker::new(&doc, doc.root_element().unwrap().id(), 4);
    assert_eq!(walk_names(&mut walker), vec!["trx", "cli", "doc", "cta"]);
    assert!(!walker.has_next());
    assert!(walker.next_node().is_none());
}

#[test]
fn test_ceiling_of_one() {
    let doc = sample();
    let mut walker = StackWalker::new(&doc, doc.root_element().unwrap().id(), 1);
    assert!(walker.has_next());
    assert_eq!(walker.next_node().unwrap().node_name(), "trx");
    assert!(!walker.has_next());
    assert!(walker.next_node().is_none());
}

#[test]
fn test_zero_ceiling_is_unbounded() {
    let doc = sample();
    let mut walker = StackWalker::new(&doc, doc.root_element().unwrap().id(), 0);
    assert_eq!(walk_names(&mut walker).len(), 9);
}

// =============================================================================
// Pruning
// =============================================================================

#[test]
fn test_skip_children_prunes_descendants_not_siblings() {
    let doc = sample();
    let mut walker = StackWalker::new(&doc, doc.root_element().unwrap().id(), 0);

    assert_eq!(walker.next_node().unwrap().node_name(), "trx");
    assert_eq!(walker.next_node().unwrap().node_name(), "cli");
    walker.skip_children().unwrap();
    // doc and cta are gone; auth's subtree is untouched.
    assert_eq!(
        walk_names(&mut walker),
        vec!["auth", "pin", "est", "info", "ipaddr"]
    );
}

#[test]
fn test_skip_children_on_root_exhausts_walk() {
    let doc = sample();
    let mut walker = StackWalker::new(&doc, doc.root_element().unwrap().id(), 0);
    walker.next_node().unwrap();
    walker.skip_children().unwrap();
    assert!(!walker.has_next());
    assert!(walker.next_node().is_none());
}

#[test]
fn test_skip_children_on_leaf_is_harmless() {
    let doc = sample();
    let mut walker = StackWalker::new(&doc, doc.root_element().unwrap().id(), 0);
    walker.next_node().unwrap(); // trx
    walker.next_node().unwrap(); // cli
    walker.next_node().unwrap(); // doc (leaf)
    walker.skip_children().unwrap();
    assert_eq!(
        walk_names(&mut walker),
        vec!["cta", "auth", "pin", "est", "info", "ipaddr"]
    );
}

#[test]
fn test_has_next_accounts_for_pending_children() {
    // One root with a single child: after visiting the root the stack is
    // empty but its child has not been committed yet.
    let doc = Document::from_events(
        vec![
            Event::DocumentStart,
            el("a"),
            el("b"),
            end(),
            end(),
            Event::DocumentEnd,
        ],
        0,
    )
    .unwrap();
    let mut walker = StackWalker::new(&doc, doc.root_element().unwrap().id(), 0);
    walker.next_node().unwrap();
    assert!(walker.has_next());
    walker.skip_children().unwrap();
    assert!(!walker.has_next());
}

// =============================================================================
// Protocol Misuse
// =============================================================================

#[test]
fn test_skip_before_any_next_is_misuse() {
    let doc = sample();
    let mut walker = StackWalker::new(&doc, doc.root_element().unwrap().id(), 0);
    assert!(matches!(
        walker.skip_children(),
        Err(DomError::WalkerMisuse(_))
    ));
}

#[test]
fn test_double_skip_is_misuse() {
    let doc = sample();
    let mut walker = StackWalker::new(&doc, doc.root_element().unwrap().id(), 0);
    walker.next_node().unwrap();
    walker.skip_children().unwrap();
    assert!(matches!(
        walker.skip_children(),
        Err(DomError::WalkerMisuse(_))
    ));
}

#[test]
fn test_skip_after_exhaustion_is_misuse() {
    let doc = Document::from_events(
        vec![Event::DocumentStart, el("only"), end(), Event::DocumentEnd],
        0,
    )
    .unwrap();
    let mut walker = StackWalker::new(&doc, doc.root_element().unwrap().id(), 0);
    walker.next_node().unwrap();
    assert!(walker.next_node().is_none());
    assert!(matches!(
        walker.skip_children(),
        Err(DomError::WalkerMisuse(_))
    ));
}

// =============================================================================
// Restart
// =============================================================================

#[test]
fn test_configure_restarts_the_walk() {
    let doc = sample();
    let root = doc.root_element().unwrap();
    let mut walker = StackWalker::new(&doc, root.id(), 0);
    walker.next_node().unwrap();
    walker.next_node().unwrap();

    walker.configure(root.id(), 0);
    assert_eq!(walk_names(&mut walker).len(), 9);

    // Reconfiguring onto a subtree with a fresh ceiling.
    let info = root.last_child().unwrap();
    walker.configure(info.id(), 1);
    assert_eq!(walk_names(&mut walker), vec!["info"]);
}

#[test]
fn test_independent_walkers_share_a_document() {
    let doc = sample();
    let root = doc.root_element().unwrap();
    let mut one = StackWalker::new(&doc, root.id(), 0);
    let mut two = StackWalker::new(&doc, root.id(), 0);
    one.next_node().unwrap();
    one.next_node().unwrap();
    // The second walker's cursor is unaffected.
    assert_eq!(two.next_node().unwrap().node_name(), "trx");
}
