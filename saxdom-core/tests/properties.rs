//! Property-based tests for the builder and walker.
//!
//! These verify structural invariants that must hold for ANY well-formed
//! event sequence, not just crafted examples: preorder equals emission
//! order, the node budget is a hard boundary, and identical streams build
//! structurally equal trees.

use proptest::prelude::*;
use saxdom_core::{Document, DomError, Event, StackWalker};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 128,
        max_shrink_iters: 200,
        ..ProptestConfig::default()
    }
}

// =============================================================================
// Generators
// =============================================================================

/// A document fragment used to derive both the event stream and the
/// expected tree shape.
#[derive(Debug, Clone)]
enum Frag {
    Element { name: String, children: Vec<Frag> },
    Text(String),
    Comment(String),
}

fn frag_strategy() -> impl Strategy<Value = Frag> {
    let leaf = prop_oneof![
        "[a-z][a-z0-9]{0,6}".prop_map(|name| Frag::Element {
            name,
            children: vec![],
        }),
        "[ a-z]{1,8}".prop_map(Frag::Text),
        "[ a-z]{0,8}".prop_map(Frag::Comment),
    ];
    leaf.prop_recursive(4, 24, 4, |inner| {
        ("[a-z][a-z0-9]{0,6}", prop::collection::vec(inner, 0..4)).prop_map(
            |(name, children)| Frag::Element { name, children },
        )
    })
}

/// The document element: always an Element fragment.
fn root_strategy() -> impl Strategy<Value = Frag> {
    ("[a-z][a-z0-9]{0,6}", prop::collection::vec(frag_strategy(), 0..4))
        .prop_map(|(name, children)| Frag::Element { name, children })
}

fn push_events<'a>(frag: &'a Frag, events: &mut Vec<Event<'a>>) {
    match frag {
        Frag::Element { name, children } => {
            events.push(Event::ElementStart {
                name,
                attributes: vec![],
                namespace: None,
            });
            for child in children {
                push_events(child, events);
            }
            events.push(Event::ElementEnd);
        }
        Frag::Text(text) => events.push(Event::Characters { text }),
        Frag::Comment(text) => events.push(Event::Comment { text }),
    }
}

fn event_stream(root: &Frag) -> Vec<Event<'_>> {
    let mut events = vec![Event::DocumentStart];
    push_events(root, &mut events);
    events.push(Event::DocumentEnd);
    events
}

/// Preorder node names the built tree must show. Adjacent Text fragments
/// collapse into a single `#text`, mirroring the builder's merge rule.
fn expected_names(frag: &Frag, out: &mut Vec<String>) {
    match frag {
        Frag::Element { name, children } => {
            out.push(name.clone());
            let mut prev_was_text = false;
            for child in children {
                if matches!(child, Frag::Text(_)) {
                    if !prev_was_text {
                        out.push("#text".to_string());
                    }
                    prev_was_text = true;
                } else {
                    prev_was_text = false;
                    expected_names(child, out);
                }
            }
        }
        Frag::Text(_) => out.push("#text".to_string()),
        Frag::Comment(_) => out.push("#comment".to_string()),
    }
}

/// Events in arbitrary, possibly malformed order.
#[derive(Debug, Clone)]
enum RawEvent {
    DocStart,
    DocEnd,
    Start(String),
    End,
    Chars(String),
    Comment(String),
    Error(String),
}

fn raw_event() -> impl Strategy<Value = RawEvent> {
    prop_oneof![
        Just(RawEvent::DocStart),
        Just(RawEvent::DocEnd),
        Just(RawEvent::End),
        "[a-z:!1 ]{0,5}".prop_map(RawEvent::Start),
        "[ a-z]{0,5}".prop_map(RawEvent::Chars),
        "[ a-z]{0,5}".prop_map(RawEvent::Comment),
        "[a-z]{0,5}".prop_map(RawEvent::Error),
    ]
}

fn to_event(raw: &RawEvent) -> Event<'_> {
    match raw {
        RawEvent::DocStart => Event::DocumentStart,
        RawEvent::DocEnd => Event::DocumentEnd,
        RawEvent::Start(name) => Event::ElementStart {
            name,
            attributes: vec![],
            namespace: None,
        },
        RawEvent::End => Event::ElementEnd,
        RawEvent::Chars(text) => Event::Characters { text },
        RawEvent::Comment(text) => Event::Comment { text },
        RawEvent::Error(message) => Event::ParseError { message },
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(config())]

    /// Round-trip order: the walker yields nodes in exactly the order
    /// their start events were emitted.
    #[test]
    fn preorder_walk_matches_emission_order(root in root_strategy()) {
        let doc = Document::from_events(event_stream(&root), 0).unwrap();

        let mut expected = Vec::new();
        expected_names(&root, &mut expected);

        let mut walker = StackWalker::new(&doc, doc.root_element().unwrap().id(), 0);
        let mut got = Vec::new();
        while let Some(node) = walker.next_node() {
            got.push(node.node_name().to_string());
        }
        prop_assert_eq!(got, expected);
    }

    /// A budget of exactly the node count succeeds; one less must fail
    /// with a budget error and yield no document.
    #[test]
    fn budget_is_a_hard_boundary(root in root_strategy()) {
        let mut expected = Vec::new();
        expected_names(&root, &mut expected);
        let count = expected.len();

        prop_assert!(Document::from_events(event_stream(&root), count).is_ok());

        // count - 1 == 0 would mean "unbounded", so only shrink when the
        // tree has at least two nodes.
        if count > 1 {
            let result = Document::from_events(event_stream(&root), count - 1);
            prop_assert_eq!(
                result.unwrap_err(),
                DomError::NodeBudgetExceeded { budget: count - 1 }
            );
        }
    }

    /// Identical event sequences build structurally equal - but not
    /// identical - trees.
    #[test]
    fn identical_streams_build_equal_trees(root in root_strategy()) {
        let doc1 = Document::from_events(event_stream(&root), 0).unwrap();
        let doc2 = Document::from_events(event_stream(&root), 0).unwrap();
        let r1 = doc1.root_element().unwrap();
        let r2 = doc2.root_element().unwrap();
        prop_assert!(r1.is_equal_node(&r2));
        prop_assert!(!r1.is_same_node(&r2));
        prop_assert!(r1.is_same_node(&doc1.root_element().unwrap()));
    }

    /// Text merge idempotence: N consecutive character runs yield exactly
    /// one Text child holding the concatenation, for all N >= 1.
    #[test]
    fn text_runs_collapse_into_one_node(n in 1usize..8) {
        let mut events = vec![
            Event::DocumentStart,
            Event::ElementStart { name: "r", attributes: vec![], namespace: None },
        ];
        for _ in 0..n {
            events.push(Event::Characters { text: "ab " });
        }
        events.push(Event::ElementEnd);
        events.push(Event::DocumentEnd);

        let doc = Document::from_events(events, 0).unwrap();
        let root = doc.root_element().unwrap();
        prop_assert_eq!(root.children().count(), 1);
        prop_assert_eq!(
            root.first_child().unwrap().text().unwrap(),
            "ab ".repeat(n)
        );
    }

    /// The builder never panics, whatever the event order: malformed
    /// streams come back as errors.
    #[test]
    fn builder_never_panics(raw in prop::collection::vec(raw_event(), 0..32)) {
        let events: Vec<Event<'_>> = raw.iter().map(to_event).collect();
        let _ = Document::from_events(events, 16);
    }
}
