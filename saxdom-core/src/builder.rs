//! SAX-to-DOM builder: assembles a [`Document`] from a stream of
//! structural events.
//!
//! The builder is an explicit per-build context - open-element stack,
//! live node counter, captured error - so independent builds never share
//! state. It moves through `Idle -> Building -> {Complete | Failed}`;
//! every failure is terminal for the build and no partial tree is ever
//! handed out.
//!
//! # Example
//!
//! ```
//! use saxdom_core::{Document, Event};
//!
//! let events = vec![
//!     Event::DocumentStart,
//!     Event::ElementStart { name: "a", attributes: vec![], namespace: None },
//!     Event::Characters { text: "hi" },
//!     Event::ElementEnd,
//!     Event::DocumentEnd,
//! ];
//! let doc = Document::from_events(events, 64).unwrap();
//! assert_eq!(doc.root_element().unwrap().node_name(), "a");
//! ```

use crate::error::DomError;
use crate::event::Event;
use crate::trace::{debug, trace};
use crate::tree::{Document, NodeId};

/// Where a build currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// No document-start seen yet.
    Idle,
    /// Between document-start and document-end.
    Building,
    /// Document-end accepted; the tree is ready.
    Complete,
    /// A terminal error was captured; see [`DomBuilder::error`].
    Failed,
}

/// Builds a document tree from SAX-style events.
///
/// Feed events with [`handle_event`](Self::handle_event) in the order the
/// tokenizer produced them, then take the result with
/// [`into_dom`](Self::into_dom). After a failure all further events are
/// ignored; the first error wins.
#[derive(Debug)]
pub struct DomBuilder<'a> {
    doc: Document<'a>,
    state: BuilderState,
    /// Currently open elements, document root at the bottom.
    open: Vec<NodeId>,
    /// Element, Text, and Comment nodes created so far.
    created: usize,
    /// Node budget; `0` means unbounded.
    max_nodes: usize,
    error: Option<DomError>,
}

impl<'a> DomBuilder<'a> {
    /// Creates a builder with the given node budget (`0` = unbounded).
    pub fn new(max_nodes: usize) -> Self {
        DomBuilder {
            doc: Document::new(),
            state: BuilderState::Idle,
            open: Vec::new(),
            created: 0,
            max_nodes,
            error: None,
        }
    }

    /// Current state of the build.
    pub fn state(&self) -> BuilderState {
        self.state
    }

    /// The captured error, if the build has failed.
    pub fn error(&self) -> Option<&DomError> {
        self.error.as_ref()
    }

    /// Nodes created so far (elements, text, comments).
    pub fn nodes_created(&self) -> usize {
        self.created
    }

    /// Consumes one event.
    pub fn handle_event(&mut self, event: Event<'a>) {
        if self.state == BuilderState::Failed {
            return;
        }
        if let Event::ParseError { message } = &event {
            self.fail(DomError::Conversion((*message).to_string()));
            return;
        }
        match self.state {
            BuilderState::Idle => match event {
                Event::DocumentStart => {
                    self.state = BuilderState::Building;
                    debug!("dom build started");
                }
                _ => self.fail(DomError::MalformedStructure("event before document-start")),
            },
            BuilderState::Building => {
                if let Err(err) = self.building_event(event) {
                    self.fail(err);
                }
            }
            BuilderState::Complete => {
                self.fail(DomError::MalformedStructure("event after document-end"));
            }
            BuilderState::Failed => {}
        }
    }

    fn building_event(&mut self, event: Event<'a>) -> Result<(), DomError> {
        match event {
            Event::ElementStart {
                name,
                attributes,
                namespace,
            } => self.open_element(name, attributes, namespace),
            Event::Characters { text } => self.append_characters(text),
            Event::Comment { text } => self.append_comment(text),
            Event::ElementEnd => match self.open.pop() {
                Some(_) => Ok(()),
                None => Err(DomError::MalformedStructure("element-end with no open element")),
            },
            Event::DocumentEnd => {
                if !self.open.is_empty() {
                    return Err(DomError::MalformedStructure(
                        "document-end with unclosed elements",
                    ));
                }
                if self.doc.root_element().is_none() {
                    return Err(DomError::EmptyDocument);
                }
                self.state = BuilderState::Complete;
                debug!(nodes = self.created, "dom build complete");
                Ok(())
            }
            Event::DocumentStart => {
                Err(DomError::MalformedStructure("document-start inside an open document"))
            }
            // Handled before the state dispatch.
            Event::ParseError { .. } => Ok(()),
        }
    }

    fn open_element(
        &mut self,
        name: &'a str,
        attributes: Vec<(&'a str, &'a str)>,
        namespace: Option<&'a str>,
    ) -> Result<(), DomError> {
        self.charge()?;
        let parent = match self.open.last() {
            Some(&top) => top,
            None => self.doc.root().id(),
        };
        let id = self.doc.create_element_ns(name, namespace)?;
        for (attr_name, attr_value) in attributes {
            self.doc.set_attribute(id, attr_name, attr_value)?;
        }
        match self.doc.append_child(parent, id) {
            Ok(_) => {}
            Err(DomError::HierarchyRequest(_)) => {
                return Err(DomError::MalformedStructure("second root element"));
            }
            Err(err) => return Err(err),
        }
        self.open.push(id);
        trace!(name, depth = self.open.len(), "element opened");
        Ok(())
    }

    fn append_characters(&mut self, text: &'a str) -> Result<(), DomError> {
        let Some(&top) = self.open.last() else {
            // Inter-element whitespace outside the root element.
            trace!("character data outside the root discarded");
            return Ok(());
        };
        let merges = self
            .doc
            .get(top)
            .and_then(|n| n.last_child())
            .is_some_and(|c| c.is_text());
        if !merges {
            self.charge()?;
        }
        self.doc.append_text(top, text)?;
        Ok(())
    }

    fn append_comment(&mut self, text: &'a str) -> Result<(), DomError> {
        self.charge()?;
        let parent = match self.open.last() {
            Some(&top) => top,
            // Comments may sit beside the root element, under the document.
            None => self.doc.root().id(),
        };
        let id = self.doc.create_comment(text);
        self.doc.append_child(parent, id)?;
        Ok(())
    }

    /// Accounts for one node allocation against the budget. Checked on
    /// every allocation so hostile inputs cannot overshoot between checks.
    fn charge(&mut self) -> Result<(), DomError> {
        self.created += 1;
        if self.max_nodes != 0 && self.created > self.max_nodes {
            return Err(DomError::NodeBudgetExceeded {
                budget: self.max_nodes,
            });
        }
        Ok(())
    }

    fn fail(&mut self, err: DomError) {
        debug!(error = %err, "dom build failed");
        self.error = Some(err);
        self.state = BuilderState::Failed;
    }

    /// Returns the completed document, or the error that stopped the
    /// build. Calling before document-end is itself an error.
    pub fn into_dom(self) -> Result<Document<'a>, DomError> {
        match self.state {
            BuilderState::Complete => Ok(self.doc),
            BuilderState::Failed => Err(self
                .error
                .unwrap_or(DomError::MalformedStructure("build failed"))),
            BuilderState::Idle => Err(DomError::EmptyDocument),
            BuilderState::Building => {
                Err(DomError::MalformedStructure("document-end never received"))
            }
        }
    }
}

impl<'a> Document<'a> {
    /// Builds a document by feeding every event to a fresh
    /// [`DomBuilder`] with the given node budget (`0` = unbounded).
    pub fn from_events<I>(events: I, max_nodes: usize) -> Result<Self, DomError>
    where
        I: IntoIterator<Item = Event<'a>>,
    {
        let mut builder = DomBuilder::new(max_nodes);
        for event in events {
            builder.handle_event(event);
        }
        builder.into_dom()
    }
}
