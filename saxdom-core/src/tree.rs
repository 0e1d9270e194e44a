//! Arena-based document tree.
//!
//! All nodes live in a contiguous `Vec` owned by the [`Document`] and are
//! referenced by [`NodeId`], an index newtype. Parent links are plain ids
//! into the same arena, which gives upward traversal without reference
//! cycles; ownership is strictly downward and the whole tree is freed when
//! the `Document` drops. Detached nodes stay in the arena until then.
//!
//! Navigation goes through the lightweight [`Node`] handle; mutation goes
//! through `&mut Document`.
//!
//! # Example
//!
//! ```
//! use saxdom_core::tree::Document;
//!
//! let mut doc = Document::new();
//! let root = doc.create_element_in("inventory", doc.root().id()).unwrap();
//! let item = doc.create_element_in("item", root).unwrap();
//! doc.set_attribute(item, "sku", "A-100").unwrap();
//! doc.append_text(item, "ten crates").unwrap();
//!
//! assert_eq!(doc.root_element().unwrap().node_name(), "inventory");
//! ```

use std::borrow::Cow;

use unicode_xid::UnicodeXID;

use crate::error::DomError;

// ============================================================================
// Core Types
// ============================================================================

/// Index into the document's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A name/value pair on an element. Names are unique within one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub name: Cow<'a, str>,
    pub value: Cow<'a, str>,
}

/// The kind of node in the tree.
///
/// The variant set is closed: every site that needs kind-specific behavior
/// matches exhaustively instead of downcasting. `node_name` semantics per
/// kind: `"#document"`, the element's qualified name, `"#text"`,
/// `"#comment"`.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind<'a> {
    /// Root document container. Exactly one per tree, never a child.
    Document,

    /// Element node with qualified name, resolved namespace URI, and
    /// attributes.
    Element {
        name: Cow<'a, str>,
        namespace: Option<Cow<'a, str>>,
        attributes: Vec<Attribute<'a>>,
    },

    /// Character data. Never has children.
    Text(Cow<'a, str>),

    /// Comment body.
    Comment(Cow<'a, str>),
}

/// Internal node storage.
#[derive(Debug)]
struct NodeData<'a> {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    base: Option<Cow<'a, str>>,
    kind: NodeKind<'a>,
}

impl<'a> NodeData<'a> {
    fn new(kind: NodeKind<'a>) -> Self {
        NodeData {
            parent: None,
            children: Vec::new(),
            base: None,
            kind,
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// A document tree. Owns every node; hands out [`Node`] handles for
/// navigation.
#[derive(Debug)]
pub struct Document<'a> {
    nodes: Vec<NodeData<'a>>,
    root: NodeId,
    base: Option<Cow<'a, str>>,
}

impl<'a> Document<'a> {
    /// Creates an empty document: a single Document node, no root element.
    pub fn new() -> Self {
        Document {
            nodes: vec![NodeData::new(NodeKind::Document)],
            root: NodeId::new(0),
            base: None,
        }
    }

    /// The Document node itself.
    pub fn root(&self) -> Node<'_, 'a> {
        Node {
            doc: self,
            id: self.root,
        }
    }

    /// The document element - the single top-level Element, if one exists.
    pub fn root_element(&self) -> Option<Node<'_, 'a>> {
        self.root_element_id().map(|id| Node { doc: self, id })
    }

    fn root_element_id(&self) -> Option<NodeId> {
        self.nodes[self.root.index()]
            .children
            .iter()
            .copied()
            .find(|id| matches!(self.nodes[id.index()].kind, NodeKind::Element { .. }))
    }

    /// Get a node handle by id.
    pub fn get(&self, id: NodeId) -> Option<Node<'_, 'a>> {
        if id.index() < self.nodes.len() {
            Some(Node { doc: self, id })
        } else {
            None
        }
    }

    /// Number of nodes ever created in this document, the Document node
    /// excluded. Detached nodes count until the document drops.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// The document base URI, inherited by nodes without their own.
    pub fn base_uri(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn set_base_uri<T: Into<Cow<'a, str>>>(&mut self, uri: T) {
        self.base = Some(uri.into());
    }

    /// Overrides the base URI for a single node.
    pub fn set_node_base<T: Into<Cow<'a, str>>>(&mut self, id: NodeId, base: T) {
        self.nodes[id.index()].base = Some(base.into());
    }

    fn data(&self, id: NodeId) -> &NodeData<'a> {
        &self.nodes[id.index()]
    }

    pub(crate) fn child_ids(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    // ------------------------------------------------------------------
    // Node creation
    // ------------------------------------------------------------------

    pub(crate) fn alloc(&mut self, kind: NodeKind<'a>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(NodeData::new(kind));
        id
    }

    /// Creates a detached element.
    ///
    /// The qualified name is validated; see [`DomError::InvalidName`].
    pub fn create_element<N>(&mut self, name: N) -> Result<NodeId, DomError>
    where
        N: Into<Cow<'a, str>>,
    {
        self.create_element_ns(name, None::<&str>)
    }

    /// Creates a detached element with a namespace URI.
    pub fn create_element_ns<N, S>(
        &mut self,
        name: N,
        namespace: Option<S>,
    ) -> Result<NodeId, DomError>
    where
        N: Into<Cow<'a, str>>,
        S: Into<Cow<'a, str>>,
    {
        let name = name.into();
        validate_qname(&name)?;
        Ok(self.alloc(NodeKind::Element {
            name,
            namespace: namespace.map(Into::into),
            attributes: Vec::new(),
        }))
    }

    /// Creates an element and appends it under `parent` in one step, so it
    /// is never observable in a half-linked state.
    pub fn create_element_in<N>(&mut self, name: N, parent: NodeId) -> Result<NodeId, DomError>
    where
        N: Into<Cow<'a, str>>,
    {
        let name = name.into();
        validate_qname(&name)?;
        // Validate the destination before allocating so a rejected append
        // cannot leave an orphan behind.
        let probe = NodeKind::Element {
            name: Cow::Borrowed(""),
            namespace: None,
            attributes: Vec::new(),
        };
        self.check_slot(parent, &probe)?;
        let id = self.alloc(NodeKind::Element {
            name,
            namespace: None,
            attributes: Vec::new(),
        });
        self.link(parent, id);
        Ok(id)
    }

    /// Creates a detached text node.
    pub fn create_text<T: Into<Cow<'a, str>>>(&mut self, text: T) -> NodeId {
        self.alloc(NodeKind::Text(text.into()))
    }

    /// Creates a detached comment node.
    pub fn create_comment<T: Into<Cow<'a, str>>>(&mut self, text: T) -> NodeId {
        self.alloc(NodeKind::Comment(text.into()))
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Sets an attribute on an element, overwriting an existing value
    /// under the same name. Names stay unique per element.
    pub fn set_attribute<N, V>(&mut self, id: NodeId, name: N, value: V) -> Result<(), DomError>
    where
        N: Into<Cow<'a, str>>,
        V: Into<Cow<'a, str>>,
    {
        let name = name.into();
        validate_qname(&name)?;
        let value = value.into();
        match &mut self.nodes[id.index()].kind {
            NodeKind::Element { attributes, .. } => {
                if let Some(existing) = attributes.iter_mut().find(|a| a.name == name) {
                    existing.value = value;
                } else {
                    attributes.push(Attribute { name, value });
                }
                Ok(())
            }
            _ => Err(DomError::InvalidNode("attributes exist only on element nodes")),
        }
    }

    /// Appends `child` at the end of `parent`'s child list.
    ///
    /// Fails with [`DomError::AlreadyAttached`] if `child` currently has a
    /// parent - there is no silent re-link; detach first. Text and comment
    /// nodes cannot adopt, and the document node accepts at most one
    /// element child.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, DomError> {
        self.check_slot(parent, &self.nodes[child.index()].kind)?;
        self.check_no_cycle(parent, child)?;
        if self.nodes[child.index()].parent.is_some() {
            return Err(DomError::AlreadyAttached);
        }
        self.link(parent, child);
        Ok(child)
    }

    /// Appends character data under `parent`.
    ///
    /// When `parent`'s last child is already a Text node the data is merged
    /// into it instead of creating an adjacent sibling, so a tree never
    /// holds two Text nodes side by side. Returns the (new or extended)
    /// Text node.
    pub fn append_text<T>(&mut self, parent: NodeId, text: T) -> Result<NodeId, DomError>
    where
        T: Into<Cow<'a, str>>,
    {
        if !matches!(self.nodes[parent.index()].kind, NodeKind::Element { .. }) {
            return Err(DomError::InvalidNode("character data can only live under an element"));
        }
        let text = text.into();
        if let Some(&last) = self.nodes[parent.index()].children.last() {
            if let NodeKind::Text(existing) = &mut self.nodes[last.index()].kind {
                existing.to_mut().push_str(&text);
                return Ok(last);
            }
        }
        let id = self.alloc(NodeKind::Text(text));
        self.link(parent, id);
        Ok(id)
    }

    /// Removes `old` from `parent`'s child list and returns it with its
    /// parent link cleared; the caller now holds an independent subtree.
    ///
    /// Fails with [`DomError::NodeNotFound`] unless `old` is currently a
    /// child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, old: NodeId) -> Result<NodeId, DomError> {
        let pos = self
            .nodes[parent.index()]
            .children
            .iter()
            .position(|&c| c == old)
            .ok_or_else(|| DomError::NodeNotFound(self.describe(old)))?;
        self.nodes[parent.index()].children.remove(pos);
        self.nodes[old.index()].parent = None;
        Ok(old)
    }

    /// Replaces `old` with `new` at the same position and returns `old`
    /// detached.
    ///
    /// `old` must currently be a child of `parent` ([`DomError::NodeNotFound`])
    /// and `new` must be detached ([`DomError::AlreadyAttached`]).
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new: NodeId,
        old: NodeId,
    ) -> Result<NodeId, DomError> {
        let pos = self
            .nodes[parent.index()]
            .children
            .iter()
            .position(|&c| c == old)
            .ok_or_else(|| DomError::NodeNotFound(self.describe(old)))?;
        if self.nodes[new.index()].parent.is_some() {
            return Err(DomError::AlreadyAttached);
        }
        self.check_no_cycle(parent, new)?;
        // Unlink old before the slot check so replacing the root element
        // with another element passes the single-root rule.
        self.nodes[old.index()].parent = None;
        self.nodes[parent.index()].children.remove(pos);
        if let Err(err) = self.check_slot(parent, &self.nodes[new.index()].kind) {
            self.nodes[old.index()].parent = Some(parent);
            self.nodes[parent.index()].children.insert(pos, old);
            return Err(err);
        }
        self.nodes[new.index()].parent = Some(parent);
        self.nodes[parent.index()].children.insert(pos, new);
        Ok(old)
    }

    /// Unlinks a node from its parent, if it has one. No-op on detached
    /// nodes and on the Document node.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.index()].parent.take() {
            self.nodes[parent.index()].children.retain(|&c| c != id);
        }
    }

    /// Sets the node value of a Text or Comment node. Elements and the
    /// Document define their value as null, so setting it has no effect.
    pub fn set_node_value<T: Into<Cow<'a, str>>>(&mut self, id: NodeId, value: T) {
        match &mut self.nodes[id.index()].kind {
            NodeKind::Text(content) | NodeKind::Comment(content) => *content = value.into(),
            NodeKind::Document | NodeKind::Element { .. } => {}
        }
    }

    /// Normalizes the subtree under `id`: merges adjacent Text children
    /// and drops empty Text nodes, recursively. Idempotent.
    pub fn normalize(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(nid) = stack.pop() {
            let children = self.nodes[nid.index()].children.clone();
            let mut kept: Vec<NodeId> = Vec::with_capacity(children.len());
            for cid in children {
                match &self.nodes[cid.index()].kind {
                    NodeKind::Text(content) => {
                        if content.is_empty() {
                            self.nodes[cid.index()].parent = None;
                            continue;
                        }
                        let merge_into = kept
                            .last()
                            .copied()
                            .filter(|&p| matches!(self.nodes[p.index()].kind, NodeKind::Text(_)));
                        if let Some(prev) = merge_into {
                            let content = content.clone();
                            if let NodeKind::Text(existing) = &mut self.nodes[prev.index()].kind {
                                existing.to_mut().push_str(&content);
                            }
                            self.nodes[cid.index()].parent = None;
                        } else {
                            kept.push(cid);
                        }
                    }
                    _ => {
                        kept.push(cid);
                        stack.push(cid);
                    }
                }
            }
            self.nodes[nid.index()].children = kept;
        }
    }

    // ------------------------------------------------------------------
    // Link plumbing
    // ------------------------------------------------------------------

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Checks that `parent` may take a child of `child_kind`.
    fn check_slot(&self, parent: NodeId, child_kind: &NodeKind<'_>) -> Result<(), DomError> {
        match &self.nodes[parent.index()].kind {
            NodeKind::Element { .. } => Ok(()),
            NodeKind::Document => match child_kind {
                NodeKind::Element { .. } if self.root_element_id().is_some() => Err(
                    DomError::HierarchyRequest("document already has a root element"),
                ),
                NodeKind::Text(_) => Err(DomError::HierarchyRequest(
                    "text cannot be a child of the document",
                )),
                _ => Ok(()),
            },
            NodeKind::Text(_) | NodeKind::Comment(_) => Err(DomError::InvalidNode(
                "text and comment nodes cannot have children",
            )),
        }
    }

    /// Adopting an ancestor (or self) would close a cycle.
    fn check_no_cycle(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(DomError::HierarchyRequest("node cannot adopt its own ancestor"));
            }
            cursor = self.nodes[id.index()].parent;
        }
        Ok(())
    }

    fn describe(&self, id: NodeId) -> String {
        match &self.nodes[id.index()].kind {
            NodeKind::Document => "#document".to_string(),
            NodeKind::Element { name, .. } => name.to_string(),
            NodeKind::Text(_) => "#text".to_string(),
            NodeKind::Comment(_) => "#comment".to_string(),
        }
    }
}

impl<'a> Default for Document<'a> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Node (navigation handle)
// ============================================================================

/// A handle for navigating the document tree.
///
/// This is a lightweight reference that borrows from the document.
#[derive(Clone, Copy)]
pub struct Node<'doc, 'a: 'doc> {
    doc: &'doc Document<'a>,
    id: NodeId,
}

impl<'doc, 'a: 'doc> Node<'doc, 'a> {
    /// Get the node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the node's kind.
    pub fn kind(&self) -> &'doc NodeKind<'a> {
        &self.doc.data(self.id).kind
    }

    /// The name of this node: `"#document"`, the element's qualified
    /// name, `"#text"`, or `"#comment"`.
    pub fn node_name(&self) -> &'doc str {
        match self.kind() {
            NodeKind::Document => "#document",
            NodeKind::Element { name, .. } => name.as_ref(),
            NodeKind::Text(_) => "#text",
            NodeKind::Comment(_) => "#comment",
        }
    }

    /// The local part of an element's qualified name. `None` for
    /// non-elements.
    pub fn local_name(&self) -> Option<&'doc str> {
        match self.kind() {
            NodeKind::Element { name, .. } => {
                let name = name.as_ref();
                Some(name.rsplit(':').next().unwrap_or(name))
            }
            _ => None,
        }
    }

    /// The namespace prefix of an element's qualified name, if any.
    pub fn prefix(&self) -> Option<&'doc str> {
        match self.kind() {
            NodeKind::Element { name, .. } => name.as_ref().split_once(':').map(|(p, _)| p),
            _ => None,
        }
    }

    /// The namespace URI this element was created with, if any.
    pub fn namespace_uri(&self) -> Option<&'doc str> {
        match self.kind() {
            NodeKind::Element { namespace, .. } => namespace.as_deref(),
            _ => None,
        }
    }

    /// The node value: text content for Text, the body for Comment,
    /// `None` for Element and Document.
    pub fn node_value(&self) -> Option<&'doc str> {
        match self.kind() {
            NodeKind::Text(content) | NodeKind::Comment(content) => Some(content.as_ref()),
            NodeKind::Document | NodeKind::Element { .. } => None,
        }
    }

    /// The node's base URI: its own override if set, else the document's.
    pub fn base_uri(&self) -> Option<&'doc str> {
        self.doc
            .data(self.id)
            .base
            .as_deref()
            .or_else(|| self.doc.base_uri())
    }

    /// Get the parent node, if any.
    pub fn parent(&self) -> Option<Node<'doc, 'a>> {
        self.doc
            .data(self.id)
            .parent
            .map(|id| Node { doc: self.doc, id })
    }

    /// Iterate over child nodes in document order.
    pub fn children(&self) -> impl Iterator<Item = Node<'doc, 'a>> + 'doc {
        let doc = self.doc;
        self.doc
            .data(self.id)
            .children
            .iter()
            .map(move |&id| Node { doc, id })
    }

    /// Get the first child node.
    pub fn first_child(&self) -> Option<Node<'doc, 'a>> {
        self.doc
            .data(self.id)
            .children
            .first()
            .map(|&id| Node { doc: self.doc, id })
    }

    /// Get the last child node.
    pub fn last_child(&self) -> Option<Node<'doc, 'a>> {
        self.doc
            .data(self.id)
            .children
            .last()
            .map(|&id| Node { doc: self.doc, id })
    }

    /// Get the next sibling node.
    pub fn next_sibling(&self) -> Option<Node<'doc, 'a>> {
        let parent_id = self.doc.data(self.id).parent?;
        let siblings = &self.doc.data(parent_id).children;
        let pos = siblings.iter().position(|&id| id == self.id)?;
        siblings.get(pos + 1).map(|&id| Node { doc: self.doc, id })
    }

    /// Get the previous sibling node.
    pub fn prev_sibling(&self) -> Option<Node<'doc, 'a>> {
        let parent_id = self.doc.data(self.id).parent?;
        let siblings = &self.doc.data(parent_id).children;
        let pos = siblings.iter().position(|&id| id == self.id)?;
        if pos > 0 {
            Some(Node {
                doc: self.doc,
                id: siblings[pos - 1],
            })
        } else {
            None
        }
    }

    pub fn has_children(&self) -> bool {
        !self.doc.data(self.id).children.is_empty()
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes().is_empty()
    }

    /// The element's attributes, empty for other kinds.
    pub fn attributes(&self) -> &'doc [Attribute<'a>] {
        match self.kind() {
            NodeKind::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&'doc str> {
        self.attributes()
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_ref())
    }

    pub fn is_document(&self) -> bool {
        matches!(self.kind(), NodeKind::Document)
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind(), NodeKind::Element { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind(), NodeKind::Text(_))
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind(), NodeKind::Comment(_))
    }

    /// Get element view if this is an element.
    pub fn as_element(&self) -> Option<ElementView<'doc, 'a>> {
        if let NodeKind::Element { .. } = self.kind() {
            Some(ElementView { node: *self })
        } else {
            None
        }
    }

    /// Get text content if this is a text node.
    pub fn text(&self) -> Option<&'doc str> {
        match self.kind() {
            NodeKind::Text(content) => Some(content.as_ref()),
            _ => None,
        }
    }

    /// Counts the Element nodes in this subtree, including self.
    pub fn count_element_nodes(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.id];
        while let Some(id) = stack.pop() {
            let data = self.doc.data(id);
            if matches!(data.kind, NodeKind::Element { .. }) {
                count += 1;
            }
            stack.extend(data.children.iter().copied());
        }
        count
    }

    /// Looks up the namespace URI bound to `prefix` at the nearest
    /// ancestor-or-self element that defines it; `None` asks for the
    /// default namespace.
    ///
    /// Bindings come from an element's own prefix/namespace pair and from
    /// `xmlns` / `xmlns:p` declaration attributes.
    pub fn lookup_namespace_uri(&self, prefix: Option<&str>) -> Option<&'doc str> {
        let mut cursor = Some(self.id);
        while let Some(id) = cursor {
            let data = self.doc.data(id);
            if let NodeKind::Element {
                name,
                namespace,
                attributes,
            } = &data.kind
            {
                if let Some(uri) = namespace {
                    let own_prefix = name.as_ref().split_once(':').map(|(p, _)| p);
                    if own_prefix == prefix {
                        return Some(uri.as_ref());
                    }
                }
                for attr in attributes {
                    let declared = attr.name.as_ref();
                    match prefix {
                        Some(p) => {
                            if declared.strip_prefix("xmlns:") == Some(p) {
                                return Some(attr.value.as_ref());
                            }
                        }
                        None => {
                            if declared == "xmlns" {
                                return Some(attr.value.as_ref());
                            }
                        }
                    }
                }
            }
            cursor = data.parent;
        }
        None
    }

    /// Whether `uri` is the default namespace in scope at this node.
    pub fn is_default_namespace(&self, uri: &str) -> bool {
        self.lookup_namespace_uri(None).is_some_and(|u| u == uri)
    }

    /// Identity: same document arena and same id.
    pub fn is_same_node(&self, other: &Node<'_, '_>) -> bool {
        let a = self.doc as *const _ as *const ();
        let b = other.doc as *const _ as *const ();
        a == b && self.id == other.id
    }

    /// Structural equality: same kind, name, value, attribute set, and
    /// recursively equal children in order. Two distinct nodes - even in
    /// different documents - can be equal without being the same node.
    pub fn is_equal_node(&self, other: &Node<'_, '_>) -> bool {
        let mut pairs = vec![(self.id, other.id)];
        while let Some((a, b)) = pairs.pop() {
            let da = self.doc.data(a);
            let db = other.doc.data(b);
            if !kinds_equal(&da.kind, &db.kind) {
                return false;
            }
            if da.children.len() != db.children.len() {
                return false;
            }
            pairs.extend(da.children.iter().copied().zip(db.children.iter().copied()));
        }
        true
    }

    /// Renders this subtree as indented text, one node per line, starting
    /// at the given indent level. Diagnostic output, not markup.
    pub fn print_node(&self, indent: usize) -> String {
        let mut out = String::new();
        self.print_into(indent, &mut out);
        out
    }

    fn print_into(&self, indent: usize, out: &mut String) {
        let pad = "  ".repeat(indent);
        match self.kind() {
            NodeKind::Document => {
                out.push_str(&pad);
                out.push_str("#document\n");
            }
            NodeKind::Element {
                name, attributes, ..
            } => {
                out.push_str(&pad);
                out.push('<');
                out.push_str(name);
                for attr in attributes {
                    out.push_str(&format!(" {}={:?}", attr.name, attr.value.as_ref()));
                }
                out.push_str(">\n");
            }
            NodeKind::Text(content) => {
                out.push_str(&format!("{}#text {:?}\n", pad, content.as_ref()));
            }
            NodeKind::Comment(content) => {
                out.push_str(&format!("{}<!-- {} -->\n", pad, content));
            }
        }
        for child in self.children() {
            child.print_into(indent + 1, out);
        }
    }
}

impl<'doc, 'a> std::fmt::Debug for Node<'doc, 'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", self.kind())
            .finish()
    }
}

fn kinds_equal(a: &NodeKind<'_>, b: &NodeKind<'_>) -> bool {
    match (a, b) {
        (NodeKind::Document, NodeKind::Document) => true,
        (NodeKind::Text(x), NodeKind::Text(y))
        | (NodeKind::Comment(x), NodeKind::Comment(y)) => x.as_ref() == y.as_ref(),
        (
            NodeKind::Element {
                name: na,
                namespace: sa,
                attributes: aa,
            },
            NodeKind::Element {
                name: nb,
                namespace: sb,
                attributes: ab,
            },
        ) => {
            na.as_ref() == nb.as_ref()
                && sa.as_deref() == sb.as_deref()
                && aa.len() == ab.len()
                // Attribute names are unique, so set equality is enough.
                && aa.iter().all(|x| {
                    ab.iter()
                        .any(|y| x.name.as_ref() == y.name.as_ref() && x.value.as_ref() == y.value.as_ref())
                })
        }
        _ => false,
    }
}

// ============================================================================
// ElementView (typed access to elements)
// ============================================================================

/// A typed view for element nodes.
#[derive(Clone, Copy)]
pub struct ElementView<'doc, 'a: 'doc> {
    node: Node<'doc, 'a>,
}

impl<'doc, 'a: 'doc> ElementView<'doc, 'a> {
    /// Get the underlying node.
    pub fn node(&self) -> Node<'doc, 'a> {
        self.node
    }

    /// Get the element's qualified name.
    pub fn name(&self) -> &'doc str {
        if let NodeKind::Element { name, .. } = self.node.kind() {
            name.as_ref()
        } else {
            unreachable!()
        }
    }

    /// Get an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&'doc str> {
        self.node.attribute(name)
    }

    /// Iterate over all attributes.
    pub fn attrs(&self) -> impl Iterator<Item = (&'doc str, &'doc str)> {
        self.node
            .attributes()
            .iter()
            .map(|a| (a.name.as_ref(), a.value.as_ref()))
    }

    /// Iterate over child nodes.
    pub fn children(&self) -> impl Iterator<Item = Node<'doc, 'a>> + 'doc {
        self.node.children()
    }
}

impl<'doc, 'a> std::fmt::Debug for ElementView<'doc, 'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementView")
            .field("name", &self.name())
            .finish()
    }
}

// ============================================================================
// Name validation
// ============================================================================

fn validate_qname(name: &str) -> Result<(), DomError> {
    if is_valid_qname(name) {
        Ok(())
    } else {
        Err(DomError::InvalidName(name.to_string()))
    }
}

/// A qualified name is one or two colon-separated NCName parts.
fn is_valid_qname(name: &str) -> bool {
    let mut parts = name.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), None, None) => is_valid_ncname(local),
        (Some(prefix), Some(local), None) => is_valid_ncname(prefix) && is_valid_ncname(local),
        _ => false,
    }
}

fn is_valid_ncname(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(c) if UnicodeXID::is_xid_start(c) || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| UnicodeXID::is_xid_continue(c) || c == '-' || c == '.')
}

// ============================================================================
// Tests
// ============================================================================
