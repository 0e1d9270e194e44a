//! Iterative, stack-driven preorder traversal.
//!
//! The walker replaces recursion with an explicit stack so that stack
//! depth is independent of document depth, a subtree can be pruned
//! mid-walk ([`skip_children`](StackWalker::skip_children)), and a hard
//! visit ceiling can be enforced.
//!
//! The algorithm starts with the root on the stack. Each
//! [`next_node`](StackWalker::next_node) pops one node and - on the
//! *following* advance - pushes that node's children in reverse order,
//! last child first. Popping from the stack then yields first-child-first,
//! which is exactly document order. Deferring the push is what makes
//! pruning possible: until the next advance, the children have not been
//! committed to the stack and `skip_children` can drop them wholesale.
//!
//! ```text
//! stack (top left):   walk of  <a> <b> <c/> </b> <d/> </a>
//!
//!   a          pop a, pending {b d}
//!   b d        pop b, pending {c}, d below
//!   c d        pop c
//!   d          pop d
//! ```
//!
//! A walker is restartable only via [`configure`](StackWalker::configure)
//! and holds a single cursor, so it is not meant for concurrent
//! advancement; several independent walkers over one document are fine.

use crate::error::DomError;
use crate::trace::trace;
use crate::tree::{Document, Node, NodeId};

/// Depth-first, left-to-right walker over a built tree.
pub struct StackWalker<'doc, 'a: 'doc> {
    doc: &'doc Document<'a>,
    /// Pending nodes, nearest in document order on top.
    stack: Vec<NodeId>,
    /// The node most recently returned, its children not yet pushed.
    pending: Option<NodeId>,
    /// Remaining visit budget; `None` is unbounded.
    remaining: Option<usize>,
}

impl<'doc, 'a: 'doc> StackWalker<'doc, 'a> {
    /// Creates a walker rooted at `root`, visiting at most
    /// `nodes_to_process` nodes (`0` = no ceiling).
    pub fn new(doc: &'doc Document<'a>, root: NodeId, nodes_to_process: usize) -> Self {
        let mut walker = StackWalker {
            doc,
            stack: Vec::new(),
            pending: None,
            remaining: None,
        };
        walker.configure(root, nodes_to_process);
        walker
    }

    /// Resets the walker onto a new root and visit budget, discarding any
    /// walk in progress.
    pub fn configure(&mut self, root: NodeId, nodes_to_process: usize) {
        self.stack.clear();
        self.stack.push(root);
        self.pending = None;
        self.remaining = (nodes_to_process != 0).then_some(nodes_to_process);
        trace!(nodes_to_process, "walker configured");
    }

    /// True while the walk can still yield a node: something is pending
    /// and the visit budget is not exhausted.
    pub fn has_next(&self) -> bool {
        if self.remaining == Some(0) {
            return false;
        }
        if !self.stack.is_empty() {
            return true;
        }
        // The last-returned node's children have not been pushed yet.
        self.pending
            .and_then(|id| self.doc.get(id))
            .is_some_and(|n| n.has_children())
    }

    /// Pops the next node in document order, or `None` when the walk is
    /// exhausted (or the visit budget is spent).
    pub fn next_node(&mut self) -> Option<Node<'doc, 'a>> {
        if self.remaining == Some(0) {
            self.pending = None;
            return None;
        }
        // Commit the previously returned node's children, last child
        // first, so popping yields left-to-right order.
        if let Some(id) = self.pending.take() {
            for &child in self.doc.child_ids(id).iter().rev() {
                self.stack.push(child);
            }
        }
        let id = self.stack.pop()?;
        self.pending = Some(id);
        if let Some(budget) = self.remaining.as_mut() {
            *budget -= 1;
        }
        self.doc.get(id)
    }

    /// Prunes the subtree of the node just returned by
    /// [`next_node`](Self::next_node): none of its descendants will be
    /// yielded for the rest of this walk.
    ///
    /// Must be called directly after a successful `next_node`. Calling it
    /// twice, before any `next_node`, or after the walk ended is a
    /// protocol violation reported as [`DomError::WalkerMisuse`].
    pub fn skip_children(&mut self) -> Result<(), DomError> {
        match self.pending.take() {
            Some(_) => {
                trace!("subtree pruned");
                Ok(())
            }
            None => Err(DomError::WalkerMisuse(
                "skip_children must directly follow next_node",
            )),
        }
    }
}

impl<'doc, 'a> std::fmt::Debug for StackWalker<'doc, 'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackWalker")
            .field("stack_depth", &self.stack.len())
            .field("remaining", &self.remaining)
            .finish()
    }
}
