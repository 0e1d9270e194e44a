//! Structural events - the input vocabulary of the DOM builder.
//!
//! This is a SAX-style event model: an external tokenizer pushes events
//! in document order, and the builder assembles a tree from them without
//! ever seeing the raw markup. Byte-level syntax, encodings, and I/O are
//! the tokenizer's concern; this crate only defines the vocabulary.
//!
//! The lifetime `'a` refers to the tokenizer's source buffer - all string
//! slices are zero-copy references into the original input.
//!
//! ## Event sequences
//!
//! A well-formed document emits:
//! ```text
//! DocumentStart
//! ElementStart { name: "a", .. }
//!   ElementStart { name: "b", .. }
//!   Characters { text: "hi" }
//!   ElementEnd
//! ElementEnd
//! DocumentEnd
//! ```
//!
//! Structure is represented by start/end pairs; character runs may arrive
//! split across several `Characters` events and are merged by the builder.

/// Structural parse events, pushed to [`DomBuilder`](crate::DomBuilder)
/// in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    /// Document start - the first event of every well-formed sequence.
    DocumentStart,

    /// Element start tag.
    ///
    /// `name` is the qualified name (`prefix:local` or plain `local`).
    /// `attributes` carries the name/value pairs in source order; duplicate
    /// names are resolved last-wins when the tree is built.
    ElementStart {
        name: &'a str,
        attributes: Vec<(&'a str, &'a str)>,
        namespace: Option<&'a str>,
    },

    /// A run of character data inside the current element.
    ///
    /// Consecutive runs with no structural event between them collapse
    /// into a single Text node.
    Characters { text: &'a str },

    /// A comment body (without delimiters).
    Comment { text: &'a str },

    /// Element end tag. Matches the most recent unclosed `ElementStart`.
    ElementEnd,

    /// Document end - the last event of every well-formed sequence.
    DocumentEnd,

    /// Tokenizer failure. Terminates the build with a conversion error.
    ParseError { message: &'a str },
}

impl<'a> Event<'a> {
    /// Check if this is an error event.
    pub fn is_error(&self) -> bool {
        matches!(self, Event::ParseError { .. })
    }

    /// Check if this event opens or closes structure (as opposed to
    /// carrying content).
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Event::DocumentStart
                | Event::ElementStart { .. }
                | Event::ElementEnd
                | Event::DocumentEnd
        )
    }
}
