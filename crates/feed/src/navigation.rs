// ABOUTME: Stack of currently open tags used to answer parent/grandparent questions.
// ABOUTME: Every start tag is pushed and every end tag popped, recognized or not.

use crate::catalog::{Element, Tag};

/// One open tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Canonical catalog key of the tag.
    pub key: String,
    pub tag: Tag,
}

/// Last-in-first-out record of open tags.
#[derive(Debug, Default)]
pub struct NavigationStack {
    frames: Vec<Frame>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, tag: Tag) {
        self.frames.push(Frame {
            key: key.into(),
            tag,
        });
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// True when the innermost open tag is `element`.
    pub fn immediate_parent_is(&self, element: Element) -> bool {
        self.top().is_some_and(|frame| frame.tag.is(element))
    }

    /// True when the tag enclosing the innermost open tag is `element`.
    pub fn grandparent_is(&self, element: Element) -> bool {
        self.frames
            .len()
            .checked_sub(2)
            .and_then(|idx| self.frames.get(idx))
            .is_some_and(|frame| frame.tag.is(element))
    }
}
