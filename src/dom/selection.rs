//! Document selection: anchor/focus boundaries plus the host-measured bounds.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::node::{Document, NodeId};

/// A point in the tree: a character offset inside a text node, or a child
/// index inside an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boundary {
    pub node: NodeId,
    pub offset: usize,
}

impl Boundary {
    pub const fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// `Selection.type` as the browser reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionKind {
    /// Collapsed selection (a blinking caret)
    Caret,
    /// Non-collapsed selection covering some content
    Range,
}

/// A selection with anchor (where it started) and focus (where it ends).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Boundary,
    pub focus: Boundary,
    /// Bounding client rectangle of the selected range, measured by the host
    #[serde(default)]
    pub bounds: Rect,
}

impl Selection {
    pub fn new(anchor: Boundary, focus: Boundary) -> Self {
        Self {
            anchor,
            focus,
            bounds: Rect::default(),
        }
    }

    /// Create a collapsed selection (caret with no range)
    pub fn collapsed(at: Boundary) -> Self {
        Self::new(at, at)
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn kind(&self) -> SelectionKind {
        if self.is_collapsed() {
            SelectionKind::Caret
        } else {
            SelectionKind::Range
        }
    }
}

impl Document {
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    /// Place a collapsed caret
    pub fn set_caret(&mut self, node: NodeId, offset: usize) {
        self.selection = Some(Selection::collapsed(Boundary::new(node, offset)));
    }

    /// Select from `anchor` to `focus`, with the host-measured range bounds
    pub fn select(&mut self, anchor: Boundary, focus: Boundary, bounds: Rect) {
        self.selection = Some(Selection::new(anchor, focus).with_bounds(bounds));
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Node the caret sits in; a text anchor resolves to its parent element
    pub fn current_node(&self) -> Option<NodeId> {
        let anchor = self.selection.as_ref()?.anchor.node;
        if self.is_text(anchor) {
            self.parent(anchor)
        } else {
            Some(anchor)
        }
    }

    /// Whether the selection anchor lies inside `root` (inclusive)
    pub fn selection_within(&self, root: NodeId) -> bool {
        self.selection
            .as_ref()
            .map(|s| self.contains(root, s.anchor.node))
            .unwrap_or(false)
    }

    /// Boundary just past the last text inside `root`, ignoring subtrees in `skip`.
    ///
    /// Without any text the boundary is after the last child of `root`.
    pub fn end_boundary(&self, root: NodeId, skip: &[NodeId]) -> Boundary {
        self.text_nodes(root, skip)
            .last()
            .map(|&text| Boundary::new(text, self.text(text).unwrap_or_default().chars().count()))
            .unwrap_or_else(|| Boundary::new(root, self.children(root).len()))
    }

    /// Boundary at a character offset into the text of `root`, ignoring
    /// subtrees in `skip`. Offsets past the end clamp to the end.
    pub fn boundary_at_char(&self, root: NodeId, offset: usize, skip: &[NodeId]) -> Boundary {
        let mut remaining = offset;
        for text in self.text_nodes(root, skip) {
            let len = self.text(text).unwrap_or_default().chars().count();
            if remaining <= len {
                return Boundary::new(text, remaining);
            }
            remaining -= len;
        }
        self.end_boundary(root, skip)
    }

    fn text_nodes(&self, root: NodeId, skip: &[NodeId]) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if skip.contains(&id) {
                continue;
            }
            if self.is_text(id) {
                out.push(id);
            }
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    /// Path of child indices from `body` to `node`, used for document order
    pub(super) fn tree_path(&self, node: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = node;
        while let Some(index) = self.index_in_parent(current) {
            path.push(index);
            match self.parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Order two boundaries in document order
    pub(super) fn boundary_before(&self, a: &Boundary, b: &Boundary) -> bool {
        if a.node == b.node {
            return a.offset <= b.offset;
        }
        self.tree_path(a.node) <= self.tree_path(b.node)
    }
}
