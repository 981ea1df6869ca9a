//! Editing commands equivalent to `document.execCommand`
//!
//! All commands act on the current selection, like their browser
//! counterparts, and leave a collapsed caret behind.

use super::node::{Document, NodeId};
use super::selection::{Boundary, Selection};

/// Split `text` at a character offset
fn split_at_char(text: &str, offset: usize) -> (String, String) {
    let byte = text
        .char_indices()
        .nth(offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    (text[..byte].to_string(), text[byte..].to_string())
}

impl Document {
    /// Delete the selected content when it lies within one text node, then
    /// collapse to the start of the selection.
    fn collapse_for_insert(&mut self) -> Option<Boundary> {
        let selection = *self.selection.as_ref()?;
        if selection.is_collapsed() {
            return Some(selection.anchor);
        }

        let (start, end) = if self.boundary_before(&selection.anchor, &selection.focus) {
            (selection.anchor, selection.focus)
        } else {
            (selection.focus, selection.anchor)
        };

        if start.node == end.node && self.is_text(start.node) {
            let text = self.text(start.node).unwrap_or_default().to_string();
            let (before, rest) = split_at_char(&text, start.offset);
            let (_, after) = split_at_char(&rest, end.offset.saturating_sub(start.offset));
            self.set_text(start.node, &format!("{}{}", before, after));
        } else {
            tracing::debug!("multi-node selection collapsed without deleting contents");
        }

        self.selection = Some(Selection::collapsed(start));
        Some(start)
    }

    /// Insert already-built nodes at the caret, leaving the caret after them
    pub fn insert_nodes(&mut self, nodes: &[NodeId]) -> bool {
        let Some(at) = self.collapse_for_insert() else {
            return false;
        };
        let Some(&last) = nodes.last() else {
            return true;
        };

        let (parent, index) = if self.is_text(at.node) {
            let Some(parent) = self.parent(at.node) else {
                return false;
            };
            let text = self.text(at.node).unwrap_or_default().to_string();
            let (before, after) = split_at_char(&text, at.offset);
            self.set_text(at.node, &before);
            let index = self.index_in_parent(at.node).map(|i| i + 1).unwrap_or(0);
            if !after.is_empty() {
                let tail = self.create_text(&after);
                self.insert_at(parent, index, tail);
            }
            (parent, index)
        } else {
            (at.node, at.offset.min(self.children(at.node).len()))
        };

        for (i, &node) in nodes.iter().enumerate() {
            self.insert_at(parent, index + i, node);
        }

        let caret = match self.text(last) {
            Some(text) => Boundary::new(last, text.chars().count()),
            None => Boundary::new(parent, index + nodes.len()),
        };
        self.selection = Some(Selection::collapsed(caret));
        true
    }

    /// `insertHTML`: parse and insert markup at the caret
    pub fn insert_html(&mut self, html: &str) -> Vec<NodeId> {
        let nodes = self.parse_fragment(html);
        if self.insert_nodes(&nodes) {
            nodes
        } else {
            Vec::new()
        }
    }

    /// Insert block nodes as children of `root` at the caret.
    ///
    /// The caret's top-level block is split in two around the caret, and the
    /// new blocks go between the halves. A half left without text (such as the
    /// `<p><br></p>` of an empty field) is dropped. The caret ends after the
    /// last inserted block's text.
    pub fn insert_blocks(&mut self, root: NodeId, blocks: &[NodeId]) -> bool {
        let Some(at) = self.collapse_for_insert() else {
            return false;
        };
        if !self.contains(root, at.node) {
            return false;
        }
        let Some(&last) = blocks.last() else {
            return true;
        };

        let index = if at.node == root {
            at.offset.min(self.children(root).len())
        } else {
            let mut top = at.node;
            while self.parent(top) != Some(root) {
                let Some(parent) = self.parent(top) else {
                    return false;
                };
                top = parent;
            }
            let Some(index) = self.index_in_parent(top) else {
                return false;
            };

            let tail = self.split_off(top, at);
            let mut index = index + 1;
            if let Some(tail) = tail.filter(|&tail| self.is_blank(tail)) {
                self.remove_child(root, tail);
            }
            if self.is_blank(top) {
                self.remove_child(root, top);
                index -= 1;
            }
            index
        };

        for (i, &block) in blocks.iter().enumerate() {
            self.insert_at(root, index + i, block);
        }
        let caret = self.end_boundary(last, &[]);
        self.selection = Some(Selection::collapsed(caret));
        true
    }

    /// Split `top` at `at`, moving everything after the boundary into a new
    /// sibling right after `top`. Returns that sibling, if one was created.
    fn split_off(&mut self, top: NodeId, at: Boundary) -> Option<NodeId> {
        let (mut node, mut split) = if self.is_text(at.node) {
            let text = self.text(at.node).unwrap_or_default().to_string();
            let (before, after) = split_at_char(&text, at.offset);
            let owner = self.parent(at.node)?;
            let index = self.index_in_parent(at.node)? + 1;
            let mut tail = None;
            if !after.is_empty() {
                self.set_text(at.node, &before);
                let rest = self.create_text(&after);
                self.insert_at(owner, index, rest);
                tail = Some(rest);
            }
            if at.node == top {
                return tail;
            }
            (owner, index)
        } else {
            (at.node, at.offset)
        };

        loop {
            let right = self.shallow_clone(node)?;
            let moved: Vec<NodeId> = self.children(node).iter().skip(split).copied().collect();
            for child in moved {
                self.append_child(right, child);
            }
            let owner = self.parent(node)?;
            let index = self.index_in_parent(node)? + 1;
            self.insert_at(owner, index, right);
            if node == top {
                return Some(right);
            }
            node = owner;
            split = index;
        }
    }

    fn shallow_clone(&mut self, id: NodeId) -> Option<NodeId> {
        let tag = self.tag_name(id)?.to_string();
        let attributes: Vec<(String, String)> = self
            .attributes(id)
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        let clone = self.create_element(&tag);
        for (name, value) in &attributes {
            self.set_attribute(clone, name, value);
        }
        Some(clone)
    }

    /// No text and no elements besides line breaks
    fn is_blank(&self, id: NodeId) -> bool {
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            match self.text(node) {
                Some(text) if !text.is_empty() => return false,
                Some(_) => {}
                None if node != id && self.tag_name(node) != Some("br") => {
                    if self.children(node).is_empty() {
                        return false;
                    }
                    stack.extend_from_slice(self.children(node));
                }
                None => stack.extend_from_slice(self.children(node)),
            }
        }
        true
    }

    /// `insertText`: insert plain text at the caret
    pub fn insert_text(&mut self, value: &str) -> bool {
        let Some(at) = self.collapse_for_insert() else {
            return false;
        };
        if self.is_text(at.node) {
            let text = self.text(at.node).unwrap_or_default().to_string();
            let (before, after) = split_at_char(&text, at.offset);
            self.set_text(at.node, &format!("{}{}{}", before, value, after));
            let offset = at.offset + value.chars().count();
            self.selection = Some(Selection::collapsed(Boundary::new(at.node, offset)));
            true
        } else {
            let node = self.create_text(value);
            self.insert_nodes(&[node])
        }
    }

    /// `delete`: remove the selection, or the character before the caret
    pub fn delete_backward(&mut self) -> bool {
        let Some(selection) = self.selection else {
            return false;
        };
        if !selection.is_collapsed() {
            return self.collapse_for_insert().is_some();
        }

        let at = selection.anchor;
        if at.offset == 0 || !self.is_text(at.node) {
            return false;
        }
        let text = self.text(at.node).unwrap_or_default().to_string();
        let (before, after) = split_at_char(&text, at.offset);
        let mut before: Vec<char> = before.chars().collect();
        before.pop();
        let joined: String = before.iter().collect::<String>() + &after;
        self.set_text(at.node, &joined);
        self.selection = Some(Selection::collapsed(Boundary::new(at.node, at.offset - 1)));
        true
    }

    /// `formatBlock`: make the caret's top-level block under `root` a `tag`.
    ///
    /// An empty `root` gets a fresh `<tag><br></tag>`. A caret in loose inline
    /// content directly under `root` wraps that inline run in a new block.
    /// An existing block of another kind is retagged.
    pub fn format_block(&mut self, root: NodeId, tag: &str) -> Option<NodeId> {
        let anchor = self.selection.as_ref()?.anchor;
        if !self.contains(root, anchor.node) {
            return None;
        }

        if self.children(root).is_empty() {
            let block = self.create_element(tag);
            let br = self.create_element("br");
            self.append_child(block, br);
            self.append_child(root, block);
            self.set_caret(block, 0);
            return Some(block);
        }

        let children = self.children(root).to_vec();
        let top_index = if anchor.node == root {
            anchor.offset.saturating_sub(1).min(children.len() - 1)
        } else {
            let mut top = anchor.node;
            while self.parent(top) != Some(root) {
                top = self.parent(top)?;
            }
            self.index_in_parent(top)?
        };

        let top = children[top_index];
        if self.is_block(top) {
            if self.tag_name(top) != Some(tag) {
                self.set_tag_name(top, tag);
            }
            return Some(top);
        }

        let mut start = top_index;
        while start > 0 && !self.is_block(children[start - 1]) {
            start -= 1;
        }
        let mut end = top_index;
        while end + 1 < children.len() && !self.is_block(children[end + 1]) {
            end += 1;
        }

        let block = self.create_element(tag);
        self.insert_at(root, start, block);
        for &node in &children[start..=end] {
            self.append_child(block, node);
        }

        if anchor.node == root {
            let offset = anchor.offset.saturating_sub(start).min(end - start + 1);
            self.set_caret(block, offset);
        }
        Some(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_doc(html: &str) -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.create_element("div");
        let body = doc.body();
        doc.append_child(body, root);
        doc.set_inner_html(root, html);
        (doc, root)
    }

    #[test]
    fn test_insert_text_into_text_node() {
        let (mut doc, root) = field_doc("helo");
        let text = doc.children(root)[0];
        doc.set_caret(text, 3);
        assert!(doc.insert_text("l"));
        assert_eq!(doc.inner_html(root), "hello");
        assert_eq!(doc.selection().unwrap().anchor, Boundary::new(text, 4));
    }

    #[test]
    fn test_insert_html_splits_text() {
        let (mut doc, root) = field_doc("ab");
        let text = doc.children(root)[0];
        doc.set_caret(text, 1);
        let inserted = doc.insert_html("<b>X</b>");
        assert_eq!(inserted.len(), 1);
        assert_eq!(doc.inner_html(root), "a<b>X</b>b");
    }

    #[test]
    fn test_insert_html_into_empty_element() {
        let (mut doc, root) = field_doc("");
        doc.set_caret(root, 0);
        doc.insert_html("<p>one</p><p>two</p>");
        assert_eq!(doc.inner_html(root), "<p>one</p><p>two</p>");
        assert_eq!(doc.selection().unwrap().anchor, Boundary::new(root, 2));
    }

    fn blocks(doc: &mut Document, html: &str) -> Vec<NodeId> {
        doc.parse_fragment(html)
    }

    #[test]
    fn test_insert_blocks_replaces_empty_paragraph() {
        let (mut doc, root) = field_doc("<p><br></p>");
        let p = doc.children(root)[0];
        doc.set_caret(p, 0);
        let new = blocks(&mut doc, "<p>one</p><p>two</p>");
        assert!(doc.insert_blocks(root, &new));
        assert_eq!(doc.inner_html(root), "<p>one</p><p>two</p>");

        let two = doc.children(new[1])[0];
        assert_eq!(doc.selection().unwrap().anchor, Boundary::new(two, 3));
    }

    #[test]
    fn test_insert_blocks_splits_paragraph_at_caret() {
        let (mut doc, root) = field_doc("<p>ab<b>cd</b></p><p>end</p>");
        let bold = doc.children(doc.children(root)[0])[1];
        let text = doc.children(bold)[0];
        doc.set_caret(text, 1);
        let new = blocks(&mut doc, "<p>X</p>");
        doc.insert_blocks(root, &new);
        assert_eq!(
            doc.inner_html(root),
            "<p>ab<b>c</b></p><p>X</p><p><b>d</b></p><p>end</p>"
        );
    }

    #[test]
    fn test_insert_blocks_splits_loose_text() {
        let (mut doc, root) = field_doc("abc");
        let text = doc.children(root)[0];
        doc.set_caret(text, 1);
        let new = blocks(&mut doc, "<p>X</p>");
        doc.insert_blocks(root, &new);
        assert_eq!(doc.inner_html(root), "a<p>X</p>bc");
    }

    #[test]
    fn test_insert_blocks_outside_root_is_ignored() {
        let (mut doc, root) = field_doc("<p>a</p>");
        let body = doc.body();
        doc.set_caret(body, 0);
        let new = blocks(&mut doc, "<p>X</p>");
        assert!(!doc.insert_blocks(root, &new));
        assert_eq!(doc.inner_html(root), "<p>a</p>");
    }

    #[test]
    fn test_insert_replaces_single_node_range() {
        let (mut doc, root) = field_doc("hello world");
        let text = doc.children(root)[0];
        doc.set_selection(Selection::new(Boundary::new(text, 6), Boundary::new(text, 11)));
        doc.insert_text("there");
        assert_eq!(doc.inner_html(root), "hello there");
    }

    #[test]
    fn test_delete_backward() {
        let (mut doc, root) = field_doc("abc");
        let text = doc.children(root)[0];
        doc.set_caret(text, 3);
        assert!(doc.delete_backward());
        assert_eq!(doc.inner_html(root), "ab");
        doc.set_caret(text, 0);
        assert!(!doc.delete_backward());
    }

    #[test]
    fn test_format_block_on_empty_root() {
        let (mut doc, root) = field_doc("");
        doc.set_caret(root, 0);
        let block = doc.format_block(root, "p").unwrap();
        assert_eq!(doc.inner_html(root), "<p><br></p>");
        assert_eq!(doc.selection().unwrap().anchor, Boundary::new(block, 0));
    }

    #[test]
    fn test_format_block_wraps_loose_inline_run() {
        let (mut doc, root) = field_doc("<p>first</p>loose <b>text</b>");
        let text = doc.children(root)[1];
        doc.set_caret(text, 2);
        let block = doc.format_block(root, "p").unwrap();
        assert_eq!(doc.inner_html(root), "<p>first</p><p>loose <b>text</b></p>");
        // Caret keeps pointing at the moved text node
        assert_eq!(doc.selection().unwrap().anchor, Boundary::new(text, 2));
        assert_eq!(doc.parent(text), Some(block));
    }

    #[test]
    fn test_format_block_retags_block() {
        let (mut doc, root) = field_doc("<h1>title</h1>");
        let h1 = doc.children(root)[0];
        let text = doc.children(h1)[0];
        doc.set_caret(text, 1);
        doc.format_block(root, "p");
        assert_eq!(doc.inner_html(root), "<p>title</p>");
    }

    #[test]
    fn test_format_block_outside_root_is_ignored() {
        let (mut doc, root) = field_doc("text");
        let body = doc.body();
        doc.set_caret(body, 0);
        assert!(doc.format_block(root, "p").is_none());
    }
}
