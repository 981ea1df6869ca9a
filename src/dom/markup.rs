//! Markup parsing and serialization (`innerHTML` semantics)
//!
//! Parsing goes through `scraper` (html5ever tree building in a `<body>`
//! context), so implied end tags behave like a browser. The parsed tree is
//! copied into the arena.

use scraper::{Html, Node};

use super::node::{Document, NodeData, NodeId};

/// Elements that never have children and serialize without an end tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Escape text content the way `innerHTML` serializes it
pub fn escape_text(text: &str) -> String {
    html_escape::encode_text(text).replace('\u{a0}', "&nbsp;")
}

impl Document {
    /// Parse `html` into detached nodes, returning the top-level ones in order.
    /// Comments, doctypes and processing instructions are dropped.
    pub fn parse_fragment(&mut self, html: &str) -> Vec<NodeId> {
        let fragment = Html::parse_fragment(html);
        let mut roots = Vec::new();
        let mut pending: Vec<_> = fragment
            .root_element()
            .children()
            .map(|child| (child, None))
            .collect();
        pending.reverse();

        while let Some((source, parent)) = pending.pop() {
            let node = match source.value() {
                Node::Text(text) => self.create_text(text),
                Node::Element(element) => {
                    let node = self.create_element(element.name());
                    for (name, value) in element.attrs() {
                        self.set_attribute(node, name, value);
                    }
                    node
                }
                _ => continue,
            };
            match parent {
                Some(parent) => self.append_child(parent, node),
                None => roots.push(node),
            }
            let children: Vec<_> = source.children().map(|child| (child, Some(node))).collect();
            pending.extend(children.into_iter().rev());
        }
        roots
    }

    /// Serialized markup of the node's children
    pub fn inner_html(&self, id: NodeId) -> String {
        self.inner_html_excluding(id, &[])
    }

    /// Serialized markup of the node's children, leaving out the `skip` subtrees
    pub fn inner_html_excluding(&self, id: NodeId, skip: &[NodeId]) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.serialize(child, skip, &mut out);
        }
        out
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.serialize(id, &[], &mut out);
        out
    }

    /// Replace all children of `id` with the parsed `html`
    pub fn set_inner_html(&mut self, id: NodeId, html: &str) {
        self.clear_children(id);
        for node in self.parse_fragment(html) {
            self.append_child(id, node);
        }
    }

    fn serialize(&self, id: NodeId, skip: &[NodeId], out: &mut String) {
        if skip.contains(&id) {
            return;
        }
        match &self.node(id).data {
            NodeData::Text(text) => out.push_str(&escape_text(text)),
            NodeData::Element {
                tag, attributes, ..
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(value));
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for &child in self.children(id) {
                    self.serialize(child, skip, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}
