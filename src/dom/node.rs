//! Node arena and tree operations for the headless document

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::geometry::Size;
use super::selection::Selection;

/// Identifies a node inside one [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(super) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tags that start a new line when rendered and count as block containers
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "div",
    "dl",
    "fieldset",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tr",
    "ul",
];

#[derive(Debug, Clone)]
pub(super) enum NodeData {
    Element {
        tag: String,
        attributes: IndexMap<String, String>,
        size: Size,
    },
    Text(String),
}

#[derive(Debug, Clone)]
pub(super) struct Node {
    pub(super) data: NodeData,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

/// An in-memory document tree standing in for the browser DOM.
///
/// Nodes live in an arena and are never freed; a removed node simply has no
/// parent. The `body` element is the root every connected node hangs off.
#[derive(Debug, Clone)]
pub struct Document {
    pub(super) nodes: Vec<Node>,
    pub(super) body: NodeId,
    pub(super) selection: Option<Selection>,
    pub(super) scroll_y: f64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            body: NodeId(0),
            selection: None,
            scroll_y: 0.0,
        };
        doc.body = doc.create_element("body");
        doc
    }

    /// Build a document whose body holds the parsed `html`
    pub fn from_html(html: &str) -> Self {
        let mut doc = Self::new();
        let body = doc.body;
        doc.set_inner_html(body, html);
        doc
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub(super) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(super) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: IndexMap::new(),
            size: Size::default(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    // ------------------------------------------------------------------
    // Node inspection
    // ------------------------------------------------------------------

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).data, NodeData::Element { .. })
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.node(id).data, NodeData::Text(_))
    }

    /// Lowercase tag name, `None` for text nodes
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Element { tag, .. } => Some(tag.as_str()),
            NodeData::Text(_) => None,
        }
    }

    pub(crate) fn set_tag_name(&mut self, id: NodeId, new_tag: &str) {
        if let NodeData::Element { tag, .. } = &mut self.node_mut(id).data {
            *tag = new_tag.to_ascii_lowercase();
        }
    }

    /// True for elements whose tag is a block container
    pub fn is_block(&self, id: NodeId) -> bool {
        self.tag_name(id)
            .map(|tag| BLOCK_ELEMENTS.contains(&tag))
            .unwrap_or(false)
    }

    /// Text of a text node, `None` for elements
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Text(text) => Some(text.as_str()),
            NodeData::Element { .. } => None,
        }
    }

    pub fn set_text(&mut self, id: NodeId, value: &str) {
        if let NodeData::Text(text) = &mut self.node_mut(id).data {
            *text = value.to_string();
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Child elements only, skipping text nodes (the DOM `children` list)
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .children
            .iter()
            .copied()
            .filter(|&child| self.is_element(child))
            .collect()
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        self.children(parent).get(index + 1).copied()
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        index
            .checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
    }

    /// Inclusive ancestor test: a node contains itself
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether the node is attached under `body`
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.body, id)
    }

    /// First connected element whose `id` attribute equals `value`
    pub fn element_by_id(&self, value: &str) -> Option<NodeId> {
        let mut stack = vec![self.body];
        while let Some(id) = stack.pop() {
            if self.attribute(id, "id") == Some(value) {
                return Some(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        None
    }

    // ------------------------------------------------------------------
    // Tree mutation
    // ------------------------------------------------------------------

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Insert `child` before `reference` under `parent`.
    ///
    /// A missing reference, or one that is not a child of `parent`, appends.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if reference == Some(child) {
            return;
        }
        self.detach(child);
        let index = reference
            .and_then(|r| self.children(parent).iter().position(|&c| c == r))
            .unwrap_or(self.children(parent).len());
        self.insert_at(parent, index, child);
    }

    pub fn insert_at(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let children = &mut self.node_mut(parent).children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Remove `child` from `parent`; returns false when it was not attached there
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.parent(child) != Some(parent) {
            return false;
        }
        self.detach(child);
        true
    }

    /// Detach a node from wherever it is attached
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|&c| c != id);
            self.node_mut(id).parent = None;
        }
    }

    /// Detach every child of `id`
    pub fn clear_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.node_mut(child).parent = None;
        }
    }

    // ------------------------------------------------------------------
    // Attributes, classes, style, size
    // ------------------------------------------------------------------

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            NodeData::Text(_) => None,
        }
    }

    pub fn attributes(&self, id: NodeId) -> Vec<(&str, &str)> {
        match &self.node(id).data {
            NodeData::Element { attributes, .. } => attributes
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect(),
            NodeData::Text(_) => Vec::new(),
        }
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attributes, .. } = &mut self.node_mut(id).data {
            attributes.insert(name.to_ascii_lowercase(), value.to_string());
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let NodeData::Element { attributes, .. } = &mut self.node_mut(id).data {
            attributes.shift_remove(name);
        }
    }

    pub fn classes(&self, id: NodeId) -> Vec<&str> {
        self.attribute(id, "class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).contains(&class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.has_class(id, class) || !self.is_element(id) {
            return;
        }
        let mut classes: Vec<String> = self.classes(id).into_iter().map(String::from).collect();
        classes.push(class.to_string());
        self.set_attribute(id, "class", &classes.join(" "));
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class) {
            return;
        }
        let classes: Vec<String> = self
            .classes(id)
            .into_iter()
            .filter(|c| *c != class)
            .map(String::from)
            .collect();
        if classes.is_empty() {
            self.remove_attribute(id, "class");
        } else {
            self.set_attribute(id, "class", &classes.join(" "));
        }
    }

    /// Inline style property value (`style="top: 10px"` → `style(id, "top")`)
    pub fn style(&self, id: NodeId, property: &str) -> Option<String> {
        self.style_map(id).get(property).cloned()
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        let mut styles = self.style_map(id);
        styles.insert(property.to_string(), value.to_string());
        let serialized = styles
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; ");
        self.set_attribute(id, "style", &serialized);
    }

    fn style_map(&self, id: NodeId) -> IndexMap<String, String> {
        self.attribute(id, "style")
            .map(|style| {
                style
                    .split(';')
                    .filter_map(|decl| {
                        let (k, v) = decl.split_once(':')?;
                        let key = k.trim();
                        (!key.is_empty()).then(|| (key.to_string(), v.trim().to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Host-measured size of an element
    pub fn size(&self, id: NodeId) -> Size {
        match &self.node(id).data {
            NodeData::Element { size, .. } => *size,
            NodeData::Text(_) => Size::default(),
        }
    }

    pub fn set_size(&mut self, id: NodeId, new_size: Size) {
        if let NodeData::Element { size, .. } = &mut self.node_mut(id).data {
            *size = new_size;
        }
    }

    // ------------------------------------------------------------------
    // Text extraction
    // ------------------------------------------------------------------

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.node(id).data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Element { .. } => {
                for &child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Rendered text: block boundaries and `<br>` become line breaks
    pub fn inner_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.render_text(child, &mut out);
        }
        while out.ends_with('\n') {
            out.pop();
        }
        out
    }

    fn render_text(&self, id: NodeId, out: &mut String) {
        match &self.node(id).data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Element { tag, .. } if tag == "br" => out.push('\n'),
            NodeData::Element { .. } => {
                let block = self.is_block(id);
                if block && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                for &child in self.children(id) {
                    self.render_text(child, out);
                }
                if block && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Page state
    // ------------------------------------------------------------------

    /// Vertical page scroll offset (`window.pageYOffset`)
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn set_scroll_y(&mut self, value: f64) {
        self.scroll_y = value;
    }
}
