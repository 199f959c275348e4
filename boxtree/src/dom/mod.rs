//! The document tree.
//!
//! Nodes live in an arena owned by the `Document` and refer to each other by
//! `NodeId`. Children are owned lists of ids; the parent link is only a
//! back-reference for lookups.

pub mod builder;

use crate::allocator::Allocator;
use crate::html::Attribute;
use crate::misc::print_tree::PrintTree;
use crate::style::{ComputedStyle, ResolvedStyle};
use app_units::Au;
use std::io::{self, Write};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Lower-cased tag name.
    pub name: String,
    pub attributes: Vec<Attribute>,
    /// The raw cascade, as of the moment the element was created.
    pub computed_style: ComputedStyle,
    pub resolved_style: ResolvedStyle,
}

impl ElementData {
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
            computed_style: ComputedStyle::default(),
            resolved_style: ResolvedStyle::default(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| &*a.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub data: NodeData,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match self.data {
            NodeData::Element(ref element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match self.data {
            NodeData::Element(ref mut element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self.data {
            NodeData::Text(ref text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Document {
    nodes: Allocator<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut nodes = Allocator::default();
        let root = NodeId(nodes.allocate(Node {
            parent: None,
            children: Vec::new(),
            data: NodeData::Document,
        }));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The number of nodes, the root included. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Creates a node as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.allocate(Node {
            parent: Some(parent),
            children: Vec::new(),
            data,
        }));
        self[parent].children.push(id);
        id
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.nodes.get(id.0).and_then(Node::as_element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id.0).and_then(Node::as_element_mut)
    }

    /// The concatenation of the text of the descendants of `id`, in tree
    /// order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        self.collect_text(id, &mut text);
        text
    }

    fn collect_text(&self, id: NodeId, text: &mut String) {
        let node = &self[id];
        if let Some(t) = node.as_text() {
            text.push_str(t);
        }
        for &child in node.children() {
            self.collect_text(child, text);
        }
    }

    /// All the elements, in creation order (which is tree order).
    pub fn elements(&self) -> impl Iterator<Item = (NodeId, &ElementData)> {
        self.nodes
            .iter()
            .filter_map(|(i, node)| node.as_element().map(|e| (NodeId(i), e)))
    }

    /// The element children of `id`.
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self[id]
            .children()
            .iter()
            .cloned()
            .filter(move |&child| self[child].as_element().is_some())
    }

    /// The first element in tree order with the given `id` attribute.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements()
            .find(|(_, e)| e.attribute("id") == Some(id))
            .map(|(node, _)| node)
    }
}

impl ::std::ops::Index<NodeId> for Document {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl ::std::ops::IndexMut<NodeId> for Document {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

fn element_title(element: &ElementData) -> String {
    let mut title = format!("<{}", element.name);
    for attribute in &element.attributes {
        title.push_str(&format!(" {}={:?}", attribute.name, attribute.value));
    }
    title.push('>');
    title
}

fn print_node(document: &Document, id: NodeId, print: &mut PrintTree) {
    let node = &document[id];
    print.new_level(match node.data {
        NodeData::Document => "#document".into(),
        NodeData::Text(ref text) => format!("#text {:?}", text),
        NodeData::Element(ref element) => element_title(element),
    });
    for &child in node.children() {
        print_node(document, child, print);
    }
    print.end_level();
}

/// Prints the dom to a particular output.
pub fn print_dom_to(document: &Document, dest: &mut dyn Write) -> io::Result<()> {
    let mut tree = PrintTree::new("DOM tree", dest);
    print_node(document, document.root(), &mut tree);
    tree.finish()
}

/// Prints the cascade of every element, with the specificity each value won
/// with.
pub fn print_styles_to(document: &Document, dest: &mut dyn Write) -> io::Result<()> {
    let mut tree = PrintTree::new("Computed styles", dest);
    for (_, element) in document.elements() {
        tree.new_level(element_title(element));
        for (property, cascaded) in element.computed_style.iter() {
            tree.add_item(format!(
                "{}: {} {}",
                property, cascaded.value, cascaded.specificity
            ));
        }
        tree.end_level();
    }
    tree.finish()
}

fn format_length(length: Option<Au>) -> String {
    match length {
        Some(au) => format!("{}", au.to_f32_px()),
        None => "auto".into(),
    }
}

fn print_geometry(document: &Document, id: NodeId, print: &mut PrintTree) {
    let element = match document[id].as_element() {
        Some(e) => e,
        None => return,
    };
    let resolved = &element.resolved_style;
    let mut title = format!(
        "<{}> size={}x{}",
        element.name,
        format_length(resolved.width),
        format_length(resolved.height)
    );
    if let Some(rect) = resolved.border_box() {
        title.push_str(&format!(
            " box=({}, {})-({}, {})",
            rect.min.x.to_f32_px(),
            rect.min.y.to_f32_px(),
            rect.max.x.to_f32_px(),
            rect.max.y.to_f32_px()
        ));
    }
    print.new_level(title);
    for child in document.child_elements(id) {
        print_geometry(document, child, print);
    }
    print.end_level();
}

/// Prints the resolved geometry of every element.
pub fn print_layout_to(document: &Document, dest: &mut dyn Write) -> io::Result<()> {
    let mut tree = PrintTree::new("Layout", dest);
    for child in document.child_elements(document.root()) {
        print_geometry(document, child, &mut tree);
    }
    tree.finish()
}
