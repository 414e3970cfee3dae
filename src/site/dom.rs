//! Minimal element tree the wiring runs against.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Event bindings are
//! plain data attached to nodes, so a page can be inspected after wiring and
//! events replayed through [`Document::dispatch`].

use std::collections::{BTreeMap, HashMap};

use crate::models::ServiceDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    /// Inline `style` declarations.
    pub style: BTreeMap<String, String>,
    /// Background image applied through stylesheets rather than inline style.
    pub computed_background: Option<String>,
    pub text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn img(src: &str) -> Self {
        Self::new("img").with_attr("src", src)
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.style.insert(property.to_string(), value.to_string());
        self
    }

    pub fn with_computed_background(mut self, css: &str) -> Self {
        self.computed_background = Some(css.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Matches a single `.class` or `tag` selector.
    pub fn matches(&self, selector: &str) -> bool {
        match selector.strip_prefix('.') {
            Some(class) => self.has_class(class),
            None => self.tag.eq_ignore_ascii_case(selector),
        }
    }

    pub fn matches_any(&self, selectors: &[&str]) -> bool {
        selectors.iter().any(|s| self.matches(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Click,
    /// Enter or Space while focused.
    Activate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub trigger: Trigger,
    pub service: ServiceDescriptor,
    /// Ignore events whose target sits inside a nested button or link.
    pub skip_nested_controls: bool,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    head: NodeId,
    body: NodeId,
    bindings: HashMap<NodeId, Vec<Binding>>,
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Element::new("html")],
            head: NodeId(0),
            body: NodeId(0),
            bindings: HashMap::new(),
        };
        let root = NodeId(0);
        doc.head = doc.append(root, Element::new("head"));
        doc.body = doc.append(root, Element::new("body"));
        doc
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn get(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn append(&mut self, parent: NodeId, mut element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        element.parent = Some(parent);
        element.children.clear();
        self.nodes.push(element);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Creates a detached element; attach it with [`Document::insert_before`].
    pub fn create(&mut self, mut element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        element.parent = None;
        element.children.clear();
        self.nodes.push(element);
        id
    }

    /// Moves `node` under `parent`, directly before `reference`, or at the
    /// end when `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, node: NodeId, reference: NodeId) {
        self.detach(node);
        let siblings = &mut self.nodes[parent.0].children;
        match siblings.iter().position(|c| *c == reference) {
            Some(pos) => siblings.insert(pos, node),
            None => siblings.push(node),
        }
        self.nodes[node.0].parent = Some(parent);
    }

    /// Moves `node` to the end of `parent`'s children.
    pub fn append_existing(&mut self, parent: NodeId, node: NodeId) {
        self.detach(node);
        self.nodes[parent.0].children.push(node);
        self.nodes[node.0].parent = Some(parent);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(old) = self.nodes[node.0].parent.take() {
            self.nodes[old.0].children.retain(|c| *c != node);
        }
    }

    /// Attached elements in document order.
    pub fn elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev());
        }
        out
    }

    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements()
            .into_iter()
            .find(|n| self.get(*n).id.as_deref() == Some(id))
    }

    /// Nearest inclusive ancestor matching any of `selectors`.
    pub fn closest(&self, node: NodeId, selectors: &[&str]) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.get(id).matches_any(selectors) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    pub fn has_descendant(&self, node: NodeId, selector: &str) -> bool {
        let mut stack: Vec<NodeId> = self.children(node).to_vec();
        while let Some(id) = stack.pop() {
            if self.get(id).matches(selector) {
                return true;
            }
            stack.extend_from_slice(self.children(id));
        }
        false
    }

    pub fn bind(&mut self, node: NodeId, binding: Binding) {
        self.bindings.entry(node).or_default().push(binding);
    }

    pub fn bindings(&self, node: NodeId) -> &[Binding] {
        self.bindings.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Bubbles an event from `target` to the first node listening for it.
    pub fn dispatch(&self, target: NodeId, trigger: Trigger) -> Option<(NodeId, &Binding)> {
        let mut current = Some(target);
        while let Some(id) = current {
            if let Some(binding) = self.bindings(id).iter().find(|b| b.trigger == trigger) {
                return Some((id, binding));
            }
            current = self.parent(id);
        }
        None
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
