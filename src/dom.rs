//! Document tree – an owned arena of HTML nodes.
//!
//! Parsing is delegated to html5ever (via `markup5ever_rcdom`); the
//! reference-counted result is copied once into a [`Document`] whose nodes
//! live in a single `Vec` and refer to each other by [`NodeId`]. Edits then
//! rewire parent/child links in place. Detached nodes stay in the arena but
//! are unreachable from the root, so they never serialise.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

// ---------------------------------------------------------------------------
// DOM types
// ---------------------------------------------------------------------------

/// The tag name of an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Html,
    Head,
    Body,
    Div,
    Span,
    P,
    H1,
    H2,
    H3,
    Center,
    Section,
    Table,
    Img,
    Br,
    Hr,
    Meta,
    Link,
    Input,
    Script,
    Style,
    Pre,
    Textarea,
    /// Any other tag, stored lower-cased.
    Unknown(String),
}

impl Tag {
    pub fn from_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "html" => Tag::Html,
            "head" => Tag::Head,
            "body" => Tag::Body,
            "div" => Tag::Div,
            "span" => Tag::Span,
            "p" => Tag::P,
            "h1" => Tag::H1,
            "h2" => Tag::H2,
            "h3" => Tag::H3,
            "center" => Tag::Center,
            "section" => Tag::Section,
            "table" => Tag::Table,
            "img" => Tag::Img,
            "br" => Tag::Br,
            "hr" => Tag::Hr,
            "meta" => Tag::Meta,
            "link" => Tag::Link,
            "input" => Tag::Input,
            "script" => Tag::Script,
            "style" => Tag::Style,
            "pre" => Tag::Pre,
            "textarea" => Tag::Textarea,
            other => Tag::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Tag::Html => "html",
            Tag::Head => "head",
            Tag::Body => "body",
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::P => "p",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::Center => "center",
            Tag::Section => "section",
            Tag::Table => "table",
            Tag::Img => "img",
            Tag::Br => "br",
            Tag::Hr => "hr",
            Tag::Meta => "meta",
            Tag::Link => "link",
            Tag::Input => "input",
            Tag::Script => "script",
            Tag::Style => "style",
            Tag::Pre => "pre",
            Tag::Textarea => "textarea",
            Tag::Unknown(name) => name,
        }
    }

    /// Elements that never have children or a closing tag.
    pub fn is_void(&self) -> bool {
        matches!(
            self.as_str(),
            "area"
                | "base"
                | "br"
                | "col"
                | "embed"
                | "hr"
                | "img"
                | "input"
                | "link"
                | "meta"
                | "param"
                | "source"
                | "track"
                | "wbr"
        )
    }

    /// Elements whose content html5ever (scripting enabled) keeps as raw
    /// text, so it must not be HTML-escaped on output.
    pub fn is_raw_text(&self) -> bool {
        matches!(
            self.as_str(),
            "script" | "style" | "noscript" | "xmp" | "iframe" | "noembed" | "noframes"
        )
    }

    /// Elements whose whitespace is significant.
    pub fn is_preformatted(&self) -> bool {
        matches!(self, Tag::Pre | Tag::Textarea)
    }
}

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// The payload of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum DomNode {
    Document,
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    Element(ElementNode),
    Text(String),
    Comment(String),
}

/// An element: tag plus attributes in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub tag: Tag,
    pub attributes: Vec<(String, String)>,
}

impl ElementNode {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn classes(&self) -> Vec<&str> {
        self.attr("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: DomNode,
}

/// An owned HTML tree. Node 0 is the document root.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: DomNode::Document,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn data(&self, id: NodeId) -> &DomNode {
        &self.nodes[id.0].data
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementNode> {
        match self.data(id) {
            DomNode::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<&Tag> {
        self.element(id).map(|e| &e.tag)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Text of the node's first child, if that child is a text node.
    pub fn leading_text(&self, id: NodeId) -> Option<&str> {
        match self.children(id).first().map(|&c| self.data(c)) {
            Some(DomNode::Text(t)) => Some(t),
            _ => None,
        }
    }

    /// Whether the node is still reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut cur = id;
        while let Some(p) = self.parent(cur) {
            cur = p;
        }
        cur == self.root()
    }

    /// All nodes below `id` in document (pre-)order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    // -----------------------------------------------------------------------
    // Construction & mutation
    // -----------------------------------------------------------------------

    /// Allocate a detached node.
    pub fn create(&mut self, data: DomNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.create(DomNode::Text(text.to_string()))
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Unlink `id` (and its subtree) from its parent. No-op if already detached.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(p) = self.nodes[id.0].parent.take() {
            self.nodes[p.0].children.retain(|&c| c != id);
        }
    }

    /// Put `new` where `old` is and detach `old`. Returns false if `old` has no parent.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> bool {
        let Some(parent) = self.parent(old) else {
            return false;
        };
        self.detach(new);
        let siblings = &mut self.nodes[parent.0].children;
        if let Some(pos) = siblings.iter().position(|&c| c == old) {
            siblings[pos] = new;
        }
        self.nodes[old.0].parent = None;
        self.nodes[new.0].parent = Some(parent);
        true
    }

    /// Insert `nodes`, in order, directly after `sibling`. Returns false if
    /// `sibling` has no parent.
    pub fn insert_after(&mut self, sibling: NodeId, nodes: &[NodeId]) -> bool {
        let Some(parent) = self.parent(sibling) else {
            return false;
        };
        for &n in nodes {
            self.detach(n);
        }
        let siblings = &mut self.nodes[parent.0].children;
        let pos = siblings
            .iter()
            .position(|&c| c == sibling)
            .map_or(siblings.len(), |p| p + 1);
        siblings.splice(pos..pos, nodes.iter().copied());
        for &n in nodes {
            self.nodes[n.0].parent = Some(parent);
        }
        true
    }

    /// Deep-copy the subtree at `id` of `other` into this document, detached.
    pub fn import(&mut self, other: &Document, id: NodeId) -> NodeId {
        let copy = self.create(other.data(id).clone());
        for &child in other.children(id) {
            let c = self.import(other, child);
            self.append_child(copy, c);
        }
        copy
    }
}

// ---------------------------------------------------------------------------
// Parser – html5ever into the arena
// ---------------------------------------------------------------------------

/// Parse an HTML string into a [`Document`].
///
/// html5ever never rejects input: malformed markup is repaired the way a
/// browser would, adding `html`/`head`/`body` when they are missing.
pub fn parse_html(html: &str) -> Document {
    let rc = parse_document(RcDom::default(), Default::default()).one(html);
    let mut doc = Document::new();
    let root = doc.root();
    for child in rc.document.children.borrow().iter() {
        copy_rc_node(&mut doc, root, child);
    }
    doc
}

fn copy_rc_node(doc: &mut Document, parent: NodeId, handle: &Handle) {
    let data = match &handle.data {
        NodeData::Document | NodeData::ProcessingInstruction { .. } => return,
        NodeData::Doctype {
            name,
            public_id,
            system_id,
        } => DomNode::Doctype {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        },
        NodeData::Text { contents } => {
            let text: &str = &contents.borrow();
            DomNode::Text(text.to_owned())
        }
        NodeData::Comment { contents } => DomNode::Comment(contents.to_string()),
        NodeData::Element { name, attrs, .. } => {
            let attributes = attrs
                .borrow()
                .iter()
                .map(|a| {
                    let key = match &a.name.prefix {
                        Some(prefix) => format!("{}:{}", prefix, a.name.local),
                        None => a.name.local.to_string(),
                    };
                    (key, a.value.to_string())
                })
                .collect();
            DomNode::Element(ElementNode {
                tag: Tag::from_str(&name.local),
                attributes,
            })
        }
    };
    let id = doc.create(data);
    doc.append_child(parent, id);
    for child in handle.children.borrow().iter() {
        copy_rc_node(doc, id, child);
    }
}

// ---------------------------------------------------------------------------
// Convenience helpers
// ---------------------------------------------------------------------------

/// Top-level content of a parsed fragment: the children of `<head>` followed
/// by the children of `<body>`.
pub fn fragment_roots(doc: &Document) -> Vec<NodeId> {
    let mut out = Vec::new();
    for &html in doc.children(doc.root()) {
        if doc.tag(html) != Some(&Tag::Html) {
            continue;
        }
        for &part in doc.children(html) {
            if matches!(doc.tag(part), Some(Tag::Head) | Some(Tag::Body)) {
                out.extend_from_slice(doc.children(part));
            }
        }
    }
    out
}
