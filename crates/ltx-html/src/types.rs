//! Core types for source-tracked HTML trees.

use ltx_error_reporting::SourceSpan;

use crate::text;

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose body is kept verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements whose end tag HTML allows to be omitted.
const OPTIONAL_END_ELEMENTS: &[&str] = &[
    "body", "colgroup", "dd", "dt", "head", "html", "li", "option", "p", "rp", "rt", "tbody",
    "td", "tfoot", "th", "thead", "tr",
];

pub(crate) fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

pub(crate) fn is_raw_text_element(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&name)
}

pub(crate) fn has_optional_end_tag(name: &str) -> bool {
    OPTIONAL_END_ELEMENTS.contains(&name)
}

/// A parsed HTML document (or fragment).
///
/// HTML documents have a doctype and whitespace next to the root element, so
/// the top level is a list of nodes rather than a single root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlDocument {
    pub nodes: Vec<HtmlNode>,

    /// Span of the entire input.
    pub source_span: SourceSpan,
}

/// One node of the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    Element(HtmlElement),

    /// Text in markup form: entities are kept as written.
    Text { raw: String, source_span: SourceSpan },

    /// A comment, including its `<!--` and `-->` delimiters.
    Comment { raw: String, source_span: SourceSpan },

    /// A doctype, XML declaration or processing instruction, verbatim.
    Declaration { raw: String, source_span: SourceSpan },
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlElement {
    /// Lower-cased tag name.
    pub name: String,

    /// Attributes in source order.
    pub attributes: Vec<HtmlAttribute>,

    pub children: Vec<HtmlNode>,

    /// Written as `<name/>` in the source. Kept so MathML and SVG leaves
    /// serialize the way they were read.
    pub self_closing: bool,

    /// From the `<` of the start tag to the `>` of the end tag.
    pub source_span: SourceSpan,
}

/// An attribute with its decoded value.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlAttribute {
    pub name: String,

    /// The value after entity decoding. Valueless attributes have an empty value.
    pub value: String,

    pub source_span: SourceSpan,
}

/// Child-index path from the document's top-level node list down to a node.
///
/// Paths index nodes, not just elements, so text nodes count. Removing or
/// inserting a node invalidates the paths of its later siblings and their
/// descendants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path to a top-level node.
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Path to the `index`-th child of this node.
    pub fn child(&self, index: usize) -> NodePath {
        let mut indices = self.0.clone();
        indices.push(index);
        NodePath(indices)
    }

    pub fn parent(&self) -> Option<NodePath> {
        if self.0.len() <= 1 {
            return None;
        }
        Some(NodePath(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Index of this node within its parent.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Is `self` equal to `other` or one of its ancestors?
    pub fn contains(&self, other: &NodePath) -> bool {
        other.0.starts_with(&self.0)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl HtmlNode {
    /// A text node from plain text (escaped on the way in).
    pub fn text(content: &str) -> Self {
        HtmlNode::Text {
            raw: text::escape_text(content).into_owned(),
            source_span: SourceSpan::synthetic(),
        }
    }

    /// A text node written out exactly as given.
    pub fn raw_text(markup: impl Into<String>) -> Self {
        HtmlNode::Text {
            raw: markup.into(),
            source_span: SourceSpan::synthetic(),
        }
    }

    pub fn as_element(&self) -> Option<&HtmlElement> {
        match self {
            HtmlNode::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut HtmlElement> {
        match self {
            HtmlNode::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn source_span(&self) -> SourceSpan {
        match self {
            HtmlNode::Element(element) => element.source_span,
            HtmlNode::Text { source_span, .. }
            | HtmlNode::Comment { source_span, .. }
            | HtmlNode::Declaration { source_span, .. } => *source_span,
        }
    }

    /// Is this a text node containing only whitespace?
    pub fn is_whitespace(&self) -> bool {
        matches!(self, HtmlNode::Text { raw, .. } if raw.trim().is_empty())
    }

    fn push_text_content(&self, out: &mut String) {
        match self {
            HtmlNode::Element(element) => {
                for child in &element.children {
                    child.push_text_content(out);
                }
            }
            HtmlNode::Text { raw, .. } => out.push_str(&text::decode(raw)),
            HtmlNode::Comment { .. } | HtmlNode::Declaration { .. } => {}
        }
    }
}

impl From<HtmlElement> for HtmlNode {
    fn from(element: HtmlElement) -> Self {
        HtmlNode::Element(element)
    }
}

impl HtmlElement {
    /// Create a new element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: false,
            source_span: SourceSpan::synthetic(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Append a text child (escaped).
    pub fn with_text(mut self, content: &str) -> Self {
        self.children.push(HtmlNode::text(content));
        self
    }

    pub fn with_child(mut self, child: impl Into<HtmlNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = HtmlNode>) -> Self {
        self.children.extend(children);
        self
    }

    // Attributes

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Get an attribute by name, including its source span.
    pub fn get_attribute_full(&self, name: &str) -> Option<&HtmlAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Set an attribute, replacing the value in place if it exists.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(HtmlAttribute {
                name: name.to_ascii_lowercase(),
                value,
                source_span: SourceSpan::synthetic(),
            }),
        }
    }

    /// Remove an attribute, returning its value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(index).value)
    }

    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get_attribute("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let classes = match self.get_attribute("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attribute("class", classes);
    }

    // Children

    pub fn is_void(&self) -> bool {
        is_void_element(&self.name)
    }

    /// Child elements, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &HtmlElement> {
        self.children.iter().filter_map(HtmlNode::as_element)
    }

    pub fn append_child(&mut self, child: impl Into<HtmlNode>) {
        self.children.push(child.into());
    }

    /// Insert a child at `index`, clamped to the number of children.
    pub fn insert_child(&mut self, index: usize, child: impl Into<HtmlNode>) {
        let index = index.min(self.children.len());
        self.children.insert(index, child.into());
    }

    /// Replace all children, returning the old ones.
    pub fn replace_children(&mut self, children: Vec<HtmlNode>) -> Vec<HtmlNode> {
        std::mem::replace(&mut self.children, children)
    }

    /// Index in `children` of the `n`-th child element.
    pub fn element_child_index(&self, n: usize) -> Option<usize> {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, child)| matches!(child, HtmlNode::Element(_)))
            .nth(n)
            .map(|(index, _)| index)
    }

    /// Decoded text of all descendant text nodes, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.push_text_content(&mut out);
        }
        out
    }

    // Focus

    /// Can this element receive keyboard focus?
    ///
    /// Follows the browser defaults: links with an `href`, enabled form
    /// controls, and anything with a non-negative `tabindex`. `tabindex="-1"`
    /// and `hidden` remove an element from the tab order.
    pub fn is_focusable(&self) -> bool {
        if self.has_attribute("hidden") {
            return false;
        }
        if let Some(tabindex) = self.get_attribute("tabindex") {
            if let Ok(index) = tabindex.trim().parse::<i32>() {
                return index >= 0;
            }
        }
        match self.name.as_str() {
            "a" | "area" => self.has_attribute("href"),
            "button" | "input" | "select" | "textarea" => !self.has_attribute("disabled"),
            _ => false,
        }
    }

    /// Paths (relative to this element) of focusable descendants in tab order.
    ///
    /// Hidden subtrees are skipped entirely.
    pub fn focusable_descendants(&self) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        collect_focusable(&self.children, &mut prefix, &mut out);
        out
    }

    // Search

    /// First descendant element (pre-order, excluding `self`) matching `pred`.
    pub fn find(&self, pred: impl Fn(&HtmlElement) -> bool) -> Option<&HtmlElement> {
        find_in(&self.children, &pred)
    }

    /// Relative path to the first descendant matching `pred`.
    pub fn find_relative_path(&self, pred: impl Fn(&HtmlElement) -> bool) -> Option<Vec<usize>> {
        let mut prefix = Vec::new();
        find_path_in(&self.children, &pred, &mut prefix)
    }

    /// Descendant at a relative path (as produced by [`focusable_descendants`](Self::focusable_descendants)).
    pub fn descendant_at(&self, relative: &[usize]) -> Option<&HtmlElement> {
        let (first, rest) = relative.split_first()?;
        let child = self.children.get(*first)?.as_element()?;
        if rest.is_empty() {
            Some(child)
        } else {
            child.descendant_at(rest)
        }
    }

    fn descendant_at_mut(&mut self, relative: &[usize]) -> Option<&mut HtmlElement> {
        let (first, rest) = relative.split_first()?;
        let child = self.children.get_mut(*first)?.as_element_mut()?;
        if rest.is_empty() {
            Some(child)
        } else {
            child.descendant_at_mut(rest)
        }
    }

    /// Call `f` on this element and every descendant element, pre-order.
    pub fn for_each_element_mut(&mut self, f: &mut dyn FnMut(&mut HtmlElement)) {
        f(self);
        for child in &mut self.children {
            if let HtmlNode::Element(element) = child {
                element.for_each_element_mut(f);
            }
        }
    }
}

fn collect_focusable(children: &[HtmlNode], prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    for (index, child) in children.iter().enumerate() {
        let HtmlNode::Element(element) = child else {
            continue;
        };
        if element.has_attribute("hidden") {
            continue;
        }
        prefix.push(index);
        if element.is_focusable() {
            out.push(prefix.clone());
        }
        collect_focusable(&element.children, prefix, out);
        prefix.pop();
    }
}

fn find_in<'a>(
    nodes: &'a [HtmlNode],
    pred: &dyn Fn(&HtmlElement) -> bool,
) -> Option<&'a HtmlElement> {
    for node in nodes {
        if let HtmlNode::Element(element) = node {
            if pred(element) {
                return Some(element);
            }
            if let Some(found) = find_in(&element.children, pred) {
                return Some(found);
            }
        }
    }
    None
}

fn find_path_in(
    nodes: &[HtmlNode],
    pred: &dyn Fn(&HtmlElement) -> bool,
    prefix: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    for (index, node) in nodes.iter().enumerate() {
        if let HtmlNode::Element(element) = node {
            prefix.push(index);
            if pred(element) {
                return Some(prefix.clone());
            }
            if let Some(found) = find_path_in(&element.children, pred, prefix) {
                return Some(found);
            }
            prefix.pop();
        }
    }
    None
}

fn collect_paths(
    nodes: &[HtmlNode],
    pred: &dyn Fn(&HtmlElement) -> bool,
    prefix: &mut Vec<usize>,
    out: &mut Vec<NodePath>,
) {
    for (index, node) in nodes.iter().enumerate() {
        if let HtmlNode::Element(element) = node {
            prefix.push(index);
            if pred(element) {
                out.push(NodePath(prefix.clone()));
            }
            collect_paths(&element.children, pred, prefix, out);
            prefix.pop();
        }
    }
}

impl HtmlDocument {
    pub fn new(nodes: Vec<HtmlNode>) -> Self {
        Self {
            nodes,
            source_span: SourceSpan::synthetic(),
        }
    }

    /// First element in document order matching `pred`.
    pub fn find(&self, pred: impl Fn(&HtmlElement) -> bool) -> Option<&HtmlElement> {
        find_in(&self.nodes, &pred)
    }

    /// Path of the first element in document order matching `pred`.
    pub fn find_path(&self, pred: impl Fn(&HtmlElement) -> bool) -> Option<NodePath> {
        let mut prefix = Vec::new();
        find_path_in(&self.nodes, &pred, &mut prefix).map(NodePath)
    }

    /// Paths of every element matching `pred`, in document order.
    ///
    /// Nested matches are included after their ancestors.
    pub fn find_all_paths(&self, pred: impl Fn(&HtmlElement) -> bool) -> Vec<NodePath> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        collect_paths(&self.nodes, &pred, &mut prefix, &mut out);
        out
    }

    pub fn find_by_id(&self, id: &str) -> Option<&HtmlElement> {
        self.find(|e| e.id() == Some(id))
    }

    pub fn find_path_by_id(&self, id: &str) -> Option<NodePath> {
        self.find_path(|e| e.id() == Some(id))
    }

    /// Path of the first element with tag `name`.
    pub fn find_path_by_tag(&self, name: &str) -> Option<NodePath> {
        self.find_path(|e| e.name == name)
    }

    pub fn body_path(&self) -> Option<NodePath> {
        self.find_path_by_tag("body")
    }

    pub fn head_path(&self) -> Option<NodePath> {
        self.find_path_by_tag("head")
    }

    pub fn node_at(&self, path: &NodePath) -> Option<&HtmlNode> {
        let (first, rest) = path.0.split_first()?;
        let mut node = self.nodes.get(*first)?;
        for index in rest {
            node = node.as_element()?.children.get(*index)?;
        }
        Some(node)
    }

    pub fn node_at_mut(&mut self, path: &NodePath) -> Option<&mut HtmlNode> {
        let (first, rest) = path.0.split_first()?;
        let mut node = self.nodes.get_mut(*first)?;
        for index in rest {
            node = node.as_element_mut()?.children.get_mut(*index)?;
        }
        Some(node)
    }

    pub fn element_at(&self, path: &NodePath) -> Option<&HtmlElement> {
        self.node_at(path)?.as_element()
    }

    pub fn element_at_mut(&mut self, path: &NodePath) -> Option<&mut HtmlElement> {
        self.node_at_mut(path)?.as_element_mut()
    }

    /// Element at `base` followed by a relative path below it.
    pub fn descendant_at(&self, base: &NodePath, relative: &[usize]) -> Option<&HtmlElement> {
        let element = self.element_at(base)?;
        if relative.is_empty() {
            return Some(element);
        }
        element.descendant_at(relative)
    }

    pub fn descendant_at_mut(
        &mut self,
        base: &NodePath,
        relative: &[usize],
    ) -> Option<&mut HtmlElement> {
        let element = self.element_at_mut(base)?;
        if relative.is_empty() {
            return Some(element);
        }
        element.descendant_at_mut(relative)
    }

    fn siblings_mut(&mut self, path: &NodePath) -> Option<(&mut Vec<HtmlNode>, usize)> {
        let index = path.last()?;
        let siblings = match path.parent() {
            Some(parent) => &mut self.element_at_mut(&parent)?.children,
            None => &mut self.nodes,
        };
        if index < siblings.len() {
            Some((siblings, index))
        } else {
            None
        }
    }

    /// Detach the node at `path` and return it.
    pub fn remove(&mut self, path: &NodePath) -> Option<HtmlNode> {
        let (siblings, index) = self.siblings_mut(path)?;
        Some(siblings.remove(index))
    }

    /// Replace the element at `path` by its children.
    ///
    /// Returns `false` if there is no element at `path`.
    pub fn unwrap(&mut self, path: &NodePath) -> bool {
        let Some((siblings, index)) = self.siblings_mut(path) else {
            return false;
        };
        if !matches!(siblings[index], HtmlNode::Element(_)) {
            return false;
        }
        if let HtmlNode::Element(element) = siblings.remove(index) {
            siblings.splice(index..index, element.children);
        }
        true
    }

    /// Call `f` on every element, pre-order.
    pub fn for_each_element_mut(&mut self, f: &mut dyn FnMut(&mut HtmlElement)) {
        for node in &mut self.nodes {
            if let HtmlNode::Element(element) = node {
                element.for_each_element_mut(f);
            }
        }
    }

    /// Decoded text of the whole document.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.push_text_content(&mut out);
        }
        out
    }
}
