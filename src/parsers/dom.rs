//! Minimal structural queries over an html5ever DOM.
//!
//! Selectors support descendant chains of compound selectors built from a tag
//! name, an `#id` and any number of `.class` parts, e.g.
//! `#phrsListTab .trans-container ul li`. That is all the dictionary page
//! extraction needs.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// A parsed HTML document
pub struct Document {
    dom: RcDom,
}

impl Document {
    /// Parse an HTML document; malformed markup is repaired, never rejected
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        Self { dom }
    }

    /// The document node
    pub fn root(&self) -> Handle {
        self.dom.document.clone()
    }

    /// All elements matching `selector`, in document order
    pub fn select(&self, selector: &Selector) -> Vec<Handle> {
        select_within(&self.dom.document, selector)
    }
}

/// One step of a descendant chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

#[derive(Clone, Copy)]
enum Part {
    Tag,
    Id,
    Class,
}

impl Compound {
    fn parse(token: &str) -> Self {
        let mut compound = Self::default();
        let mut part = Part::Tag;
        let mut current = String::new();

        for c in token.chars() {
            match c {
                '#' | '.' => {
                    compound.commit(part, std::mem::take(&mut current));
                    part = if c == '#' { Part::Id } else { Part::Class };
                }
                _ => current.push(c),
            }
        }
        compound.commit(part, current);
        compound
    }

    fn commit(&mut self, part: Part, value: String) {
        if value.is_empty() {
            return;
        }
        match part {
            Part::Tag if value == "*" => {}
            Part::Tag => self.tag = Some(value.to_ascii_lowercase()),
            Part::Id => self.id = Some(value),
            Part::Class => self.classes.push(value),
        }
    }

    fn matches(&self, node: &Handle) -> bool {
        let NodeData::Element { ref name, ref attrs, .. } = node.data else {
            return false;
        };

        if let Some(tag) = &self.tag {
            if &*name.local != tag.as_str() {
                return false;
            }
        }

        let attrs = attrs.borrow();
        let attr = |wanted: &str| {
            attrs
                .iter()
                .find(|attr| &*attr.name.local == wanted)
                .map(|attr| attr.value.to_string())
        };

        if let Some(id) = &self.id {
            if attr("id").as_deref() != Some(id.as_str()) {
                return false;
            }
        }

        if !self.classes.is_empty() {
            let class_attr = attr("class").unwrap_or_default();
            let present = class_attr.split_whitespace();
            if !self.classes.iter().all(|wanted| present.clone().any(|c| c == wanted.as_str())) {
                return false;
            }
        }

        true
    }
}

/// A descendant-combinator selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    chain: Vec<Compound>,
}

impl Selector {
    /// Build a selector from whitespace-separated compound selectors
    pub fn new(selector: &str) -> Self {
        Self {
            chain: selector.split_whitespace().map(Compound::parse).collect(),
        }
    }

    /// Whether `node` matches given its ancestors, nearest last
    fn matches(&self, node: &Handle, ancestors: &[Handle]) -> bool {
        let Some((last, rest)) = self.chain.split_last() else {
            return false;
        };
        if !last.matches(node) {
            return false;
        }

        // Greedy right-to-left matching is exact for descendant-only chains.
        let mut remaining = rest.iter().rev().peekable();
        for ancestor in ancestors.iter().rev() {
            match remaining.peek() {
                Some(compound) if compound.matches(ancestor) => {
                    remaining.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        remaining.peek().is_none()
    }
}

/// All descendants of `scope` matching `selector`, in document order.
/// `scope` itself may satisfy ancestor steps but is never returned.
pub fn select_within(scope: &Handle, selector: &Selector) -> Vec<Handle> {
    let mut found = Vec::new();
    let mut ancestors = Vec::new();
    if matches!(scope.data, NodeData::Element { .. }) {
        ancestors.push(scope.clone());
    }
    walk(scope, selector, &mut ancestors, &mut found);
    found
}

fn walk(node: &Handle, selector: &Selector, ancestors: &mut Vec<Handle>, found: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        if !matches!(child.data, NodeData::Element { .. }) {
            continue;
        }
        if selector.matches(child, ancestors) {
            found.push(child.clone());
        }
        ancestors.push(child.clone());
        walk(child, selector, ancestors, found);
        ancestors.pop();
    }
}

/// Concatenated text of `node` and all its descendants
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

/// Concatenated text of several nodes
pub fn text_of(nodes: &[Handle]) -> String {
    nodes.iter().map(text_content).collect()
}

fn collect_text(node: &Handle, text: &mut String) {
    match node.data {
        NodeData::Text { ref contents } => text.push_str(&contents.borrow()),
        NodeData::Element { .. } | NodeData::Document => {
            for child in node.children.borrow().iter() {
                collect_text(child, text);
            }
        }
        _ => {}
    }
}
