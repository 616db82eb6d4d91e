//! Render output tree
//!
//! Components produce `View`s rather than markup so the result can be
//! inspected structurally, shipped as JSON, or serialized to HTML.

use std::collections::BTreeMap;

use panelkit_common::UnitKind;
use serde::{Deserialize, Serialize};

/// Elements that never carry children in HTML
const VOID_TAGS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum View {
    Element(Element),
    Text { text: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<View>,
}

/// Start building an element
pub fn el(tag: &str) -> Element {
    Element {
        tag: tag.to_string(),
        ..Default::default()
    }
}

pub fn text(value: impl Into<String>) -> View {
    View::Text { text: value.into() }
}

/// Visible stand-in for a slug with no registered definition
pub fn placeholder(kind: UnitKind, slug: &str) -> View {
    el("div")
        .attr("class", "unresolved-unit")
        .attr("data-unresolved", kind.as_str())
        .attr("data-slug", slug)
        .text(format!("Unknown {} type: {}", kind, slug))
        .into()
}

impl Element {
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    /// Set an attribute only when `value` is present
    pub fn attr_opt(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    /// Boolean attribute (`checked`, `disabled`, ...)
    pub fn flag(self, name: &str, on: bool) -> Self {
        if on { self.attr(name, name) } else { self }
    }

    pub fn child(mut self, child: impl Into<View>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, V>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<View>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(text(value))
    }
}

impl From<Element> for View {
    fn from(element: Element) -> Self {
        View::Element(element)
    }
}

impl View {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            View::Element(e) => Some(e),
            View::Text { .. } => None,
        }
    }

    /// Concatenated text of this node and all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            View::Text { text } => out.push_str(text),
            View::Element(e) => e.children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Depth-first search for the first element whose attribute matches
    pub fn find(&self, attr: &str, value: &str) -> Option<&Element> {
        let element = self.as_element()?;
        if element.attrs.get(attr).is_some_and(|v| v == value) {
            return Some(element);
        }
        element.children.iter().find_map(|c| c.find(attr, value))
    }

    /// All elements (depth-first) with the given tag
    pub fn find_all_tags<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.walk_tags(tag, &mut found);
        found
    }

    fn walk_tags<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        if let View::Element(e) = self {
            if e.tag == tag {
                found.push(e);
            }
            e.children.iter().for_each(|c| c.walk_tags(tag, found));
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            View::Text { text } => out.push_str(&htmlescape::encode_minimal(text)),
            View::Element(e) => {
                out.push('<');
                out.push_str(&e.tag);
                for (name, value) in &e.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&htmlescape::encode_minimal(value));
                    out.push('"');
                }
                if VOID_TAGS.contains(&e.tag.as_str()) {
                    out.push_str(" />");
                    return;
                }
                out.push('>');
                e.children.iter().for_each(|c| c.write_html(out));
                out.push_str("</");
                out.push_str(&e.tag);
                out.push('>');
            }
        }
    }
}
