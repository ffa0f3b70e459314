//! DOM Operations Adapter
//!
//! Node-level operations over the `dom_query` tree, named after what the
//! sanitizer needs from a document: classify a node, read its tag, move it,
//! detach it, and read or rewrite text values.
//!
//! `dom_query` selections work on elements only; the sanitizer also has to
//! see text, comment and doctype nodes, so everything here takes a
//! [`NodeRef`] rather than a [`Selection`].

use std::fmt;

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

/// The kinds of node the sanitizer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A tagged node with attributes and children.
    Element,
    /// Character data.
    Text,
    /// A document or document fragment node.
    Container,
    /// Comments, doctypes, processing instructions and anything else.
    Other,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Element => "element",
            Self::Text => "text",
            Self::Container => "document",
            Self::Other => "non-element",
        };
        f.write_str(name)
    }
}

/// Classify a node.
///
/// Anything that is not an element, text or document node is [`NodeKind::Other`].
#[must_use]
pub fn node_kind(node: &NodeRef) -> NodeKind {
    if node.is_element() {
        NodeKind::Element
    } else if node.is_text() {
        NodeKind::Text
    } else if node.is_document() || node.is_fragment() {
        NodeKind::Container
    } else {
        NodeKind::Other
    }
}

// === Tag/Node Information ===

/// Get tag name (lowercase). `None` for non-element nodes.
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Snapshot of all child nodes, text and comments included, in document order.
#[inline]
#[must_use]
pub fn child_nodes<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children()
}

/// Whether the node has at least one child of any kind.
#[inline]
#[must_use]
pub fn has_child_nodes(node: &NodeRef) -> bool {
    node.first_child().is_some()
}

/// Local names of every attribute on the node, in source order.
#[must_use]
pub fn attribute_names(node: &NodeRef) -> Vec<String> {
    node.attrs()
        .iter()
        .map(|attr| attr.name.local.to_string())
        .collect()
}

/// Remove an attribute by local name.
#[inline]
pub fn remove_attribute(node: &NodeRef, name: &str) {
    node.remove_attr(name);
}

// === Text Content ===

/// Value of a text node (or the concatenated text of an element).
#[inline]
#[must_use]
pub fn text_value(node: &NodeRef) -> StrTendril {
    node.text()
}

/// Replace the value of a text node.
#[inline]
pub fn set_text_value(node: &NodeRef, value: &str) {
    node.set_text(value);
}

// === Tree Manipulation ===

/// Insert a freshly created text node immediately before `node`.
pub fn insert_text_before(node: &NodeRef, value: &str) {
    let text = node.tree.new_text(value);
    node.insert_before(&text);
}

/// Move `child` so it becomes the previous sibling of `anchor`.
///
/// `child` is detached from wherever it currently lives first.
#[inline]
pub fn move_before(anchor: &NodeRef, child: &NodeRef) {
    anchor.insert_before(child);
}

/// Detach a node from its parent. Its subtree goes with it.
#[inline]
pub fn detach(node: &NodeRef) {
    node.remove_from_parent();
}

/// Whether the node is still reachable from its document node.
#[must_use]
pub fn is_attached(node: &NodeRef) -> bool {
    let mut current = *node;
    while let Some(parent) = current.parent() {
        current = parent;
    }
    current.is_document() || current.is_fragment()
}

/// Whether any ancestor of `node` carries one of the given tag names.
#[must_use]
pub fn has_ancestor_tag(node: &NodeRef, tags: &[&str]) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if tag_name(&parent).is_some_and(|t| tags.contains(&t.as_str())) {
            return true;
        }
        current = parent.parent();
    }
    false
}

// === Serialization ===

/// Get inner HTML content of a selection.
#[inline]
#[must_use]
pub fn inner_html(sel: &Selection) -> StrTendril {
    sel.inner_html()
}

/// Get outer HTML content of a selection.
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

/// Clone document
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// First node of the document's `<body>`, which html5ever always creates.
#[must_use]
pub fn body(doc: &Document) -> Option<NodeRef<'_>> {
    doc.select("body").nodes().first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first<'a>(doc: &'a Document, css: &str) -> NodeRef<'a> {
        doc.select(css).nodes()[0]
    }

    #[test]
    fn test_node_kind_classification() {
        let doc = parse("<div>text<!-- note --><p>p</p></div>");
        let div = first(&doc, "div");
        let kinds: Vec<NodeKind> = child_nodes(&div).iter().map(node_kind).collect();

        assert_eq!(kinds, vec![NodeKind::Text, NodeKind::Other, NodeKind::Element]);
        assert_eq!(node_kind(&doc.root()), NodeKind::Container);
    }

    #[test]
    fn test_tag_name_is_lowercase_and_none_for_text() {
        let doc = parse("<DIV>hello</DIV>");
        let div = first(&doc, "div");

        assert_eq!(tag_name(&div), Some("div".to_string()));
        assert_eq!(tag_name(&child_nodes(&div)[0]), None);
    }

    #[test]
    fn test_attribute_names_in_order() {
        let doc = parse(r#"<a href="/x" class="c" data-id="7">x</a>"#);
        let a = first(&doc, "a");

        assert_eq!(attribute_names(&a), vec!["href", "class", "data-id"]);
        remove_attribute(&a, "class");
        assert_eq!(attribute_names(&a), vec!["href", "data-id"]);
    }

    #[test]
    fn test_text_value_roundtrip() {
        let doc = parse("<p>a   b</p>");
        let text = child_nodes(&first(&doc, "p"))[0];

        assert_eq!(&*text_value(&text), "a   b");
        set_text_value(&text, "a b");
        assert_eq!(doc.select("p").inner_html().to_string(), "a b");
    }

    #[test]
    fn test_insert_text_before() {
        let doc = parse("<p>a<br>b</p>");
        let br = first(&doc, "br");

        insert_text_before(&br, "\n");
        detach(&br);

        assert_eq!(doc.select("p").inner_html().to_string(), "a\nb");
    }

    #[test]
    fn test_move_before_keeps_order() {
        let doc = parse("<div><span>1</span><b>x</b><i>y</i></div>");
        let span = first(&doc, "span");
        for child in [first(&doc, "b"), first(&doc, "i")] {
            move_before(&span, &child);
        }

        assert_eq!(
            doc.select("div").inner_html().to_string(),
            "<b>x</b><i>y</i><span>1</span>"
        );
    }

    #[test]
    fn test_is_attached_after_detach() {
        let doc = parse("<div><p><b>x</b></p></div>");
        let p = first(&doc, "p");
        let b = first(&doc, "b");

        assert!(is_attached(&b));
        detach(&p);
        assert!(!is_attached(&b));
        assert!(!has_child_nodes(&first(&doc, "div")));
    }

    #[test]
    fn test_has_ancestor_tag() {
        let doc = parse("<table><tr><td><span>x</span></td></tr></table><p><span>y</span></p>");
        let spans = doc.select("span");

        assert!(has_ancestor_tag(&spans.nodes()[0], &["table", "code"]));
        assert!(!has_ancestor_tag(&spans.nodes()[1], &["table", "code"]));
    }

    #[test]
    fn test_clone_document_is_independent() {
        let doc = parse(r#"<div id="original">content</div>"#);
        let cloned = clone_document(&doc);

        cloned.select("#original").set_attr("id", "cloned");
        assert_eq!(doc.select("#original").attr("id"), Some("original".into()));
        assert!(cloned.select("#cloned").exists());
    }

    #[test]
    fn test_body_always_present() {
        let doc = parse("just text");
        let body = body(&doc).unwrap();

        assert_eq!(tag_name(&body), Some("body".to_string()));
        assert_eq!(outer_html(&doc.select("body")).to_string(), "<body>just text</body>");
        assert_eq!(inner_html(&doc.select("body")).to_string(), "just text");
    }
}
