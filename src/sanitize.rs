//! Post-extraction document sanitizer.
//!
//! [`sanitize`] rewrites a live `dom_query` subtree in place, in one
//! non-recursive pass, into the minimal form a [`SanitizePolicy`] describes:
//!
//! - text outside the preformatted region has whitespace runs collapsed
//! - whitelisted elements (and everything under them) are left alone
//! - comments, doctypes and other non-element nodes are removed
//! - line breaks inside the preformatted region become `"\n"` text
//! - childless elements are pruned unless the policy marks them content-optional
//! - collapsible wrappers, and every element inside the preformatted region,
//!   are unwrapped: children take the wrapper's place, in order
//! - everything else keeps only its whitelisted attributes
//!
//! Removals cascade upward through ancestors left without children, stopping
//! at the sanitize root, so no empty wrapper chain survives the pass.
//!
//! The walk uses an explicit LIFO work-list. Each entry records whether the
//! node was queued from inside the preformatted element, which is the only
//! context a node needs from its ancestors.

use std::borrow::Cow;

use dom_query::{NodeRef, Selection};
use tracing::{debug, trace};

use crate::dom::{self, NodeKind};
use crate::error::{Error, Result};
use crate::patterns::WHITESPACE_RUN;
use crate::policy::SanitizePolicy;

/// What a sanitize pass changed.
///
/// Purely informational: the mutated tree is the real output. An all-zero
/// report means the tree was already in sanitized form.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Nodes detached from the tree, cascaded ancestors included.
    pub nodes_removed: usize,
    /// Ancestors removed because a removal left them without children.
    pub ancestors_pruned: usize,
    /// Elements whose children were spliced into their place.
    pub elements_unwrapped: usize,
    /// Attributes removed from kept elements.
    pub attributes_removed: usize,
    /// Text nodes whose value changed by whitespace collapsing.
    pub texts_collapsed: usize,
    /// Line breaks inside the preformatted region turned into `"\n"`.
    pub line_breaks_converted: usize,
    /// This pass removed the last remaining child of the sanitize root.
    ///
    /// Not a failure: the whole subtree reduced to nothing. A root that was
    /// already empty when the pass started reports `false`, so sanitizing an
    /// emptied tree again stays unchanged.
    pub root_emptied: bool,
}

impl SanitizeReport {
    /// Whether the pass changed anything.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        *self == Self::default()
    }
}

/// One work-list entry.
#[derive(Clone, Copy)]
struct Pending<'a> {
    node: NodeRef<'a>,
    in_pre: bool,
}

/// Sanitize everything below `root` according to `policy`.
///
/// `root` must be an element or document node; it is never removed itself and
/// its own attributes are left alone. Any other kind of node is rejected with
/// [`Error::InvalidArgument`] before the tree is touched.
///
/// ```rust
/// use rs_article_sanitizer::{dom, sanitize, SanitizePolicy};
///
/// let doc = dom::parse(r#"<div class="wrap"><p style="x">a   b</p><span></span></div>"#);
/// let body = dom::body(&doc).unwrap();
///
/// let report = sanitize(&body, SanitizePolicy::standard())?;
///
/// assert_eq!(doc.select("body").inner_html().to_string(), "<p>a b</p>");
/// assert_eq!(report.elements_unwrapped, 1);
/// # Ok::<(), rs_article_sanitizer::Error>(())
/// ```
pub fn sanitize(root: &NodeRef, policy: &SanitizePolicy) -> Result<SanitizeReport> {
    match dom::node_kind(root) {
        NodeKind::Element | NodeKind::Container => {}
        kind => {
            return Err(Error::InvalidArgument(format!(
                "sanitize root must be an element or document, got a {kind} node"
            )));
        }
    }

    let mut walker = Walker {
        root: *root,
        policy,
        report: SanitizeReport::default(),
    };
    let mut work: Vec<Pending> = dom::child_nodes(root)
        .into_iter()
        .map(|node| Pending { node, in_pre: false })
        .collect();

    while let Some(entry) = work.pop() {
        walker.visit(entry, &mut work);
    }

    let report = walker.report;
    debug!(
        removed = report.nodes_removed,
        pruned = report.ancestors_pruned,
        unwrapped = report.elements_unwrapped,
        attributes = report.attributes_removed,
        texts = report.texts_collapsed,
        root_emptied = report.root_emptied,
        "sanitized subtree"
    );
    Ok(report)
}

/// Sanitize below the first node of a selection.
///
/// An empty selection is an [`Error::InvalidArgument`].
pub fn sanitize_selection(sel: &Selection, policy: &SanitizePolicy) -> Result<SanitizeReport> {
    let root = sel
        .nodes()
        .first()
        .ok_or_else(|| Error::InvalidArgument("cannot sanitize an empty selection".into()))?;
    sanitize(root, policy)
}

/// Parse `html`, sanitize its body and return the body's serialized content.
///
/// The serialized string is not whitespace-collapsed again; see
/// [`collapse_whitespace`] for that.
pub fn sanitize_html(html: &str, policy: &SanitizePolicy) -> Result<String> {
    let doc = dom::parse(html);
    let body = dom::body(&doc)
        .ok_or_else(|| Error::ParseError("document has no body element".into()))?;
    sanitize(&body, policy)?;
    Ok(dom::inner_html(&doc.select("body")).to_string())
}

/// Collapse every run of two or more whitespace characters to a single space.
#[must_use]
pub fn collapse_whitespace(text: &str) -> Cow<'_, str> {
    WHITESPACE_RUN.replace_all(text, " ")
}

struct Walker<'a, 'p> {
    root: NodeRef<'a>,
    policy: &'p SanitizePolicy,
    report: SanitizeReport,
}

impl<'a> Walker<'a, '_> {
    fn visit(&mut self, entry: Pending<'a>, work: &mut Vec<Pending<'a>>) {
        let Pending { node, in_pre } = entry;

        match dom::node_kind(&node) {
            NodeKind::Text => {
                if !in_pre {
                    self.collapse_text(&node);
                }
                return;
            }
            NodeKind::Element => {}
            kind => {
                trace!(%kind, "removing non-element node");
                self.remove(&node);
                return;
            }
        }

        let Some(tag) = dom::tag_name(&node) else {
            self.remove(&node);
            return;
        };
        let policy = self.policy;

        if policy.is_whitelisted(&tag) {
            return;
        }

        let line_break = policy.is_line_break(&tag);
        if line_break && in_pre {
            dom::insert_text_before(&node, "\n");
            self.remove(&node);
            self.report.line_breaks_converted += 1;
            return;
        }

        let children = dom::child_nodes(&node);
        if children.is_empty() && !line_break && !policy.is_content_optional(&tag) {
            self.remove(&node);
            return;
        }

        let child_in_pre = in_pre || policy.is_preformatted(&tag);
        work.extend(children.iter().map(|&child| Pending {
            node: child,
            in_pre: child_in_pre,
        }));

        if in_pre || policy.is_collapsible(&tag) {
            for child in &children {
                dom::move_before(&node, child);
            }
            self.remove(&node);
            self.report.elements_unwrapped += 1;
            return;
        }

        let allowed = policy.allowed_attributes(&tag);
        for name in dom::attribute_names(&node) {
            if !allowed.contains(&name.to_ascii_lowercase()) {
                dom::remove_attribute(&node, &name);
                self.report.attributes_removed += 1;
            }
        }
    }

    fn collapse_text(&mut self, node: &NodeRef) {
        let value = dom::text_value(node);
        if let Cow::Owned(collapsed) = collapse_whitespace(&value) {
            dom::set_text_value(node, &collapsed);
            self.report.texts_collapsed += 1;
        }
    }

    /// Detach `node`, then keep detaching ancestors that the removal left
    /// childless. Never detaches the sanitize root or a document node.
    fn remove(&mut self, node: &NodeRef<'a>) {
        let mut current = *node;
        loop {
            let parent = current.parent();
            dom::detach(&current);
            self.report.nodes_removed += 1;

            let Some(parent) = parent else {
                return;
            };
            if dom::has_child_nodes(&parent) {
                return;
            }
            if parent.id == self.root.id {
                self.report.root_emptied = true;
                return;
            }
            if dom::node_kind(&parent) != NodeKind::Element {
                return;
            }
            self.report.ancestors_pruned += 1;
            current = parent;
        }
    }
}
