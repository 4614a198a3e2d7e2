//! Mutable HTML document built on scraper's parse tree.
//!
//! Templates and markup fragments are parsed by scraper (html5ever) and kept
//! in its `ego_tree` arena. Renderers and widgets mutate that tree in place,
//! anchors are matched with `scraper::Selector`, and output goes back through
//! the html5ever serializer.
//!
//! `ego_tree` never frees nodes: a detached subtree keeps its slots for the
//! life of the document, so every re-render grows the arena by the size of
//! the markup it inserts. Node ids stay valid (and simply stop being
//! attached) as a result. Re-parsing [`Document::to_html`] yields a compact
//! copy when that matters.

mod style;

use html5ever::serialize::{serialize, Serialize, SerializeOpts, TraversalScope};
use html5ever::{ns, Attribute, LocalName, QualName};
use scraper::node::{Element, Text};
use scraper::{CaseSensitivity, ElementRef, Html, Node, Selector};
use tracing::warn;

use crate::utils::Markup;

pub use ego_tree::NodeId;

/// HTML document tree.
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn attribute(name: &str, value: &str) -> Attribute {
    Attribute {
        name: QualName::new(None, ns!(), LocalName::from(name)),
        value: value.into(),
    }
}

/// Serialize with scripting enabled, matching how the parser treated
/// `<noscript>` content (raw text).
fn serialize_html<T: Serialize>(node: &T, traversal_scope: TraversalScope) -> String {
    let opts = SerializeOpts {
        scripting_enabled: true,
        traversal_scope,
        create_missing_parent: false,
    };
    let mut buf = Vec::new();
    if let Err(e) = serialize(&mut buf, node, opts) {
        warn!("HTML serialization failed: {}", e);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

impl Document {
    /// Empty document containing only the root node.
    pub fn new() -> Self {
        Self {
            html: Html::new_document(),
        }
    }

    /// Parse a full HTML document.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    pub fn root(&self) -> NodeId {
        self.html.tree.root().id()
    }

    /// The node's payload, as scraper parsed or we created it.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.html.tree.get(id).map(|n| n.value())
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node(id).and_then(Node::as_element)
    }

    fn element_ref(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(id).and_then(ElementRef::wrap)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.html.tree.get(id)?.parent().map(|p| p.id())
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(id)
            .map(|n| n.children().map(|c| c.id()).collect())
            .unwrap_or_default()
    }

    /// Element children only.
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(id)
            .map(|n| {
                n.children()
                    .filter(|c| c.value().is_element())
                    .map(|c| c.id())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All descendants in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(id)
            .map(|n| n.descendants().skip(1).map(|d| d.id()).collect())
            .unwrap_or_default()
    }

    /// True when `node` is `ancestor` or lies inside it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.html
            .tree
            .get(node)
            .is_some_and(|n| n.id() == ancestor || n.ancestors().any(|a| a.id() == ancestor))
    }

    /// True when the node is reachable from the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.contains(self.root(), id)
    }

    /// Create a detached HTML element.
    pub fn create_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> NodeId {
        let name = QualName::new(None, ns!(html), LocalName::from(name.to_ascii_lowercase()));
        let attrs = attrs.iter().map(|(k, v)| attribute(k, v)).collect();
        self.html.tree.orphan(Node::Element(Element::new(name, attrs))).id()
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.html
            .tree
            .orphan(Node::Text(Text { text: text.into() }))
            .id()
    }

    /// Remove a node from its parent. The subtree stays intact.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.detach();
        }
    }

    /// Append `child` to `parent`, moving it if it is attached elsewhere.
    /// Appending a node into its own subtree is ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.html.tree.get(child).is_none() || self.contains(child, parent) {
            return;
        }
        if let Some(mut node) = self.html.tree.get_mut(parent) {
            node.append_id(child);
        }
    }

    /// Detach every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        for child in self.children(id) {
            self.detach(child);
        }
    }

    /// Put `new` where `old` is. No-op when `old` has no parent.
    pub fn replace_with(&mut self, old: NodeId, new: NodeId) {
        if old == new || self.parent(old).is_none() || self.contains(new, old) {
            return;
        }
        // Detach first so `old`'s sibling links are read after `new` leaves.
        self.detach(new);
        if let Some(mut node) = self.html.tree.get_mut(old) {
            node.insert_id_before(new);
            node.detach();
        }
    }

    /// Concatenated text of the node and all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.html.tree.get(id) else {
            return String::new();
        };
        node.descendants()
            .filter_map(|d| d.value().as_text().map(|t| &**t))
            .collect()
    }

    /// Replace all children with a single text node (none for empty text).
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        self.clear_children(id);
        if !text.is_empty() {
            let t = self.create_text(text);
            self.append_child(id, t);
        }
    }

    /// Replace the children of `id` with the parsed `markup`.
    ///
    /// Returns the ids of the inserted top-level nodes.
    pub fn set_inner_html(&mut self, id: NodeId, markup: &Markup) -> Vec<NodeId> {
        self.clear_children(id);
        if markup.is_empty() {
            return Vec::new();
        }

        // Fragments parse into Fragment > <html> > content; move the whole
        // tree over and adopt the content.
        let fragment = Html::parse_fragment(markup.as_str());
        let merged = self.html.tree.extend_tree(fragment.tree).id();
        let wrapper = self
            .child_elements(merged)
            .into_iter()
            .next()
            .unwrap_or(merged);

        let inserted = self.children(wrapper);
        for child in &inserted {
            self.append_child(id, *child);
        }
        inserted
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attr(name))
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// Rebuild the element's attribute list. Going through `Element::new`
    /// refreshes scraper's cached id and class lookups.
    fn update_attrs<F>(&mut self, id: NodeId, update: F)
    where
        F: FnOnce(&mut Vec<Attribute>),
    {
        let Some(mut node) = self.html.tree.get_mut(id) else {
            return;
        };
        let Node::Element(el) = node.value() else {
            return;
        };
        let mut attrs: Vec<Attribute> = el
            .attrs
            .iter()
            .map(|(name, value)| Attribute {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();
        update(&mut attrs);
        *el = Element::new(el.name.clone(), attrs);
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        self.update_attrs(id, |attrs| {
            let new = attribute(name, value);
            match attrs.iter().position(|a| a.name == new.name) {
                Some(i) => attrs[i].value = new.value,
                None => attrs.push(new),
            }
        });
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if self.has_attr(id, name) {
            let name = attribute(name, "").name;
            self.update_attrs(id, |attrs| attrs.retain(|a| a.name != name));
        }
    }

    /// Set or clear a boolean attribute such as `disabled`.
    pub fn set_flag(&mut self, id: NodeId, name: &str, on: bool) {
        if on {
            self.set_attr(id, name, "");
        } else {
            self.remove_attr(id, name);
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id)
            .is_some_and(|el| el.has_class(class, CaseSensitivity::CaseSensitive))
    }

    /// Whether the node is an element matching `selector`.
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.element_ref(id).is_some_and(|el| selector.matches(&el))
    }

    /// Every element under `scope` matching `selector`, in document order.
    ///
    /// Walks the tree from `scope` rather than the arena, so detached
    /// subtrees never match.
    pub fn select(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.matches(*id, selector))
            .collect()
    }

    pub fn select_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.html
            .tree
            .get(scope)?
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|el| selector.matches(el))
            .map(|el| el.id())
    }

    /// First match for a selector string anywhere in the document.
    ///
    /// Invalid selectors match nothing.
    pub fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_in(self.root(), selector)
    }

    /// First match for a selector string under `scope`.
    pub fn query_in(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        parse_selector(selector).and_then(|sel| self.select_first(scope, &sel))
    }

    /// All matches for a selector string under `scope`.
    pub fn query_all_in(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        parse_selector(selector)
            .map(|sel| self.select(scope, &sel))
            .unwrap_or_default()
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.html
            .tree
            .root()
            .descendants()
            .find(|n| n.value().as_element().and_then(|el| el.id()) == Some(id))
            .map(|n| n.id())
    }

    /// Serialize the whole document.
    pub fn to_html(&self) -> String {
        serialize_html(&self.html, TraversalScope::IncludeNode)
    }

    /// Serialize the children of `id`.
    pub fn inner_html(&self, id: NodeId) -> String {
        if id == self.root() {
            return self.to_html();
        }
        self.element_ref(id)
            .map(|el| serialize_html(&el, TraversalScope::ChildrenOnly(None)))
            .unwrap_or_default()
    }

    /// Serialize `id` including its own tag.
    pub fn outer_html(&self, id: NodeId) -> String {
        self.element_ref(id)
            .map(|el| serialize_html(&el, TraversalScope::IncludeNode))
            .unwrap_or_default()
    }
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(sel) => Some(sel),
        Err(e) => {
            warn!("Ignoring invalid selector {:?}: {}", selector, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.create_element("div", &[("id", "box"), ("class", "a b")]);
        let span = doc.create_element("span", &[]);
        let text = doc.create_text("hi");
        doc.append_child(root, div);
        doc.append_child(div, span);
        doc.append_child(span, text);
        (doc, div, span, text)
    }

    #[test]
    fn test_descendants_in_document_order() {
        let (doc, div, span, text) = sample();
        assert_eq!(doc.descendants(doc.root()), vec![div, span, text]);
    }

    #[test]
    fn test_contains_and_attachment() {
        let (mut doc, div, span, _) = sample();
        assert!(doc.contains(div, span));
        assert!(!doc.contains(span, div));
        assert!(doc.is_attached(span));

        doc.clear_children(div);
        assert!(!doc.is_attached(span));
        assert!(doc.is_attached(div));
    }

    #[test]
    fn test_append_into_own_subtree_is_ignored() {
        let (mut doc, div, span, _) = sample();
        doc.append_child(span, div);
        assert_eq!(doc.parent(span), Some(div));
        assert!(doc.is_attached(div));
    }

    #[test]
    fn test_set_text_content_replaces_children() {
        let (mut doc, div, _, _) = sample();
        doc.set_text_content(div, "new");
        assert_eq!(doc.children(div).len(), 1);
        assert_eq!(doc.text_content(div), "new");

        doc.set_text_content(div, "");
        assert!(doc.children(div).is_empty());
    }

    #[test]
    fn test_replace_with_keeps_position() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.create_element("a", &[]);
        let b = doc.create_element("b", &[]);
        let c = doc.create_element("c", &[]);
        doc.append_child(root, a);
        doc.append_child(root, b);
        doc.append_child(root, c);

        let i = doc.create_element("iframe", &[]);
        doc.replace_with(b, i);
        assert_eq!(doc.children(root), vec![a, i, c]);
        assert!(!doc.is_attached(b));
    }

    #[test]
    fn test_attributes_and_classes() {
        let (mut doc, div, _, _) = sample();
        assert!(doc.has_class(div, "b"));
        assert!(!doc.has_class(div, "c"));

        doc.set_flag(div, "disabled", true);
        assert_eq!(doc.attr(div, "disabled"), Some(""));
        doc.set_flag(div, "disabled", false);
        assert!(!doc.has_attr(div, "disabled"));

        doc.set_attr(div, "id", "other");
        assert_eq!(doc.element_by_id("other"), Some(div));
        assert_eq!(doc.element_by_id("box"), None);

        doc.set_attr(div, "class", "c");
        assert!(doc.has_class(div, "c"));
        assert!(!doc.has_class(div, "a"));
    }

    #[test]
    fn test_set_attr_keeps_attribute_order() {
        let mut doc = Document::parse(r#"<p id="x" class="a" title="t"></p>"#);
        let p = doc.element_by_id("x").unwrap();
        doc.set_attr(p, "class", "b");
        doc.set_attr(p, "data-new", "1");
        assert_eq!(
            doc.outer_html(p),
            r#"<p id="x" class="b" title="t" data-new="1"></p>"#
        );
    }

    #[test]
    fn test_query_supports_combinators() {
        let (doc, div, span, _) = sample();
        assert_eq!(doc.query("#box"), Some(div));
        assert_eq!(doc.query("div > span"), Some(span));
        assert_eq!(doc.query("div.a.b span"), Some(span));
        assert_eq!(doc.query("section > span"), None);
    }

    #[test]
    fn test_query_ignores_invalid_selector() {
        let (doc, _, _, _) = sample();
        assert_eq!(doc.query("!"), None);
        assert!(doc.query_all_in(doc.root(), "div >").is_empty());
    }

    #[test]
    fn test_detached_nodes_never_match() {
        let (mut doc, div, span, _) = sample();
        doc.detach(span);
        assert_eq!(doc.query("span"), None);
        assert!(doc.select(div, &Selector::parse("span").unwrap()).is_empty());
    }

    #[test]
    fn test_parse_document_keeps_structure() {
        let doc = Document::parse(
            "<!DOCTYPE html><html><head><title>T</title></head>\
             <body><h1 id=\"hero-title\">Old</h1><!-- note --></body></html>",
        );
        let h1 = doc.element_by_id("hero-title").unwrap();
        assert_eq!(doc.text_content(h1), "Old");
        let first = doc.children(doc.root())[0];
        assert!(doc.node(first).is_some_and(Node::is_doctype));
    }

    #[test]
    fn test_set_inner_html_decodes_entities() {
        let mut doc = Document::parse("<html><body><div id=\"x\"></div></body></html>");
        let x = doc.element_by_id("x").unwrap();
        let inserted = doc.set_inner_html(x, &Markup::escaped("<b>\"hi\"</b>"));

        assert_eq!(inserted.len(), 1);
        assert_eq!(doc.text_content(x), "<b>\"hi\"</b>");
        assert!(doc.child_elements(x).is_empty());
    }

    #[test]
    fn test_set_inner_html_builds_elements() {
        let mut doc = Document::parse("<html><body><ul id=\"links\">old</ul></body></html>");
        let ul = doc.element_by_id("links").unwrap();
        let markup = Markup::trusted("<li><a href=\"/a\">A</a></li><li>B</li>".to_string());
        let inserted = doc.set_inner_html(ul, &markup);

        assert_eq!(inserted.len(), 2);
        assert_eq!(doc.child_elements(ul), inserted);
        assert!(inserted.iter().all(|li| doc.parent(*li) == Some(ul)));
        assert_eq!(doc.text_content(ul), "AB");
        assert_eq!(doc.query("ul > li > a").and_then(|a| doc.attr(a, "href")), Some("/a"));
    }

    #[test]
    fn test_set_inner_html_empty_clears() {
        let mut doc = Document::parse("<html><body><div id=\"x\"><p>a</p></div></body></html>");
        let x = doc.element_by_id("x").unwrap();
        assert!(doc.set_inner_html(x, &Markup::empty()).is_empty());
        assert!(doc.children(x).is_empty());
    }

    #[test]
    fn test_serialize_escapes_text_and_attributes() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.create_element("p", &[("title", "say \"hi\" & go")]);
        let t = doc.create_text("<script>alert('x')</script>");
        doc.append_child(root, p);
        doc.append_child(p, t);

        assert_eq!(
            doc.to_html(),
            "<p title=\"say &quot;hi&quot; &amp; go\">\
             &lt;script&gt;alert('x')&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn test_serialize_void_and_raw_elements() {
        let doc = Document::parse(
            "<!DOCTYPE html><html><head><script>if (a < b) {}</script></head>\
             <body><img src=\"a.png\"><br></body></html>",
        );
        let html = doc.to_html();
        assert!(html.starts_with("<!DOCTYPE html><html>"));
        assert!(html.contains("<script>if (a < b) {}</script>"));
        assert!(html.contains("<img src=\"a.png\"><br></body>"));
    }

    #[test]
    fn test_noscript_content_round_trips() {
        let source = r#"<!DOCTYPE html><html><head></head><body><noscript><img src="/pixel.gif" alt="x"></noscript></body></html>"#;
        let once = Document::parse(source).to_html();
        assert_eq!(once, source);
        assert_eq!(Document::parse(&once).to_html(), source);
    }

    #[test]
    fn test_namespaced_attributes_keep_prefix() {
        let source = r##"<html><head></head><body><svg><use xlink:href="#icon"></use></svg></body></html>"##;
        let html = Document::parse(source).to_html();
        assert!(html.contains(r##"<use xlink:href="#icon"></use>"##));
        assert_eq!(Document::parse(&html).to_html(), html);
    }

    #[test]
    fn test_serialize_round_trip_is_stable() {
        let source = "<html><head></head><body><div class=\"a\" id=\"b\">x &amp; y</div></body></html>";
        let once = Document::parse(source).to_html();
        assert_eq!(once, source);
        assert_eq!(Document::parse(&once).to_html(), once);
    }

    #[test]
    fn test_reparse_compacts_detached_nodes() {
        let mut doc = Document::parse("<html><body><div id=\"x\"></div></body></html>");
        let x = doc.element_by_id("x").unwrap();
        for _ in 0..3 {
            doc.set_inner_html(x, &Markup::trusted("<p>a</p><p>b</p>".to_string()));
        }
        let fresh = Document::parse(&doc.to_html());
        assert_eq!(fresh.to_html(), doc.to_html());
        assert!(fresh.html.tree.values().count() < doc.html.tree.values().count());
    }
}
