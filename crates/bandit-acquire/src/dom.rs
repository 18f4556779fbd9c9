//! Attribute-driven lookups over a parsed HTML tree.
//!
//! The walk only needs element names, attribute lookup and ordered
//! children, so it is written against [`DomNode`] rather than a specific
//! parser. [`scraper`]'s tree implements it below.

use ego_tree::NodeRef;
use scraper::Node;

/// A node in a parsed document.
pub trait DomNode: Copy {
    /// Tag name for element nodes, `None` for text, comments and the like.
    fn element_name(&self) -> Option<&str>;

    /// Value of the attribute literally named `key`, if this is an element
    /// carrying it.
    fn attr(&self, key: &str) -> Option<&str>;

    /// Direct children in document order.
    fn child_nodes(&self) -> impl Iterator<Item = Self>;
}

impl DomNode for NodeRef<'_, Node> {
    fn element_name(&self) -> Option<&str> {
        self.value().as_element().map(|elem| elem.name())
    }

    fn attr(&self, key: &str) -> Option<&str> {
        self.value().as_element().and_then(|elem| elem.attr(key))
    }

    fn child_nodes(&self) -> impl Iterator<Item = Self> {
        NodeRef::children(self)
    }
}

/// Every element under `root` (inclusive) carrying an attribute named
/// `key`, whatever its value, in document order.
pub fn find_with_attr<N: DomNode>(root: N, key: &str) -> Vec<N> {
    let mut found = Vec::new();
    walk_node(root, key, &mut found);
    found
}

fn walk_node<N: DomNode>(node: N, key: &str, found: &mut Vec<N>) {
    if node.attr(key).is_some() {
        found.push(node);
    }
    for child in node.child_nodes() {
        walk_node(child, key, found);
    }
}

/// Raw value of `key` on `node`, or an empty string.
pub fn attribute_value<N: DomNode>(node: N, key: &str) -> String {
    node.attr(key).unwrap_or_default().to_string()
}

/// `href` of the first direct `<a>` child that has one.
pub fn first_child_href<N: DomNode>(node: N) -> Option<String> {
    node.child_nodes()
        .filter(|child| child.element_name() == Some("a"))
        .find_map(|anchor| anchor.attr("href").map(str::to_string))
}
