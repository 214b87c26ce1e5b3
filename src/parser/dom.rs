//! Read-only navigation primitives over the parsed tree. The tree stays
//! owned by `scraper::Html`; everything here borrows.

use ego_tree::NodeRef;
use scraper::node::Node;

/// True iff the node is an element whose `class` attribute, split on single
/// spaces, contains a token exactly equal to `class`. A missing attribute
/// is an ordinary `false`, not an error.
pub fn has_class(node: NodeRef<Node>, class: &str) -> bool {
    let Some(el) = node.value().as_element() else {
        return false;
    };
    el.attr("class")
        .is_some_and(|v| v.split(' ').any(|c| c == class))
}

/// First immediate child carrying `class`, scanning left to right.
/// Absence is a valid outcome callers must branch on.
pub fn find_child_with_class<'a>(
    node: NodeRef<'a, Node>,
    class: &str,
) -> Option<NodeRef<'a, Node>> {
    node.children().find(|c| has_class(*c, class))
}

/// Immediate children in document order. Does not recurse.
pub fn children(node: NodeRef<Node>) -> Vec<NodeRef<Node>> {
    node.children().collect()
}

/// Order-preserving selection.
pub fn filter<T>(items: Vec<T>, keep: impl Fn(&T) -> bool) -> Vec<T> {
    items.into_iter().filter(|v| keep(v)).collect()
}

// ── Tests ──
