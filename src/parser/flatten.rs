//! Depth-first flattening of a markup subtree into plain text. Spacing per
//! tag comes from a declarative rule table so a new layout only needs a new
//! row, not new traversal code.

use ego_tree::NodeRef;
use scraper::node::Node;

use crate::diagnostics::Diagnostics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagRule {
    /// Recurse with no added separator.
    Inline,
    /// Prepend exactly one space, then recurse.
    Block,
    /// Emit a literal newline; no recursion.
    LineBreak,
}

const TAG_RULES: &[(&str, TagRule)] = &[
    ("a", TagRule::Inline),
    ("em", TagRule::Inline),
    ("strong", TagRule::Inline),
    ("b", TagRule::Inline),
    ("i", TagRule::Inline),
    ("code", TagRule::Inline),
    ("span", TagRule::Inline),
    ("pre", TagRule::Inline),
    ("p", TagRule::Block),
    ("div", TagRule::Block),
    ("ul", TagRule::Block),
    ("ol", TagRule::Block),
    ("li", TagRule::Block),
    ("table", TagRule::Block),
    ("thead", TagRule::Block),
    ("tbody", TagRule::Block),
    ("tr", TagRule::Block),
    ("td", TagRule::Block),
    ("th", TagRule::Block),
    ("br", TagRule::LineBreak),
];

fn rule_for(tag: &str) -> Option<TagRule> {
    TAG_RULES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, rule)| *rule)
}

/// Render the children of `node` as plain text, in document order. Unknown
/// tags contribute nothing (their whole subtree included) and are counted
/// in `diags`; text is lost there, the run is not.
pub fn flatten(node: NodeRef<Node>, diags: &mut Diagnostics) -> String {
    let mut out = String::new();
    render_children(node, &mut out, diags);
    out
}

fn render_children(node: NodeRef<Node>, out: &mut String, diags: &mut Diagnostics) {
    for child in node.children() {
        match child.value() {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => match rule_for(el.name()) {
                Some(TagRule::Inline) => render_children(child, out, diags),
                Some(TagRule::Block) => {
                    out.push(' ');
                    render_children(child, out, diags);
                }
                Some(TagRule::LineBreak) => out.push('\n'),
                None => diags.unknown_tag(el.name()),
            },
            // comments, doctypes etc. render nothing
            _ => {}
        }
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn flat(html: &str) -> (String, Diagnostics) {
        let frag = Html::parse_fragment(html);
        let mut diags = Diagnostics::default();
        let text = flatten(*frag.root_element(), &mut diags);
        (text, diags)
    }

    #[test]
    fn text_only_subtree_is_literal_concatenation() {
        let (text, diags) = flat("one two  three");
        assert_eq!(text, "one two  three");
        assert!(diags.is_empty());
    }

    #[test]
    fn inline_tags_add_no_separator() {
        let (text, _) = flat("get <em>all</em> <code>widgets</code>");
        assert_eq!(text, "get all widgets");
    }

    #[test]
    fn block_tags_prepend_one_space() {
        let (text, _) = flat("<p>alpha</p><p>beta</p>");
        assert_eq!(text, " alpha beta");
    }

    #[test]
    fn list_items_each_get_a_space() {
        let (text, _) = flat("<ul><li>a</li><li>b</li></ul>");
        assert_eq!(text, "  a b");
    }

    #[test]
    fn br_is_a_literal_newline() {
        let (text, _) = flat("first<br>second");
        assert_eq!(text, "first\nsecond");
    }

    #[test]
    fn unknown_tag_counted_once_and_subtree_dropped() {
        let (text, diags) = flat("<figure>lost <b>caption</b></figure>kept");
        assert_eq!(text, "kept");
        assert_eq!(diags.unknown_tags.get("figure"), Some(&1));
    }

    #[test]
    fn repeated_unknown_tag_counts_each_occurrence() {
        let (_, diags) = flat("<figure>a</figure><figure>b</figure>");
        assert_eq!(diags.unknown_tags.get("figure"), Some(&2));
    }

    #[test]
    fn table_structure_flattens_with_spaces() {
        let (text, _) = flat("<table><tbody><tr><td>k</td><td>v</td></tr></tbody></table>");
        assert_eq!(text, "    k v");
    }
}
