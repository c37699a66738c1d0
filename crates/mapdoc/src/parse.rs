use roxmltree::{Document, Node};

use crate::item::{Attribute, ItemNode};
use crate::patch::Span;

/// Convert a parsed roxmltree element into an owned [`ItemNode`] tree.
///
/// Attribute names are qualified with their prefix as written in the source
/// (`ns:posX` stays distinct from `posX`).
pub(crate) fn build_node(doc: &Document<'_>, node: Node<'_, '_>) -> ItemNode {
    let source = doc.input_text();

    let attributes = node
        .attributes()
        .map(|attr| {
            let qname = Span::from(attr.range_qname());
            Attribute::new(
                qname.slice(source).to_string(),
                attr.value().to_string(),
                Span::from(attr.range_value()),
            )
        })
        .collect();

    let children = node
        .children()
        .filter(Node::is_element)
        .map(|child| build_node(doc, child))
        .collect();

    ItemNode::new(
        qualified_tag(source, node),
        attributes,
        children,
        Span::from(node.range()),
    )
}

/// Tag name as written in the source, including any namespace prefix.
fn qualified_tag(source: &str, node: Node<'_, '_>) -> String {
    let range = node.range();
    // Element ranges start at '<'; the name runs until whitespace, '/' or '>'
    source[range.start + 1..range.end]
        .split(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .next()
        .unwrap_or_default()
        .to_string()
}
