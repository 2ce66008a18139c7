//! Structural pass: strict markup parsing of a plan fragment.

use std::borrow::Cow;

use roxmltree::{Document, Node};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Synthetic root wrapped around every fragment so several top-level elements parse as one
/// document.
pub(crate) const FRAGMENT_ROOT: &str = "xml";

pub(crate) fn wrap_fragment(text: &str) -> String {
    format!("<{FRAGMENT_ROOT}>{text}</{FRAGMENT_ROOT}>")
}

pub(crate) fn parse_fragment(wrapped: &str) -> Result<Document<'_>, roxmltree::Error> {
    Document::parse(wrapped)
}

/// Every element named `tag` below the synthetic root, in document order.
pub(crate) fn elements_named<'a, 'input>(
    doc: &'a Document<'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    doc.root_element()
        .descendants()
        .skip(1)
        .filter(move |n| n.is_element() && n.tag_name().name() == tag)
}

/// Attribute names and values of `node` in document order.
///
/// Namespaced attributes keep their prefix (`xml:lang`), so names read as written.
pub(crate) fn attribute_pairs<'a, 'input: 'a>(
    node: Node<'a, 'input>,
) -> Vec<(Cow<'a, str>, &'a str)> {
    node.attributes()
        .map(|a| {
            let prefix = match a.namespace() {
                Some(XML_NAMESPACE) => Some("xml"),
                Some(uri) => node.lookup_prefix(uri),
                None => None,
            };
            let name = match prefix {
                Some(prefix) if !prefix.is_empty() => {
                    Cow::Owned(format!("{prefix}:{}", a.name()))
                }
                _ => Cow::Borrowed(a.name()),
            };
            (name, a.value())
        })
        .collect()
}

/// Concatenated text content of an element and its descendants.
pub(crate) fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
