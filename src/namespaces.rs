//! Namespace resolution from the in-scope declarations of an XML element.

use quire_xpath1::NamespaceResolver;
use roxmltree::Node;

/// Resolves prefixes the way they are bound at a given element, for
/// expressions that appear inside a document (e.g. stylesheet attributes).
#[derive(Debug, Clone, Copy)]
pub struct ElementNamespaces<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> ElementNamespaces<'a, 'input> {
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self { node }
    }
}

impl NamespaceResolver for ElementNamespaces<'_, '_> {
    fn lookup_namespace_uri(&self, prefix: &str) -> Option<String> {
        let uri = self.node.lookup_namespace_uri(Some(prefix));
        if uri.is_none() {
            log::debug!(
                "Prefix '{}' is not bound at <{}>",
                prefix,
                self.node.tag_name().name()
            );
        }
        uri.map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_lookup_uses_in_scope_declarations() {
        let xml = r#"<root xmlns:a="urn:a"><child xmlns:b="urn:b"/></root>"#;
        let doc = Document::parse(xml).unwrap();
        let child = doc
            .descendants()
            .find(|n| n.has_tag_name("child"))
            .unwrap();

        let at_child = ElementNamespaces::new(child);
        assert_eq!(at_child.lookup_namespace_uri("a"), Some("urn:a".to_string()));
        assert_eq!(at_child.lookup_namespace_uri("b"), Some("urn:b".to_string()));

        let at_root = ElementNamespaces::new(doc.root_element());
        assert_eq!(at_root.lookup_namespace_uri("b"), None);
    }
}
