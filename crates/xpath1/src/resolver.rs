//! Namespace prefix resolution for qualified names.

use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// The external capability that maps a namespace prefix to a namespace URI.
pub trait NamespaceResolver {
    /// Returns the namespace URI bound to `prefix`, or `None` if it is unbound.
    fn lookup_namespace_uri(&self, prefix: &str) -> Option<String>;
}

impl NamespaceResolver for HashMap<String, String> {
    fn lookup_namespace_uri(&self, prefix: &str) -> Option<String> {
        self.get(prefix).cloned()
    }
}

impl NamespaceResolver for BTreeMap<String, String> {
    fn lookup_namespace_uri(&self, prefix: &str) -> Option<String> {
        self.get(prefix).cloned()
    }
}

impl NamespaceResolver for [(&str, &str)] {
    fn lookup_namespace_uri(&self, prefix: &str) -> Option<String> {
        self.iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, uri)| (*uri).to_string())
    }
}

impl<const N: usize> NamespaceResolver for [(&str, &str); N] {
    fn lookup_namespace_uri(&self, prefix: &str) -> Option<String> {
        self.as_slice().lookup_namespace_uri(prefix)
    }
}

impl<T: NamespaceResolver + ?Sized> NamespaceResolver for &T {
    fn lookup_namespace_uri(&self, prefix: &str) -> Option<String> {
        (**self).lookup_namespace_uri(prefix)
    }
}

/// A name split into its local part and resolved namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpandedName {
    pub local_name: String,
    pub namespace_uri: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("namespace prefix '{prefix}' cannot be resolved")]
pub struct UnresolvedPrefix {
    pub prefix: String,
}

/// Expands QNames against an optional resolver for the duration of one parse.
#[derive(Clone, Copy, Default)]
pub struct NameResolver<'r> {
    resolver: Option<&'r dyn NamespaceResolver>,
}

impl<'r> NameResolver<'r> {
    pub fn new(resolver: Option<&'r dyn NamespaceResolver>) -> Self {
        Self { resolver }
    }

    pub fn has_resolver(&self) -> bool {
        self.resolver.is_some()
    }

    /// Splits `qname` at its first `:` and resolves the prefix.
    ///
    /// Unprefixed names always succeed with no namespace. A prefixed name fails
    /// when there is no resolver or the resolver does not know the prefix.
    pub fn expand(&self, qname: &str) -> Result<ExpandedName, UnresolvedPrefix> {
        let Some((prefix, local)) = qname.split_once(':') else {
            return Ok(ExpandedName {
                local_name: qname.to_string(),
                namespace_uri: None,
            });
        };

        let namespace_uri = self
            .resolver
            .and_then(|resolver| resolver.lookup_namespace_uri(prefix))
            .ok_or_else(|| UnresolvedPrefix {
                prefix: prefix.to_string(),
            })?;

        Ok(ExpandedName {
            local_name: local.to_string(),
            namespace_uri: Some(namespace_uri),
        })
    }
}

impl std::fmt::Debug for NameResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameResolver")
            .field("has_resolver", &self.has_resolver())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unprefixed_name_needs_no_resolver() {
        let names = NameResolver::new(None);
        assert_eq!(
            names.expand("para"),
            Ok(ExpandedName {
                local_name: "para".to_string(),
                namespace_uri: None
            })
        );
    }

    #[test]
    fn test_prefixed_name_without_resolver_fails() {
        let names = NameResolver::new(None);
        assert_eq!(
            names.expand("foo:bar"),
            Err(UnresolvedPrefix {
                prefix: "foo".to_string()
            })
        );
    }

    #[test]
    fn test_prefix_resolved_through_map() {
        let mut map = HashMap::new();
        map.insert("foo".to_string(), "urn:x".to_string());
        let names = NameResolver::new(Some(&map));

        assert_eq!(
            names.expand("foo:bar"),
            Ok(ExpandedName {
                local_name: "bar".to_string(),
                namespace_uri: Some("urn:x".to_string())
            })
        );
        assert_eq!(
            names.expand("baz:bar"),
            Err(UnresolvedPrefix {
                prefix: "baz".to_string()
            })
        );
    }

    #[test]
    fn test_namespace_wildcard_keeps_star_as_local_name() {
        let bindings = [("svg", "http://www.w3.org/2000/svg")];
        let names = NameResolver::new(Some(&bindings));
        let expanded = names.expand("svg:*").unwrap();
        assert_eq!(expanded.local_name, "*");
        assert_eq!(
            expanded.namespace_uri.as_deref(),
            Some("http://www.w3.org/2000/svg")
        );
    }

    #[test]
    fn test_btree_map_and_reference_resolvers() {
        let mut map = BTreeMap::new();
        map.insert("x".to_string(), "urn:x".to_string());
        let by_ref = &map;
        assert_eq!(by_ref.lookup_namespace_uri("x"), Some("urn:x".to_string()));
        assert_eq!(by_ref.lookup_namespace_uri("y"), None);
    }
}
