//! Discovery of bean types carrying component markers.
//!
//! Every type deriving `Bean` is registered at link time together with the module path it was
//! declared in. A namespace is a module path prefix, e.g. `my_app::services`; the empty namespace
//! matches everything linked into the binary.

use crate::descriptor::{registered_types, TypeDescriptor, TypeKey};
use fxhash::FxHashSet;
#[cfg(test)]
use mockall::automock;
use tracing::info;

/// Marker for business logic components.
pub const SERVICE: &str = "service";

/// Marker for data access components.
pub const REPOSITORY: &str = "repository";

/// Marker for request handling components.
pub const CONTROLLER: &str = "controller";

/// Source of bean types for a [Container](crate::container::Container).
#[cfg_attr(test, automock)]
pub trait TypeScanner {
    /// Returns unique descriptors of types found in given namespace.
    fn discover_types(&self, namespace: &str) -> Vec<TypeDescriptor>;
}

/// Scanner over statically registered types, accepting those with any of the configured markers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StaticTypeScanner {
    markers: Vec<String>,
}

impl Default for StaticTypeScanner {
    fn default() -> Self {
        Self::new([SERVICE, REPOSITORY])
    }
}

impl StaticTypeScanner {
    pub fn new<I: IntoIterator<Item = T>, T: ToString>(markers: I) -> Self {
        Self {
            markers: markers.into_iter().map(|marker| marker.to_string()).collect(),
        }
    }

    #[inline]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }
}

impl TypeScanner for StaticTypeScanner {
    fn discover_types(&self, namespace: &str) -> Vec<TypeDescriptor> {
        discover_types(namespace, |markers| {
            markers
                .iter()
                .any(|marker| self.markers.iter().any(|accepted| accepted == marker))
        })
    }
}

/// Returns statically registered types declared in `namespace` whose markers satisfy `predicate`.
/// Each type is returned once.
pub fn discover_types<P: Fn(&[&'static str]) -> bool>(
    namespace: &str,
    predicate: P,
) -> Vec<TypeDescriptor> {
    let mut seen = FxHashSet::<TypeKey>::default();

    registered_types()
        .into_iter()
        .filter(|(module_path, _)| in_namespace(module_path, namespace))
        .filter(|(_, descriptor)| predicate(descriptor.markers.as_slice()))
        .filter(|(_, descriptor)| seen.insert(descriptor.type_key))
        .map(|(module_path, descriptor)| {
            info!(
                bean = %descriptor.type_key,
                module_path,
                markers = ?descriptor.markers,
                "Found component."
            );
            descriptor
        })
        .collect()
}

fn in_namespace(module_path: &str, namespace: &str) -> bool {
    namespace.is_empty()
        || module_path
            .strip_prefix(namespace)
            .map(|rest| rest.is_empty() || rest.starts_with("::"))
            .unwrap_or(false)
}
