//! # sleuth-catalog
//!
//! The service dependency catalog: an immutable, in-memory graph of
//! services, their log index/app bindings, and upstream failure-mode edges.
//!
//! Loaded once at startup and shared read-only (wrap in an `Arc`). Only
//! upstream edges are declared; downstream relationships are derived by
//! scanning. All lookups are advisory: an unknown id yields empty results,
//! never an error.
//!
//! Name resolution is split in two layers. [`ServiceCatalog::resolve`] is
//! the one permissive entry point that maps free-form text (exact, then
//! case-insensitive, then substring in either direction) to a service.
//! Every other query takes an already-resolved [`ServiceId`] and matches
//! exactly, so substring collisions cannot leak into graph traversal.

pub mod error;

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use sleuth_core::entities::{Service, UpstreamDependency};
use sleuth_core::ids::ServiceId;
use sleuth_core::responses::ServiceDetails;

pub use error::CatalogError;

/// Direction of a dependency-chain traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainDirection {
    Upstream,
    Downstream,
}

impl ChainDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upstream => "upstream",
            Self::Downstream => "downstream",
        }
    }
}

impl fmt::Display for ChainDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    services: Vec<Service>,
}

/// The service dependency catalog.
///
/// Services keep their declaration order from the catalog file; every
/// first-match rule below resolves ties by that order.
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl ServiceCatalog {
    /// Load the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read and
    /// [`CatalogError::Parse`] if it is not valid catalog JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: CatalogFile =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let catalog = Self::from_services(file.services);
        tracing::info!(
            services = catalog.len(),
            path = %path.display(),
            "loaded service catalog"
        );
        Ok(catalog)
    }

    /// Build a catalog directly from service definitions.
    #[must_use]
    pub fn from_services(services: Vec<Service>) -> Self {
        Self { services }
    }

    /// All services in declaration order.
    #[must_use]
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// All service ids in declaration order.
    #[must_use]
    pub fn service_ids(&self) -> Vec<ServiceId> {
        self.services.iter().map(|s| s.id.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Exact lookup by id.
    #[must_use]
    pub fn get(&self, id: &ServiceId) -> Option<&Service> {
        self.services.iter().find(|s| &s.id == id)
    }

    /// Resolve free-form text to a service: exact id, then case-insensitive
    /// id, then substring match in either direction. First match (in
    /// declaration order) wins; callers must not rely on ranking beyond
    /// that tie-break.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&Service> {
        if let Some(svc) = self.services.iter().find(|s| s.id.as_str() == name) {
            return Some(svc);
        }
        let needle = name.to_lowercase();
        if let Some(svc) = self
            .services
            .iter()
            .find(|s| s.id.as_str().to_lowercase() == needle)
        {
            return Some(svc);
        }
        self.services.iter().find(|s| {
            let id = s.id.as_str().to_lowercase();
            id.contains(&needle) || needle.contains(&id)
        })
    }

    /// Resolve a list of entity names, deduplicating by service id while
    /// preserving first-match order.
    #[must_use]
    pub fn resolve_entities<S: AsRef<str>>(&self, entities: &[S]) -> Vec<&Service> {
        let mut seen = BTreeSet::new();
        let mut matched = Vec::new();
        for entity in entities {
            if let Some(svc) = self.resolve(entity.as_ref()) {
                if seen.insert(svc.id.clone()) {
                    matched.push(svc);
                }
            }
        }
        matched
    }

    /// Declared upstream dependencies of a service. Empty for unknown ids.
    #[must_use]
    pub fn upstream_of(&self, id: &ServiceId) -> &[UpstreamDependency] {
        self.get(id).map_or(&[][..], |s| &s.upstream)
    }

    /// Services that declare `id` among their upstream dependencies.
    ///
    /// Derived by a full scan each call; the catalog is small and static.
    #[must_use]
    pub fn downstream_of(&self, id: &ServiceId) -> Vec<ServiceId> {
        self.services
            .iter()
            .filter(|s| s.upstream.iter().any(|dep| &dep.service == id))
            .map(|s| s.id.clone())
            .collect()
    }

    /// Full dependency chain from `id` in the given direction.
    ///
    /// Pre-order depth-first traversal guarded by a visited set, so cyclic
    /// catalogs terminate and each service appears exactly once. The chain
    /// starts with `id` itself and may contain dependency ids that are not
    /// themselves declared in the catalog (they become leaves). An unknown
    /// starting id yields an empty chain.
    #[must_use]
    pub fn dependency_chain(&self, id: &ServiceId, direction: ChainDirection) -> Vec<ServiceId> {
        if self.get(id).is_none() {
            return Vec::new();
        }
        let mut visited = BTreeSet::new();
        let mut chain = Vec::new();
        self.chain_visit(id, direction, &mut visited, &mut chain);
        chain
    }

    fn chain_visit(
        &self,
        id: &ServiceId,
        direction: ChainDirection,
        visited: &mut BTreeSet<ServiceId>,
        chain: &mut Vec<ServiceId>,
    ) {
        if !visited.insert(id.clone()) {
            return;
        }
        chain.push(id.clone());
        match direction {
            ChainDirection::Upstream => {
                for dep in self.upstream_of(id) {
                    self.chain_visit(&dep.service, direction, visited, chain);
                }
            }
            ChainDirection::Downstream => {
                for svc in self.downstream_of(id) {
                    self.chain_visit(&svc, direction, visited, chain);
                }
            }
        }
    }

    /// Log indexes bound to a service. Empty for unknown ids.
    #[must_use]
    pub fn indexes_of(&self, id: &ServiceId) -> &[String] {
        self.get(id).map_or(&[][..], |s| &s.indexes)
    }

    /// App bindings of a service. Empty for unknown ids.
    #[must_use]
    pub fn apps_of(&self, id: &ServiceId) -> &[String] {
        self.get(id).map_or(&[][..], |s| &s.apps)
    }

    /// The service owning a log index (case-insensitive), if any.
    #[must_use]
    pub fn owner_of_index(&self, index: &str) -> Option<&Service> {
        self.services
            .iter()
            .find(|s| s.indexes.iter().any(|i| i.eq_ignore_ascii_case(index)))
    }

    /// The service owning an app binding (case-insensitive), if any.
    #[must_use]
    pub fn owner_of_app(&self, app: &str) -> Option<&Service> {
        self.services
            .iter()
            .find(|s| s.apps.iter().any(|a| a.eq_ignore_ascii_case(app)))
    }

    /// One service with its derived relationships, for display.
    #[must_use]
    pub fn details(&self, id: &ServiceId) -> Option<ServiceDetails> {
        let service = self.get(id)?.clone();
        Some(ServiceDetails {
            downstream: self.downstream_of(id),
            upstream_chain: self.dependency_chain(id, ChainDirection::Upstream),
            downstream_chain: self.dependency_chain(id, ChainDirection::Downstream),
            service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sleuth_core::enums::Criticality;

    fn svc(id: &str, upstream: &[(&str, &[&str])], indexes: &[&str]) -> Service {
        Service {
            id: ServiceId::new(id),
            domain: None,
            tier: None,
            criticality: Criticality::Unspecified,
            upstream: upstream
                .iter()
                .map(|(dep, modes)| UpstreamDependency {
                    service: ServiceId::new(*dep),
                    failure_modes: modes.iter().map(|m| (*m).to_string()).collect(),
                })
                .collect(),
            indexes: indexes.iter().map(|i| (*i).to_string()).collect(),
            apps: Vec::new(),
        }
    }

    fn make_catalog() -> ServiceCatalog {
        ServiceCatalog::from_services(vec![
            svc(
                "payment-service",
                &[("auth-service", &["timeout", "5xx"]), ("ledger-db", &[])],
                &["pay_app"],
            ),
            svc("auth-service", &[("user-db", &["timeout"])], &["auth_app"]),
            svc("order-service", &[("payment-service", &["5xx"])], &["order_app"]),
            svc("user-db", &[], &["db_metrics"]),
            svc("checkout", &[], &["checkout_app"]),
            svc("checkout-v2", &[], &["checkout_v2_app"]),
        ])
    }

    #[test]
    fn resolve_prefers_exact_then_case_insensitive_then_substring() {
        let catalog = make_catalog();

        let exact = catalog.resolve("checkout").unwrap();
        assert_eq!(exact.id.as_str(), "checkout");

        let ci = catalog.resolve("Payment-Service").unwrap();
        assert_eq!(ci.id.as_str(), "payment-service");

        let sub = catalog.resolve("payment").unwrap();
        assert_eq!(sub.id.as_str(), "payment-service");

        // Substring in the other direction: the query contains the id.
        let contains = catalog.resolve("the user-db cluster").unwrap();
        assert_eq!(contains.id.as_str(), "user-db");

        assert!(catalog.resolve("billing").is_none());
    }

    #[test]
    fn resolve_first_match_follows_declaration_order() {
        let catalog = make_catalog();
        // Both checkout and checkout-v2 contain "check"; the earlier
        // declaration wins.
        let svc = catalog.resolve("check").unwrap();
        assert_eq!(svc.id.as_str(), "checkout");
    }

    #[test]
    fn resolve_entities_dedupes_preserving_order() {
        let catalog = make_catalog();
        let matched = catalog.resolve_entities(&["order-service", "payment", "payment-service"]);
        let ids: Vec<&str> = matched.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["order-service", "payment-service"]);
    }

    #[test]
    fn downstream_is_derived_from_upstream_declarations() {
        let catalog = make_catalog();
        let downstream = catalog.downstream_of(&ServiceId::new("auth-service"));
        assert_eq!(downstream, vec![ServiceId::new("payment-service")]);

        let downstream = catalog.downstream_of(&ServiceId::new("payment-service"));
        assert_eq!(downstream, vec![ServiceId::new("order-service")]);

        assert!(catalog.downstream_of(&ServiceId::new("nope")).is_empty());
    }

    #[test]
    fn upstream_chain_is_preorder_and_includes_undeclared_leaves() {
        let catalog = make_catalog();
        let chain = catalog.dependency_chain(
            &ServiceId::new("payment-service"),
            ChainDirection::Upstream,
        );
        let ids: Vec<&str> = chain.iter().map(ServiceId::as_str).collect();
        // ledger-db is not declared as a service but still appears as a leaf.
        assert_eq!(ids, vec!["payment-service", "auth-service", "user-db", "ledger-db"]);
    }

    #[test]
    fn downstream_chain_walks_dependents() {
        let catalog = make_catalog();
        let chain =
            catalog.dependency_chain(&ServiceId::new("user-db"), ChainDirection::Downstream);
        let ids: Vec<&str> = chain.iter().map(ServiceId::as_str).collect();
        assert_eq!(ids, vec!["user-db", "auth-service", "payment-service", "order-service"]);
    }

    #[test]
    fn chain_tolerates_cycles() {
        let catalog = ServiceCatalog::from_services(vec![
            svc("a", &[("b", &[])], &[]),
            svc("b", &[("a", &[])], &[]),
        ]);
        let chain = catalog.dependency_chain(&ServiceId::new("a"), ChainDirection::Upstream);
        let ids: Vec<&str> = chain.iter().map(ServiceId::as_str).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn unknown_root_yields_empty_chain() {
        let catalog = make_catalog();
        assert!(catalog
            .dependency_chain(&ServiceId::new("ghost"), ChainDirection::Upstream)
            .is_empty());
    }

    #[test]
    fn index_and_app_owners_match_case_insensitively() {
        let catalog = make_catalog();
        let owner = catalog.owner_of_index("PAY_APP").unwrap();
        assert_eq!(owner.id.as_str(), "payment-service");
        assert!(catalog.owner_of_index("missing_idx").is_none());
        assert!(catalog.owner_of_app("anything").is_none());
    }

    #[test]
    fn unknown_ids_yield_empty_lookups() {
        let catalog = make_catalog();
        let ghost = ServiceId::new("ghost");
        assert!(catalog.get(&ghost).is_none());
        assert!(catalog.upstream_of(&ghost).is_empty());
        assert!(catalog.indexes_of(&ghost).is_empty());
        assert!(catalog.apps_of(&ghost).is_empty());
        assert!(catalog.details(&ghost).is_none());
    }

    #[test]
    fn details_bundles_derived_relationships() {
        let catalog = make_catalog();
        let details = catalog.details(&ServiceId::new("payment-service")).unwrap();
        assert_eq!(details.service.id.as_str(), "payment-service");
        assert_eq!(details.downstream, vec![ServiceId::new("order-service")]);
        assert_eq!(details.upstream_chain.len(), 4);
        assert_eq!(details.downstream_chain.len(), 2);
    }
}
