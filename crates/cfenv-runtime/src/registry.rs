//! Which service labels belong to which service kind.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, LazyLock};

use cfenv_core::EnvError;
use cfenv_domain::ServiceKind;

/// Labels the platform has used for each built-in kind. Several labels per
/// kind are historical renames of the same service.
const BUILTIN_LABELS: &[(ServiceKind, &str)] = &[
    (ServiceKind::MYSQL, "mysql-5.1"),
    (ServiceKind::REDIS, "redis-2.2"),
    (ServiceKind::MONGODB, "mongodb-1.8"),
    (ServiceKind::POSTGRESQL, "postgresql-9.0"),
    // original broker
    (ServiceKind::RABBITMQ, "rabbitmq-2.4"),
    // SRS-based broker, while under test
    (ServiceKind::RABBITMQ, "rabbitmq-srs-2.4.1"),
    // SRS-based broker once the original is retired
    (ServiceKind::RABBITMQ, "rabbitmq-2.4.1"),
];

static BUILTIN: LazyLock<Arc<LabelRegistry>> = LazyLock::new(|| Arc::new(build_builtin()));

fn build_builtin() -> LabelRegistry {
    let mut registry = LabelRegistry::new();
    for &(kind, label) in BUILTIN_LABELS {
        if let Err(e) = registry.register(kind, label) {
            // The table above is fixed; a conflict here is a typo in it.
            unreachable!("built-in label table is inconsistent: {e}");
        }
    }
    registry
}

/// Many-labels-to-one-kind association.
///
/// Invariant: a label belongs to at most one kind. Build it with
/// [`LabelRegistry::register`], then share it read-only (the built-in table
/// lives in a `LazyLock`; custom tables are usually wrapped in an `Arc`).
#[derive(Debug, Clone, Default)]
pub struct LabelRegistry {
    labels_by_kind: HashMap<ServiceKind, BTreeSet<String>>,
    kind_by_label: HashMap<String, ServiceKind>,
}

impl LabelRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table, initialized on first use.
    pub fn builtin() -> &'static LabelRegistry {
        &BUILTIN
    }

    /// A shared handle to the built-in table.
    pub fn shared_builtin() -> Arc<LabelRegistry> {
        Arc::clone(&BUILTIN)
    }

    /// An owned copy of the built-in table, to extend with custom kinds.
    pub fn with_builtin() -> Self {
        LabelRegistry::clone(&BUILTIN)
    }

    /// Associate `label` with `kind`. Registering the same pair twice is a
    /// no-op; claiming a label already owned by another kind fails.
    pub fn register(&mut self, kind: ServiceKind, label: impl Into<String>) -> Result<(), EnvError> {
        let label = label.into();
        if let Some(&existing) = self.kind_by_label.get(&label) {
            if existing == kind {
                return Ok(());
            }
            return Err(EnvError::LabelConflict {
                label,
                existing,
                requested: kind,
            });
        }
        self.labels_by_kind
            .entry(kind)
            .or_default()
            .insert(label.clone());
        self.kind_by_label.insert(label, kind);
        Ok(())
    }

    /// Labels registered for `kind`; `None` if the kind is unknown.
    pub fn labels_for(&self, kind: ServiceKind) -> Option<&BTreeSet<String>> {
        self.labels_by_kind.get(&kind)
    }

    pub fn allows(&self, kind: ServiceKind, label: &str) -> bool {
        self.kind_by_label.get(label) == Some(&kind)
    }

    pub fn kind_for_label(&self, label: &str) -> Option<ServiceKind> {
        self.kind_by_label.get(label).copied()
    }

    pub fn kinds(&self) -> impl Iterator<Item = ServiceKind> + '_ {
        self.labels_by_kind.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_all_rabbit_labels_to_one_kind() {
        let registry = LabelRegistry::builtin();
        let labels: Vec<&str> = registry
            .labels_for(ServiceKind::RABBITMQ)
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(
            labels,
            vec!["rabbitmq-2.4", "rabbitmq-2.4.1", "rabbitmq-srs-2.4.1"]
        );
        for label in labels {
            assert_eq!(registry.kind_for_label(label), Some(ServiceKind::RABBITMQ));
        }
    }

    #[test]
    fn should_register_every_builtin_kind() {
        let registry = LabelRegistry::builtin();
        for kind in [
            ServiceKind::MYSQL,
            ServiceKind::REDIS,
            ServiceKind::MONGODB,
            ServiceKind::POSTGRESQL,
            ServiceKind::RABBITMQ,
        ] {
            assert!(registry.labels_for(kind).is_some_and(|l| !l.is_empty()));
        }
        assert_eq!(registry.kinds().count(), 5);
    }

    #[test]
    fn should_allow_only_the_owning_kind() {
        let registry = LabelRegistry::builtin();
        assert!(registry.allows(ServiceKind::MYSQL, "mysql-5.1"));
        assert!(!registry.allows(ServiceKind::MYSQL, "redis-2.2"));
        assert!(!registry.allows(ServiceKind::MYSQL, "mysql-5.5"));
    }

    #[test]
    fn should_return_none_for_unknown_kind() {
        let registry = LabelRegistry::builtin();
        assert!(registry.labels_for(ServiceKind::new("memcached")).is_none());
    }

    #[test]
    fn should_treat_repeated_registration_as_no_op() {
        let mut registry = LabelRegistry::new();
        registry.register(ServiceKind::REDIS, "redis-2.2").unwrap();
        registry.register(ServiceKind::REDIS, "redis-2.2").unwrap();
        assert_eq!(registry.labels_for(ServiceKind::REDIS).unwrap().len(), 1);
    }

    #[test]
    fn should_reject_label_claimed_by_another_kind() {
        let mut registry = LabelRegistry::with_builtin();
        let err = registry
            .register(ServiceKind::MYSQL, "redis-2.2")
            .unwrap_err();
        assert!(matches!(
            err,
            EnvError::LabelConflict { existing, requested, .. }
                if existing == ServiceKind::REDIS && requested == ServiceKind::MYSQL
        ));
        assert!(!registry.allows(ServiceKind::MYSQL, "redis-2.2"));
    }

    #[test]
    fn should_extend_copy_without_touching_builtin() {
        let mut registry = LabelRegistry::with_builtin();
        registry
            .register(ServiceKind::new("memcached"), "memcached-1.4")
            .unwrap();
        assert!(registry.allows(ServiceKind::new("memcached"), "memcached-1.4"));
        assert!(
            LabelRegistry::builtin()
                .labels_for(ServiceKind::new("memcached"))
                .is_none()
        );
    }
}
