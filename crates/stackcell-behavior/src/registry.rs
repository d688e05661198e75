//! Behavior registry
//!
//! Chains are assembled with a [`BehaviorRegistryBuilder`] during setup and
//! then frozen into a read-only [`BehaviorRegistry`] that can be shared
//! across dispatch threads.

use crate::{Error, ItemBehavior, Result};
use indexmap::IndexMap;
use stackcell_core::VariantId;
use std::sync::Arc;

/// Lowest variant that cannot carry behaviors
pub const RESERVED_VARIANT_FLOOR: u16 = 32766;

type Chain = Vec<Arc<dyn ItemBehavior>>;

/// Mutable registry used during setup
#[derive(Default)]
pub struct BehaviorRegistryBuilder {
    chains: IndexMap<VariantId, Chain>,
}

impl BehaviorRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler to a variant's chain
    pub fn add(
        &mut self,
        variant: impl Into<VariantId>,
        behavior: impl ItemBehavior + 'static,
    ) -> Result<()> {
        self.add_shared(variant, Arc::new(behavior))
    }

    /// Append a handler that may also sit in other chains
    ///
    /// The same handler may appear several times; order is registration order.
    pub fn add_shared(
        &mut self,
        variant: impl Into<VariantId>,
        behavior: Arc<dyn ItemBehavior>,
    ) -> Result<()> {
        let variant = variant.into();
        if variant.raw() >= RESERVED_VARIANT_FLOOR {
            return Err(Error::ReservedVariant(variant));
        }
        tracing::debug!(%variant, behavior = behavior.name(), "registered behavior");
        self.chains.entry(variant).or_default().push(behavior);
        Ok(())
    }

    /// Number of handlers registered for a variant
    pub fn chain_len(&self, variant: impl Into<VariantId>) -> usize {
        self.chains.get(&variant.into()).map_or(0, Vec::len)
    }

    /// Freeze the registry for dispatch
    pub fn freeze(self) -> BehaviorRegistry {
        let chains = self
            .chains
            .into_iter()
            .map(|(variant, chain)| (variant, chain.into_boxed_slice()))
            .collect();
        BehaviorRegistry { chains }
    }
}

/// Read-only mapping from variant to behavior chain
#[derive(Default)]
pub struct BehaviorRegistry {
    chains: IndexMap<VariantId, Box<[Arc<dyn ItemBehavior>]>>,
}

impl BehaviorRegistry {
    pub fn builder() -> BehaviorRegistryBuilder {
        BehaviorRegistryBuilder::new()
    }

    /// The chain of a variant, empty when nothing is registered
    pub fn chain(&self, variant: VariantId) -> &[Arc<dyn ItemBehavior>] {
        self.chains
            .get(&variant)
            .map(|chain| &chain[..])
            .unwrap_or(&[])
    }

    /// Variants that carry at least one handler, in first-registration order
    pub fn variants(&self) -> impl Iterator<Item = VariantId> + '_ {
        self.chains.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl std::fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (variant, chain) in &self.chains {
            let names: Vec<_> = chain.iter().map(|b| b.name()).collect();
            map.entry(variant, &names);
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;
    impl ItemBehavior for Marker {}

    struct Other;
    impl ItemBehavior for Other {}

    #[test]
    fn test_registration_order_preserved() {
        let mut builder = BehaviorRegistry::builder();
        builder.add(3u16, Marker).unwrap();
        builder.add(3u16, Other).unwrap();
        builder.add(3u16, Marker).unwrap();
        builder.add(1u16, Other).unwrap();
        assert_eq!(builder.chain_len(3u16), 3);

        let registry = builder.freeze();
        let names: Vec<_> = registry
            .chain(VariantId::new(3))
            .iter()
            .map(|b| b.name())
            .collect();
        assert_eq!(names.len(), 3);
        assert!(names[0].ends_with("Marker"));
        assert!(names[1].ends_with("Other"));
        assert!(names[2].ends_with("Marker"));
        assert_eq!(registry.variants().collect::<Vec<_>>(), vec![VariantId::new(3), VariantId::new(1)]);
    }

    #[test]
    fn test_reserved_variants_rejected() {
        let mut builder = BehaviorRegistryBuilder::new();
        assert!(builder.add(RESERVED_VARIANT_FLOOR - 1, Marker).is_ok());
        assert_eq!(
            builder.add(RESERVED_VARIANT_FLOOR, Marker),
            Err(Error::ReservedVariant(VariantId::new(RESERVED_VARIANT_FLOOR)))
        );
        assert_eq!(
            builder.add(u16::MAX, Marker),
            Err(Error::ReservedVariant(VariantId::new(u16::MAX)))
        );
        assert_eq!(builder.freeze().len(), 1);
    }

    #[test]
    fn test_shared_handler_in_several_chains() {
        let shared: Arc<dyn ItemBehavior> = Arc::new(Marker);
        let mut builder = BehaviorRegistryBuilder::new();
        builder.add_shared(0u16, Arc::clone(&shared)).unwrap();
        builder.add_shared(1u16, Arc::clone(&shared)).unwrap();
        let registry = builder.freeze();

        assert!(Arc::ptr_eq(&registry.chain(VariantId::new(0))[0], &registry.chain(VariantId::new(1))[0]));
        assert!(registry.chain(VariantId::new(2)).is_empty());
    }
}
