//! Behavior dispatcher
//!
//! Resolves a unit's chain from its variant and drives one event through it.

use crate::context::{
    Actor, BlockHit, DispenseSource, EntityRef, Interaction, InteractionEvent, Projectile,
    ProjectileOrigin, ProjectileTag, TickContext,
};
use crate::{BehaviorRegistry, HookResult, ItemBehavior};
use stackcell_core::{tooltip, Catalog, StateObserver, Unit, VariantId};
use std::sync::Arc;

/// Drives interaction events through the behavior chains of a registry
///
/// Holds the frozen registry and the catalog; both are shared, so one
/// dispatcher can serve several threads.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<BehaviorRegistry>,
    catalog: Arc<Catalog>,
}

impl Dispatcher {
    pub fn new(registry: Arc<BehaviorRegistry>, catalog: Arc<Catalog>) -> Self {
        Self { registry, catalog }
    }

    pub fn registry(&self) -> &BehaviorRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn chain(&self, variant: VariantId) -> &[Arc<dyn ItemBehavior>] {
        self.registry.chain(variant)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn has_projectile(&self, unit: &Unit, tag: &ProjectileTag) -> bool {
        self.chain(unit.variant)
            .iter()
            .any(|handler| handler.has_projectile(unit, tag))
    }

    /// First projectile offered by the chain
    pub fn projectile(
        &self,
        unit: &Unit,
        tag: &ProjectileTag,
        origin: &ProjectileOrigin,
    ) -> Option<Projectile> {
        self.chain(unit.variant)
            .iter()
            .find_map(|handler| handler.projectile(unit, tag, origin))
    }

    pub fn can_dispense(&self, unit: &Unit, source: &DispenseSource) -> bool {
        self.chain(unit.variant)
            .iter()
            .any(|handler| handler.can_dispense(unit, source))
    }

    /// Dispense `unit`; returns what is left in the dispenser slot
    ///
    /// The first handler that accepts and produces a result wins. Without
    /// one the unit is left untouched.
    pub fn dispense(&self, unit: Unit, source: &DispenseSource) -> Unit {
        for handler in self.chain(unit.variant) {
            if handler.can_dispense(&unit, source) {
                if let Some(rest) = handler.on_dispense(&unit, source) {
                    return rest;
                }
            }
        }
        unit
    }

    /// Whether every handler of the chain allows using the unit
    pub fn is_usable(&self, unit: &Unit) -> bool {
        self.chain(unit.variant)
            .iter()
            .all(|handler| handler.is_usable(unit))
    }

    /// Description lines: the resource lines folded through the chain
    ///
    /// While `modifier_held` each handler contributes its modifier variant.
    pub fn tooltip(&self, unit: &Unit, modifier_held: bool) -> Vec<String> {
        let base = tooltip::resource_lines(&self.catalog, unit);
        self.chain(unit.variant).iter().fold(base, |lines, handler| {
            if modifier_held {
                handler.tooltip_lines_with_modifier(unit, lines)
            } else {
                handler.tooltip_lines(unit, lines)
            }
        })
    }

    /// Tick every handler of the chain
    pub fn tick(&self, unit: &mut Unit, slot: usize, selected: bool) {
        let ctx = TickContext {
            catalog: &self.catalog,
            slot,
            selected,
        };
        for handler in self.chain(unit.variant) {
            handler.on_tick(unit, &ctx);
        }
    }

    // ========================================================================
    // Interactions
    // ========================================================================

    pub fn left_click(&self, unit: &mut Unit, actor: &mut dyn Actor) -> bool {
        self.interact(InteractionEvent::LeftClick, unit, actor, |handler, unit, ctx| {
            handler.on_left_click(unit, ctx)
        })
    }

    pub fn middle_click(&self, unit: &mut Unit, actor: &mut dyn Actor) -> bool {
        self.interact(InteractionEvent::MiddleClick, unit, actor, |handler, unit, ctx| {
            handler.on_middle_click(unit, ctx)
        })
    }

    pub fn left_click_entity(
        &self,
        unit: &mut Unit,
        actor: &mut dyn Actor,
        target: &EntityRef,
    ) -> bool {
        self.interact(InteractionEvent::LeftClickEntity, unit, actor, |handler, unit, ctx| {
            handler.on_left_click_entity(unit, ctx, target)
        })
    }

    pub fn item_use(&self, unit: &mut Unit, actor: &mut dyn Actor, hit: &BlockHit) -> bool {
        self.interact(InteractionEvent::ItemUse, unit, actor, |handler, unit, ctx| {
            handler.on_item_use(unit, ctx, hit)
        })
    }

    pub fn item_use_first(&self, unit: &mut Unit, actor: &mut dyn Actor, hit: &BlockHit) -> bool {
        self.interact(InteractionEvent::ItemUseFirst, unit, actor, |handler, unit, ctx| {
            handler.on_item_use_first(unit, ctx, hit)
        })
    }

    /// Fold the held unit through every handler of the chain
    pub fn right_click(&self, unit: &mut Unit, actor: &mut dyn Actor) {
        self.interact(InteractionEvent::RightClick, unit, actor, |handler, unit, ctx| {
            handler.on_right_click(unit, ctx).map(|()| false)
        });
    }

    /// Run one click or use event
    ///
    /// Drives the equipment recharge and the usability check first, then
    /// walks the chain of the unit's variant until a handler returns `true`.
    /// A fault ends the event as unhandled without clearing the held unit.
    fn interact<F>(
        &self,
        event: InteractionEvent,
        unit: &mut Unit,
        actor: &mut dyn Actor,
        mut hook: F,
    ) -> bool
    where
        F: FnMut(&dyn ItemBehavior, &mut Unit, &mut Interaction<'_>) -> HookResult<bool>,
    {
        let catalog: &Catalog = &self.catalog;
        catalog
            .energy(unit)
            .observed_by(self)
            .use_energy(0.0, &mut *actor);
        self.is_usable(unit);

        let variant = unit.variant;
        let mut ctx = Interaction::new(catalog, &mut *actor, self);
        let mut handled = false;
        for (index, handler) in self.chain(variant).iter().enumerate() {
            match hook(&**handler, &mut *unit, &mut ctx) {
                Ok(true) => {
                    handled = true;
                    break;
                }
                Ok(false) => {}
                Err(fault) => {
                    tracing::error!(
                        %event,
                        %variant,
                        handler = index,
                        behavior = handler.name(),
                        error = %fault,
                        "behavior handler failed"
                    );
                    return false;
                }
            }
        }

        if unit.is_depleted() {
            tracing::debug!(%event, kind = %unit.kind, "held unit used up");
            ctx.actor().clear_held_unit();
        }
        handled
    }
}

impl StateObserver for Dispatcher {
    fn state_changed(&self, unit: &Unit) {
        let usable = self.is_usable(unit);
        tracing::trace!(kind = %unit.kind, variant = %unit.variant, usable, "re-checked usability");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BehaviorRegistryBuilder, HandlerFault};
    use stackcell_core::{Consumer, ElectricStats, UnitKind};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Player {
        cleared: bool,
    }

    impl Consumer for Player {}

    impl Actor for Player {
        fn clear_held_unit(&mut self) {
            self.cleared = true;
        }
    }

    type Log = Arc<Mutex<Vec<&'static str>>>;

    /// Records every call and answers with a fixed result
    struct Recording {
        label: &'static str,
        log: Log,
        result: HookResult<bool>,
    }

    impl ItemBehavior for Recording {
        fn on_left_click(&self, _unit: &mut Unit, _ctx: &mut Interaction<'_>) -> HookResult<bool> {
            self.log.lock().unwrap().push(self.label);
            self.result.clone()
        }

        fn is_usable(&self, _unit: &Unit) -> bool {
            self.label != "veto"
        }

        fn tooltip_lines(&self, _unit: &Unit, mut lines: Vec<String>) -> Vec<String> {
            lines.push(self.label.to_string());
            lines
        }

        fn on_tick(&self, _unit: &mut Unit, _ctx: &TickContext<'_>) {
            self.log.lock().unwrap().push(self.label);
        }
    }

    /// Consumes the held unit on left click
    struct Consume;

    impl ItemBehavior for Consume {
        fn on_left_click(&self, unit: &mut Unit, _ctx: &mut Interaction<'_>) -> HookResult<bool> {
            unit.shrink(1);
            Ok(false)
        }

        fn tooltip_lines_with_modifier(&self, _unit: &Unit, _lines: Vec<String>) -> Vec<String> {
            vec!["details".to_string()]
        }
    }

    fn recording(label: &'static str, log: &Log, result: HookResult<bool>) -> Recording {
        Recording {
            label,
            log: Arc::clone(log),
            result,
        }
    }

    fn dispatcher(builder: BehaviorRegistryBuilder) -> Dispatcher {
        let mut catalog = Catalog::new();
        catalog
            .register_kind(UnitKind::new("wand").with_electric(ElectricStats::new(1000, 100, 1, -1)))
            .unwrap();
        Dispatcher::new(Arc::new(builder.freeze()), Arc::new(catalog))
    }

    #[test]
    fn test_short_circuit_stops_chain() {
        let log = Log::default();
        let mut builder = BehaviorRegistryBuilder::new();
        builder.add(0u16, recording("h1", &log, Ok(false))).unwrap();
        builder.add(0u16, recording("h2", &log, Ok(true))).unwrap();
        builder.add(0u16, recording("h3", &log, Ok(true))).unwrap();
        let dispatcher = dispatcher(builder);

        let mut unit = Unit::new("wand", 0u16);
        let mut player = Player::default();
        assert!(dispatcher.left_click(&mut unit, &mut player));
        assert_eq!(*log.lock().unwrap(), vec!["h1", "h2"]);
        assert!(!player.cleared);
    }

    #[test]
    fn test_fault_ends_event_unhandled() {
        let log = Log::default();
        let mut builder = BehaviorRegistryBuilder::new();
        builder.add(0u16, Consume).unwrap();
        builder
            .add(0u16, recording("h2", &log, Err(HandlerFault::new("boom"))))
            .unwrap();
        builder.add(0u16, recording("h3", &log, Ok(true))).unwrap();
        let dispatcher = dispatcher(builder);

        let mut unit = Unit::new("wand", 0u16);
        let mut player = Player::default();
        assert!(!dispatcher.left_click(&mut unit, &mut player));
        assert_eq!(*log.lock().unwrap(), vec!["h2"]);
        // Earlier effects stay, but a faulted event never clears the slot
        assert!(unit.is_depleted());
        assert!(!player.cleared);
    }

    #[test]
    fn test_depleted_unit_cleared_from_hand() {
        let mut builder = BehaviorRegistryBuilder::new();
        builder.add(0u16, Consume).unwrap();
        let dispatcher = dispatcher(builder);

        let mut unit = Unit::new("wand", 0u16);
        let mut player = Player::default();
        assert!(!dispatcher.left_click(&mut unit, &mut player));
        assert!(player.cleared);
    }

    #[test]
    fn test_usability_needs_every_handler() {
        let log = Log::default();
        let mut builder = BehaviorRegistryBuilder::new();
        builder.add(0u16, recording("ok", &log, Ok(false))).unwrap();
        builder.add(1u16, recording("ok", &log, Ok(false))).unwrap();
        builder.add(1u16, recording("veto", &log, Ok(false))).unwrap();
        let dispatcher = dispatcher(builder);

        assert!(dispatcher.is_usable(&Unit::new("wand", 0u16)));
        assert!(!dispatcher.is_usable(&Unit::new("wand", 1u16)));
        assert!(dispatcher.is_usable(&Unit::new("wand", 2u16)));
    }

    #[test]
    fn test_tick_fans_out() {
        let log = Log::default();
        let mut builder = BehaviorRegistryBuilder::new();
        builder.add(0u16, recording("a", &log, Ok(true))).unwrap();
        builder.add(0u16, recording("b", &log, Ok(true))).unwrap();
        let dispatcher = dispatcher(builder);

        dispatcher.tick(&mut Unit::new("wand", 0u16), 3, true);
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_tooltip_fold_and_modifier() {
        let log = Log::default();
        let mut builder = BehaviorRegistryBuilder::new();
        builder.add(0u16, recording("first", &log, Ok(false))).unwrap();
        builder.add(0u16, Consume).unwrap();
        builder.add(0u16, recording("last", &log, Ok(false))).unwrap();
        let dispatcher = dispatcher(builder);
        let unit = Unit::new("wand", 0u16);

        assert_eq!(
            dispatcher.tooltip(&unit, false),
            vec!["0 / 1000 EU at 32 V", "first", "last"]
        );
        // Handlers without a modifier variant fall back to their normal lines
        assert_eq!(dispatcher.tooltip(&unit, true), vec!["details", "last"]);
    }
}
