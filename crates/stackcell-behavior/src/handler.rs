//! The behavior handler trait
//!
//! Every hook has a no-op default, so a handler only implements the events
//! it cares about.

use crate::context::{
    BlockHit, DispenseSource, EntityRef, Interaction, Projectile, ProjectileOrigin, ProjectileTag,
    TickContext,
};
use crate::HookResult;
use stackcell_core::Unit;

/// A pluggable handler in a variant's behavior chain
///
/// Click and use hooks return a [`HookResult`]; returning `Ok(true)` marks
/// the event handled and stops the chain.
pub trait ItemBehavior: Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn has_projectile(&self, _unit: &Unit, _tag: &ProjectileTag) -> bool {
        false
    }

    fn projectile(
        &self,
        _unit: &Unit,
        _tag: &ProjectileTag,
        _origin: &ProjectileOrigin,
    ) -> Option<Projectile> {
        None
    }

    fn can_dispense(&self, _unit: &Unit, _source: &DispenseSource) -> bool {
        false
    }

    /// Dispense from `unit`; returns what is left in the dispenser slot
    ///
    /// Only called when [`ItemBehavior::can_dispense`] returned `true`.
    fn on_dispense(&self, _unit: &Unit, _source: &DispenseSource) -> Option<Unit> {
        None
    }

    /// Veto usability of the unit
    fn is_usable(&self, _unit: &Unit) -> bool {
        true
    }

    fn on_left_click(&self, _unit: &mut Unit, _ctx: &mut Interaction<'_>) -> HookResult<bool> {
        Ok(false)
    }

    fn on_middle_click(&self, _unit: &mut Unit, _ctx: &mut Interaction<'_>) -> HookResult<bool> {
        Ok(false)
    }

    fn on_left_click_entity(
        &self,
        _unit: &mut Unit,
        _ctx: &mut Interaction<'_>,
        _target: &EntityRef,
    ) -> HookResult<bool> {
        Ok(false)
    }

    fn on_item_use(
        &self,
        _unit: &mut Unit,
        _ctx: &mut Interaction<'_>,
        _hit: &BlockHit,
    ) -> HookResult<bool> {
        Ok(false)
    }

    /// Runs before the target block reacts to the use
    fn on_item_use_first(
        &self,
        _unit: &mut Unit,
        _ctx: &mut Interaction<'_>,
        _hit: &BlockHit,
    ) -> HookResult<bool> {
        Ok(false)
    }

    /// Transform the held unit; every handler runs in order
    ///
    /// Replace `*unit` to swap the held unit for another one.
    fn on_right_click(&self, _unit: &mut Unit, _ctx: &mut Interaction<'_>) -> HookResult<()> {
        Ok(())
    }

    fn on_tick(&self, _unit: &mut Unit, _ctx: &TickContext<'_>) {}

    /// Rewrite the description lines accumulated so far
    fn tooltip_lines(&self, _unit: &Unit, lines: Vec<String>) -> Vec<String> {
        lines
    }

    /// Variant of [`ItemBehavior::tooltip_lines`] used while the modifier is held
    fn tooltip_lines_with_modifier(&self, unit: &Unit, lines: Vec<String>) -> Vec<String> {
        self.tooltip_lines(unit, lines)
    }
}
