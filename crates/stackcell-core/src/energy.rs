//! Energy resource
//!
//! Charge, discharge and use of a unit's electrical store. All transfer
//! math is integer and saturating; refused transfers return 0 and leave the
//! unit untouched.
//!
//! ```text
//!            set_charge(level > 0)
//!   Empty  ───────────────────────▶  Charged
//!          ◀───────────────────────
//!            set_charge(0)
//! ```
//!
//! The transition is marked by switching the unit to the kind's
//! `charged_variant` / `empty_variant`.

use crate::catalog::{StateObserver, UnitKind};
use crate::equipment::Consumer;
use crate::{ElectricStats, EngineConfig, EnergyMode, Refusal, Unit, CHARGE_SENTINEL, UNLIMITED_TIER};

/// Read-only energy queries over a unit
#[derive(Debug, Clone, Copy)]
pub struct EnergyView<'a> {
    unit: &'a Unit,
    stats: Option<&'a ElectricStats>,
}

impl<'a> EnergyView<'a> {
    pub(crate) fn new(unit: &'a Unit, stats: Option<&'a ElectricStats>) -> Self {
        Self { unit, stats }
    }

    pub fn stats(&self) -> Option<&'a ElectricStats> {
        self.stats
    }

    /// Absolute capacity, 0 without stats
    pub fn max_charge(&self) -> i64 {
        self.stats.map_or(0, ElectricStats::max_charge)
    }

    /// Transfer limit as reported to other networks
    pub fn transfer_limit(&self) -> i64 {
        self.stats.map_or(0, ElectricStats::reported_transfer_limit)
    }

    /// Minimum tier, or `UNLIMITED_TIER` without stats
    pub fn tier(&self) -> i32 {
        self.stats.map_or(UNLIMITED_TIER, |s| s.min_tier)
    }

    /// Whether this unit can act as an energy source for others
    pub fn can_provide_energy(&self) -> bool {
        match self.stats.map(|s| s.mode) {
            Some(EnergyMode::Fixed(v)) if v > 0 => true,
            Some(EnergyMode::ChargeOnly | EnergyMode::Unlimited) => self.unit.is_single(),
            _ => false,
        }
    }

    /// Current charge: the fixed yield for consumables, else the stored level
    pub fn real_charge(&self) -> i64 {
        match self.stats {
            None => 0,
            Some(stats) => match stats.mode.fixed_yield() {
                Some(v) => v,
                None => i64::try_from(self.unit.state.charge_level()).unwrap_or(i64::MAX),
            },
        }
    }

    /// Whether at least `amount` is stored
    pub fn can_use(&self, amount: f64) -> bool {
        self.real_charge() as f64 >= amount
    }
}

/// Energy operations over a single unit
pub struct EnergyResource<'a> {
    unit: &'a mut Unit,
    kind: Option<&'a UnitKind>,
    config: &'a EngineConfig,
    observer: Option<&'a dyn StateObserver>,
}

impl<'a> EnergyResource<'a> {
    pub(crate) fn new(unit: &'a mut Unit, kind: Option<&'a UnitKind>, config: &'a EngineConfig) -> Self {
        Self {
            unit,
            kind,
            config,
            observer: None,
        }
    }

    /// Notify `observer` whenever the stored charge is rewritten
    pub fn observed_by(mut self, observer: &'a dyn StateObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    fn stats(&self) -> Option<&'a ElectricStats> {
        self.kind.and_then(|k| k.electric.as_ref())
    }

    /// Read-only view of the same unit
    pub fn view(&self) -> EnergyView<'_> {
        EnergyView::new(&*self.unit, self.stats())
    }

    pub fn unit(&self) -> &Unit {
        &*self.unit
    }

    pub fn max_charge(&self) -> i64 {
        self.view().max_charge()
    }

    pub fn transfer_limit(&self) -> i64 {
        self.view().transfer_limit()
    }

    pub fn tier(&self) -> i32 {
        self.view().tier()
    }

    pub fn can_provide_energy(&self) -> bool {
        self.view().can_provide_energy()
    }

    pub fn real_charge(&self) -> i64 {
        self.view().real_charge()
    }

    pub fn can_use(&self, amount: f64) -> bool {
        self.view().can_use(amount)
    }

    /// Add up to `requested` energy; returns the amount actually stored
    ///
    /// The stored level never exceeds the kind's charge ceiling.
    /// Requires `min_tier <= tier`, a single unit, and a mode that accepts
    /// charge (rechargeable, unlimited, or any store when `requested` is
    /// the sentinel).
    pub fn charge(&mut self, requested: i64, tier: i32, ignore_limit: bool, simulate: bool) -> i64 {
        let Some(stats) = self.stats() else {
            Refusal::MissingStats.report("charge");
            return 0;
        };
        if stats.min_tier > tier {
            Refusal::InvalidTier {
                required: stats.min_tier,
                offered: tier,
            }
            .report("charge");
            return 0;
        }
        let accepts = matches!(stats.mode, EnergyMode::Rechargeable | EnergyMode::Unlimited)
            || (stats.mode.raw() < 0 && requested == CHARGE_SENTINEL);
        if !accepts {
            Refusal::ModeForbids(stats.mode.raw()).report("charge");
            return 0;
        }
        if !self.unit.is_single() {
            Refusal::InvalidQuantity(self.unit.quantity).report("charge");
            return 0;
        }

        let requested = requested.max(0);
        let transfer = if ignore_limit {
            requested
        } else {
            stats.transfer_limit.min(requested)
        };
        let before = self.real_charge();
        let after = stats.charge_ceiling().min(before.saturating_add(transfer));
        if after <= before {
            return 0;
        }
        if !simulate {
            self.set_charge(after);
            return self.real_charge() - before;
        }
        after - before
    }

    /// Remove up to `requested` energy; returns the amount actually removed
    ///
    /// Fixed-yield consumables ignore the stored level: a request of at least
    /// the yield consumes one unit of the stack and returns the yield.
    pub fn discharge(
        &mut self,
        requested: i64,
        tier: i32,
        ignore_limit: bool,
        battery_like: bool,
        simulate: bool,
    ) -> i64 {
        let Some(stats) = self.stats() else {
            Refusal::MissingStats.report("discharge");
            return 0;
        };
        if stats.min_tier > tier {
            Refusal::InvalidTier {
                required: stats.min_tier,
                offered: tier,
            }
            .report("discharge");
            return 0;
        }
        if battery_like && !self.can_provide_energy() {
            Refusal::NotProvider.report("discharge");
            return 0;
        }

        if let Some(yield_amount) = stats.mode.fixed_yield() {
            if requested < yield_amount || self.unit.quantity < 1 {
                return 0;
            }
            if !simulate {
                self.unit.shrink(1);
                tracing::debug!(kind = %self.unit.kind, remaining = self.unit.quantity, "consumed fixed-yield unit");
            }
            return yield_amount;
        }

        if !self.unit.is_single() {
            Refusal::InvalidQuantity(self.unit.quantity).report("discharge");
            return 0;
        }

        let requested = requested.max(0);
        let transfer = if ignore_limit {
            requested
        } else {
            stats.transfer_limit.min(requested)
        };
        let before = self.real_charge();
        let after = before.saturating_sub(transfer).max(0);
        if !simulate {
            self.set_charge(after);
        }
        before - after
    }

    /// Overwrite the stored charge level
    ///
    /// Fails for fixed-yield kinds. The level is clamped into
    /// `[0, charge_ceiling]`, and the unit switches to the kind's charged or
    /// empty variant depending on the result.
    pub fn set_charge(&mut self, level: i64) -> bool {
        let Some(kind) = self.kind else {
            return false;
        };
        let Some(stats) = kind.electric.as_ref() else {
            return false;
        };
        if stats.mode.fixed_yield().is_some() {
            return false;
        }

        let was_charged = self.unit.state.has_charge();
        let level = level.clamp(0, stats.charge_ceiling());
        if level > 0 {
            self.unit.state.set_charge_level(level as u64);
            if let Some(variant) = kind.charged_variant {
                self.unit.variant = variant;
            }
        } else {
            self.unit.state.clear_charge();
            if let Some(variant) = kind.empty_variant {
                self.unit.variant = variant;
            }
        }
        if was_charged != (level > 0) {
            tracing::debug!(kind = %kind.id, level, variant = %self.unit.variant, "charge sub-state changed");
        }

        if let Some(observer) = self.observer {
            observer.state_changed(&*self.unit);
        }
        true
    }

    /// Spend `amount` energy on behalf of `consumer`
    ///
    /// Tops up from the consumer's equipped sources before and after the
    /// attempt. Consumers with an unlimited supply always succeed for free.
    /// When the full amount cannot be delivered the partial discharge is
    /// still committed and `false` is returned.
    pub fn use_energy<C>(&mut self, amount: f64, consumer: &mut C) -> bool
    where
        C: Consumer + ?Sized,
    {
        self.charge_from_equipment(consumer);
        if consumer.has_unlimited_supply() {
            return true;
        }

        let requested = amount as i64;
        let simulated = self.discharge(requested, UNLIMITED_TIER, true, false, true);
        let satisfied = (simulated as f64 - amount).abs() < self.config.use_tolerance();
        self.discharge(requested, UNLIMITED_TIER, true, false, false);
        self.charge_from_equipment(consumer);
        satisfied
    }

    /// Pull charge from every eligible source the consumer has equipped
    ///
    /// A source is eligible when it can provide energy and its tier is at
    /// least this unit's tier.
    pub fn charge_from_equipment<C>(&mut self, consumer: &mut C)
    where
        C: Consumer + ?Sized,
    {
        if !self.config.recharge_from_equipment() || !consumer.is_authoritative() {
            return;
        }
        if self.stats().is_none() {
            return;
        }

        let tier = self.tier();
        let mut recharged = false;
        for source in consumer.equipped_sources() {
            if !source.can_provide_energy() || source.tier() < tier {
                continue;
            }
            let wanted = self.charge(CHARGE_SENTINEL - 1, UNLIMITED_TIER, true, true);
            if wanted <= 0 {
                break;
            }
            let drawn = source.discharge(wanted, UNLIMITED_TIER, true, false);
            if drawn > 0 {
                self.charge(drawn, UNLIMITED_TIER, true, false);
                recharged = true;
            }
        }
        if recharged {
            consumer.inventory_changed();
        }
    }
}
