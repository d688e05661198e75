//! Charging Bench Demo
//!
//! Loads a small item family from RON, then walks a player through a few
//! interactions: a drill powered by a worn battery pack, a fluid cell filled
//! from a water source, and a single-use charge that empties the hand.
//!
//! Run with `RUST_LOG=debug` to see the charge and swap transitions.

use anyhow::Result;
use stackcell_behavior::{
    Actor, BehaviorRegistryBuilder, BlockHit, BlockPos, Dispatcher, HookResult, Interaction,
    ItemBehavior, Side, TickContext,
};
use stackcell_core::{
    Catalog, Consumer, EnergySource, EquippedUnit, FluidStack, Unit, CHARGE_SENTINEL,
    UNLIMITED_TIER,
};
use stackcell_script::Loader;
use std::sync::Arc;

const CONTENT: &str = r#"
(
    config: Some((default_stack_limit: 64)),
    kinds: [
        (
            id: "drill",
            name: "Electric Drill",
            electric: Some((capacity: 10000, transfer_limit: 128, min_tier: 1, mode: -1)),
            charged_variant: Some(1),
            empty_variant: Some(0),
        ),
        (
            id: "battery_pack",
            name: "Battery Pack",
            electric: Some((capacity: 60000, transfer_limit: 512, min_tier: 1, mode: -2)),
        ),
        (
            id: "spark_charge",
            name: "Spark Charge",
            electric: Some((capacity: 0, transfer_limit: 0, min_tier: 0, mode: 2500)),
        ),
        (id: "cell", name: "Fluid Cell"),
    ],
    swaps: [
        (
            filled: (kind: "cell", variant: 11),
            empty: Some((kind: "cell", variant: 10)),
            fluid: "water",
            amount: 1000,
        ),
    ],
)
"#;

const EMPTY_DRILL: u16 = 0;
const CHARGED_DRILL: u16 = 1;
const EMPTY_CELL: u16 = 10;
const SPARK: u16 = 20;

// ============================================================================
// Behaviors
// ============================================================================

/// Mines one block per click for a fixed energy cost
struct DrillHead {
    cost: f64,
}

impl ItemBehavior for DrillHead {
    fn on_left_click(&self, unit: &mut Unit, ctx: &mut Interaction<'_>) -> HookResult<bool> {
        Ok(ctx.use_energy(unit, self.cost))
    }

    fn tooltip_lines(&self, _unit: &Unit, mut lines: Vec<String>) -> Vec<String> {
        lines.push(format!("Uses {} EU per block", self.cost));
        lines
    }

    fn tooltip_lines_with_modifier(&self, unit: &Unit, lines: Vec<String>) -> Vec<String> {
        let mut lines = self.tooltip_lines(unit, lines);
        lines.push("Recharges from worn batteries".to_string());
        lines
    }
}

/// An empty drill only reports that it is out of power
struct NoPower;

impl ItemBehavior for NoPower {
    fn is_usable(&self, _unit: &Unit) -> bool {
        false
    }
}

/// Scoops water when used on top of a block
struct Scoop;

impl ItemBehavior for Scoop {
    fn on_item_use_first(
        &self,
        unit: &mut Unit,
        ctx: &mut Interaction<'_>,
        hit: &BlockHit,
    ) -> HookResult<bool> {
        if hit.side != Side::Up {
            return Ok(false);
        }
        Ok(ctx.fluid(unit).fill(&FluidStack::new("water", 1000), true) > 0)
    }
}

/// Releases its whole charge at once
struct Detonate;

impl ItemBehavior for Detonate {
    fn on_left_click(&self, unit: &mut Unit, ctx: &mut Interaction<'_>) -> HookResult<bool> {
        let released = ctx
            .energy(unit)
            .discharge(2500, UNLIMITED_TIER, true, false, false);
        Ok(released > 0)
    }

    fn on_tick(&self, unit: &mut Unit, ctx: &TickContext<'_>) {
        if ctx.selected {
            tracing::info!(quantity = unit.quantity, slot = ctx.slot, "spark charge crackles");
        }
    }
}

// ============================================================================
// Player
// ============================================================================

struct WornBattery {
    catalog: Arc<Catalog>,
    unit: Unit,
}

impl EnergySource for WornBattery {
    fn tier(&self) -> i32 {
        self.catalog.energy_view(&self.unit).tier()
    }

    fn can_provide_energy(&self) -> bool {
        self.catalog.energy_view(&self.unit).can_provide_energy()
    }

    fn discharge(&mut self, amount: i64, tier: i32, ignore_limit: bool, simulate: bool) -> i64 {
        EquippedUnit::new(&self.catalog, &mut self.unit).discharge(amount, tier, ignore_limit, simulate)
    }
}

struct Player {
    armor: Vec<WornBattery>,
    holding: bool,
}

impl Consumer for Player {
    fn equipped_sources(&mut self) -> Vec<&mut dyn EnergySource> {
        self.armor
            .iter_mut()
            .map(|slot| slot as &mut dyn EnergySource)
            .collect()
    }

    fn inventory_changed(&mut self) {
        tracing::debug!("armor inventory changed");
    }
}

impl Actor for Player {
    fn clear_held_unit(&mut self) {
        self.holding = false;
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("=== Stackcell Charging Bench ===\n");

    let mut loader = Loader::new();
    loader.load_str(CONTENT)?;
    let catalog = Arc::new(loader.finish().into_catalog()?);

    let mut registry = BehaviorRegistryBuilder::new();
    registry.add(EMPTY_DRILL, NoPower)?;
    registry.add(CHARGED_DRILL, DrillHead { cost: 750.0 })?;
    registry.add(EMPTY_CELL, Scoop)?;
    registry.add(SPARK, Detonate)?;
    let dispatcher = Dispatcher::new(Arc::new(registry.freeze()), Arc::clone(&catalog));

    // A fully charged battery pack worn as armor
    let mut pack = Unit::new("battery_pack", 0u16);
    catalog
        .energy(&mut pack)
        .charge(CHARGE_SENTINEL, UNLIMITED_TIER, true, false);
    let mut player = Player {
        armor: vec![WornBattery {
            catalog: Arc::clone(&catalog),
            unit: pack,
        }],
        holding: true,
    };

    // Drill
    let mut drill = Unit::new("drill", EMPTY_DRILL);
    println!("Drill before use (usable: {}):", dispatcher.is_usable(&drill));
    for line in dispatcher.tooltip(&drill, false) {
        println!("  {}", line);
    }

    println!("\nMining 5 blocks...\n");
    for block in 1..=5 {
        let mined = dispatcher.left_click(&mut drill, &mut player);
        println!(
            "Block {}: mined={}, drill={} EU, pack={} EU",
            block,
            mined,
            catalog.energy_view(&drill).real_charge(),
            catalog.energy_view(&player.armor[0].unit).real_charge(),
        );
    }

    println!("\nDrill details:");
    for line in dispatcher.tooltip(&drill, true) {
        println!("  {}", line);
    }

    // Fluid cell
    let mut cell = Unit::new("cell", EMPTY_CELL);
    let top = BlockHit::new(BlockPos::new(0, 63, 0), Side::Up, [0.5, 1.0, 0.5]);
    println!("\nScooping water with {}...", cell.key());
    let filled = dispatcher.item_use_first(&mut cell, &mut player, &top);
    println!(
        "  filled={}, now {} holding {:?}",
        filled,
        cell.key(),
        catalog.fluid(&mut cell).content()
    );
    let drained = catalog.fluid(&mut cell).drain(1000, true);
    println!("  poured out {:?}, back to {}", drained, cell.key());

    // Single-use charge
    let mut spark = Unit::new("spark_charge", SPARK);
    dispatcher.tick(&mut spark, 0, true);
    let fired = dispatcher.left_click(&mut spark, &mut player);
    println!(
        "\nSpark charge fired={}, quantity left={}, still holding={}",
        fired, spark.quantity, player.holding
    );

    println!("\n=== Bench Complete ===");
    Ok(())
}
