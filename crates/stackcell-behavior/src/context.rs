//! Interaction context handed to behavior hooks

use stackcell_core::{
    Catalog, Consumer, EnergyResource, FluidResource, StateObserver, Unit, UnitKey,
};
use std::fmt;

/// Integer block coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Face of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Down,
    Up,
    North,
    South,
    West,
    East,
    Unknown,
}

impl Side {
    /// Side from its ordinal (0 = down ... 5 = east)
    pub fn from_ordinal(ordinal: u8) -> Self {
        match ordinal {
            0 => Side::Down,
            1 => Side::Up,
            2 => Side::North,
            3 => Side::South,
            4 => Side::West,
            5 => Side::East,
            _ => Side::Unknown,
        }
    }
}

/// Where a use event hit a block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockHit {
    pub pos: BlockPos,
    pub side: Side,
    /// Hit point relative to the block origin
    pub offset: [f32; 3],
}

impl BlockHit {
    pub fn new(pos: BlockPos, side: Side, offset: [f32; 3]) -> Self {
        Self { pos, side, offset }
    }
}

/// An entity targeted by a left click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub id: u64,
}

/// Projectile category a unit may be asked to act as
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectileTag(pub String);

impl ProjectileTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }
}

/// Where a projectile is spawned from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileOrigin {
    /// Fired from a fixed point, e.g. by a dispenser
    At { x: f64, y: f64, z: f64 },
    /// Shot by an entity with the given speed
    Shooter { entity: EntityRef, speed: f32 },
}

/// A projectile produced by a behavior
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub tag: ProjectileTag,
    /// Unit the projectile was made from
    pub source: UnitKey,
    pub origin: ProjectileOrigin,
}

/// A block that dispenses units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispenseSource {
    pub pos: BlockPos,
    pub facing: Side,
}

/// Whoever interacts with a held unit
pub trait Actor: Consumer {
    /// Remove the held unit once it is used up
    fn clear_held_unit(&mut self);
}

/// Which interaction is being dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionEvent {
    LeftClick,
    MiddleClick,
    LeftClickEntity,
    ItemUse,
    ItemUseFirst,
    RightClick,
}

impl fmt::Display for InteractionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InteractionEvent::LeftClick => "left_click",
            InteractionEvent::MiddleClick => "middle_click",
            InteractionEvent::LeftClickEntity => "left_click_entity",
            InteractionEvent::ItemUse => "item_use",
            InteractionEvent::ItemUseFirst => "item_use_first",
            InteractionEvent::RightClick => "right_click",
        };
        f.write_str(name)
    }
}

/// Context of one click or use event
///
/// Resource views opened through the context re-check the unit's usability
/// whenever its charge or fluid content changes.
pub struct Interaction<'a> {
    catalog: &'a Catalog,
    actor: &'a mut dyn Actor,
    observer: &'a dyn StateObserver,
}

impl<'a> Interaction<'a> {
    pub(crate) fn new(
        catalog: &'a Catalog,
        actor: &'a mut dyn Actor,
        observer: &'a dyn StateObserver,
    ) -> Self {
        Self {
            catalog,
            actor,
            observer,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn actor(&mut self) -> &mut dyn Actor {
        &mut *self.actor
    }

    /// Energy operations on `unit`
    pub fn energy<'u>(&self, unit: &'u mut Unit) -> EnergyResource<'u>
    where
        'a: 'u,
    {
        self.catalog.energy(unit).observed_by(self.observer)
    }

    /// Fluid operations on `unit`
    pub fn fluid<'u>(&self, unit: &'u mut Unit) -> FluidResource<'u>
    where
        'a: 'u,
    {
        self.catalog.fluid(unit).observed_by(self.observer)
    }

    /// Spend energy from `unit` on behalf of the actor
    pub fn use_energy(&mut self, unit: &mut Unit, amount: f64) -> bool {
        let catalog = self.catalog;
        catalog
            .energy(unit)
            .observed_by(self.observer)
            .use_energy(amount, &mut *self.actor)
    }
}

/// Context of a tick update
pub struct TickContext<'a> {
    pub catalog: &'a Catalog,
    /// Inventory slot of the unit
    pub slot: usize,
    /// Whether the unit is the one currently held
    pub selected: bool,
}
