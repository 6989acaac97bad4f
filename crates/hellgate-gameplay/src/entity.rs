//! Mobile objects and their arena storage.

use std::collections::HashMap;

use bitflags::bitflags;
use hellgate_common::{EntityError, EntityId, Fixed};

/// Result type for arena operations.
pub type EntityResult<T> = Result<T, EntityError>;

bitflags! {
    /// Per-object capability bits.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct MobjFlags: u32 {
        /// Projectile: exempt from friction.
        const MISSILE = 0x0001;
        /// Not pushed by knockback.
        const NO_CLIP = 0x0002;
    }
}

/// Armor worn by a player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ArmorType {
    /// No absorption.
    #[default]
    None,
    /// Absorbs one third of incoming damage.
    Green,
    /// Absorbs one half of incoming damage.
    Blue,
}

impl ArmorType {
    /// Damage absorbed before capping to the armor reserve.
    /// Integer division truncates toward zero.
    #[must_use]
    pub const fn absorption(self, damage: i32) -> i32 {
        match self {
            Self::None => 0,
            Self::Green => damage / 3,
            Self::Blue => damage / 2,
        }
    }
}

/// Player state attached to a subset of mobile objects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    /// Remaining armor reserve, never negative.
    pub armor_points: i32,
    /// Absorption class of the worn armor.
    pub armor_type: ArmorType,
    /// Ignores all damage when set.
    pub god_mode: bool,
}

impl Player {
    /// Creates a player wearing the given armor.
    #[must_use]
    pub const fn with_armor(armor_type: ArmorType, armor_points: i32) -> Self {
        Self {
            armor_points,
            armor_type,
            god_mode: false,
        }
    }
}

/// A simulated object: player, monster, projectile or item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileObject {
    id: EntityId,
    /// X position
    pub x: Fixed,
    /// Y position
    pub y: Fixed,
    /// Z position (height of the feet)
    pub z: Fixed,
    /// X momentum
    pub momx: Fixed,
    /// Y momentum
    pub momy: Fixed,
    /// Z momentum
    pub momz: Fixed,
    /// Height of the supporting surface, supplied by level logic
    pub floorz: Fixed,
    /// Height of the ceiling, supplied by level logic
    pub ceilingz: Fixed,
    /// Capability bits
    pub flags: MobjFlags,
    /// Hit points; zero or below means dead
    pub health: i32,
    /// Mass used for knockback, at least 1
    pub mass: i32,
    /// Chance out of 256 to flinch on a non-lethal hit
    pub pain_chance: u16,
    /// Owning player, if any
    pub player: Option<Player>,
}

impl MobileObject {
    /// Creates an object at a position with default health and mass.
    #[must_use]
    pub fn new(x: Fixed, y: Fixed, z: Fixed) -> Self {
        Self {
            id: EntityId::new(),
            x,
            y,
            z,
            momx: Fixed::ZERO,
            momy: Fixed::ZERO,
            momz: Fixed::ZERO,
            floorz: Fixed::ZERO,
            ceilingz: Fixed::MAX,
            flags: MobjFlags::empty(),
            health: 100,
            mass: 100,
            pain_chance: 0,
            player: None,
        }
    }

    /// Returns the object's unique ID.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Sets health.
    #[must_use]
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    /// Sets capability flags.
    #[must_use]
    pub fn with_flags(mut self, flags: MobjFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets floor and ceiling heights.
    #[must_use]
    pub fn with_bounds(mut self, floorz: Fixed, ceilingz: Fixed) -> Self {
        self.floorz = floorz;
        self.ceilingz = ceilingz;
        self
    }

    /// Sets momentum on all three axes.
    #[must_use]
    pub fn with_momentum(mut self, momx: Fixed, momy: Fixed, momz: Fixed) -> Self {
        self.momx = momx;
        self.momy = momy;
        self.momz = momz;
        self
    }

    /// Sets mass (clamped to at least 1).
    #[must_use]
    pub fn with_mass(mut self, mass: i32) -> Self {
        self.mass = mass.max(1);
        self
    }

    /// Sets pain chance (out of 256).
    #[must_use]
    pub fn with_pain_chance(mut self, pain_chance: u16) -> Self {
        self.pain_chance = pain_chance.min(256);
        self
    }

    /// Attaches a player.
    #[must_use]
    pub fn with_player(mut self, player: Player) -> Self {
        self.player = Some(player);
        self
    }

    /// Alive while health is above zero.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Whether this is a projectile.
    #[must_use]
    pub const fn is_missile(&self) -> bool {
        self.flags.contains(MobjFlags::MISSILE)
    }
}

/// Arena storage for mobile objects.
///
/// Uses a free list for O(1) allocation and deallocation and a map from
/// id to slot for lookup. Iteration follows slot order, so a tick visits
/// objects in a deterministic order.
#[derive(Debug, Default)]
pub struct MobjArena {
    slots: Vec<Option<MobileObject>>,
    free_list: Vec<usize>,
    id_to_index: HashMap<EntityId, usize>,
}

impl MobjArena {
    /// Creates a new empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.id_to_index.len()
    }

    /// Returns true if there are no live objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id_to_index.is_empty()
    }

    /// Returns the total slot count (including free slots).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Inserts an object, reusing a free slot when available.
    ///
    /// A clone of an object that is already in the arena is given a fresh
    /// id; always use the returned id.
    pub fn spawn(&mut self, mut mobj: MobileObject) -> EntityId {
        if self.id_to_index.contains_key(&mobj.id) {
            mobj.id = EntityId::new();
        }
        let id = mobj.id;

        let index = if let Some(free_index) = self.free_list.pop() {
            self.slots[free_index] = Some(mobj);
            free_index
        } else {
            self.slots.push(Some(mobj));
            self.slots.len() - 1
        };

        self.id_to_index.insert(id, index);
        id
    }

    /// Removes an object by ID.
    pub fn despawn(&mut self, id: EntityId) -> EntityResult<MobileObject> {
        let index = self
            .id_to_index
            .remove(&id)
            .ok_or(EntityError::NotFound(id))?;

        let mobj = self.slots[index]
            .take()
            .ok_or(EntityError::AlreadyDespawned(id))?;

        self.free_list.push(index);
        Ok(mobj)
    }

    /// Gets a reference to an object by ID.
    pub fn get(&self, id: EntityId) -> EntityResult<&MobileObject> {
        let index = self.id_to_index.get(&id).ok_or(EntityError::NotFound(id))?;
        self.slots[*index].as_ref().ok_or(EntityError::NotFound(id))
    }

    /// Gets a mutable reference to an object by ID.
    pub fn get_mut(&mut self, id: EntityId) -> EntityResult<&mut MobileObject> {
        let index = self.id_to_index.get(&id).ok_or(EntityError::NotFound(id))?;
        self.slots[*index].as_mut().ok_or(EntityError::NotFound(id))
    }

    /// Checks if an object with the given ID exists.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.id_to_index.contains_key(&id)
    }

    /// Iterates live objects in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &MobileObject> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Mutably iterates live objects in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut MobileObject> {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }
}
