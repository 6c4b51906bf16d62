//! Collision categories and the Rapier filtering derived from them.
//!
//! | Category     | Bits | Listens for            | Rapier group |
//! |--------------|------|------------------------|--------------|
//! | `None`       | 0    | —                      | —            |
//! | `Projectile` | 1    | `Enemy`                | `GROUP_1`    |
//! | `Enemy`      | 2    | `Projectile`, `Ship`   | `GROUP_2`    |
//! | `Ship`       | 4    | `Enemy`                | `GROUP_3`    |
//!
//! Rapier only reports a contact when each collider's membership intersects
//! the other's filter, so a projectile and the ship never produce a
//! `CollisionEvent` at all.

use bevy::prelude::*;
use bevy_rapier2d::geometry::Group;
use bevy_rapier2d::prelude::*;
use std::ops::BitOr;

/// Disjoint classification of a contact participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionCategory {
    None,
    Projectile,
    Enemy,
    Ship,
}

impl CollisionCategory {
    pub const ALL: [CollisionCategory; 4] = [
        CollisionCategory::None,
        CollisionCategory::Projectile,
        CollisionCategory::Enemy,
        CollisionCategory::Ship,
    ];

    pub const fn bits(self) -> u32 {
        match self {
            CollisionCategory::None => 0,
            CollisionCategory::Projectile => 0b001,
            CollisionCategory::Enemy => 0b010,
            CollisionCategory::Ship => 0b100,
        }
    }

    /// Inverse of [`bits`](Self::bits).  Only exact single-category values map back.
    pub fn from_bits(bits: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.bits() == bits)
    }

    /// Categories this category wants to be notified about on contact.
    pub fn listen_mask(self) -> CategoryMask {
        match self {
            CollisionCategory::None => CategoryMask::NONE,
            CollisionCategory::Projectile | CollisionCategory::Ship => {
                CategoryMask::NONE | CollisionCategory::Enemy
            }
            CollisionCategory::Enemy => CollisionCategory::Projectile | CollisionCategory::Ship,
        }
    }

    pub fn group(self) -> Group {
        Group::from_bits_truncate(self.bits())
    }
}

impl BitOr for CollisionCategory {
    type Output = CategoryMask;

    fn bitor(self, rhs: Self) -> CategoryMask {
        CategoryMask(self.bits() | rhs.bits())
    }
}

/// Set of categories, stored as the OR of their bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CategoryMask(u32);

impl CategoryMask {
    pub const NONE: CategoryMask = CategoryMask(0);

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// `None` is the empty category and is never contained.
    pub const fn contains(self, category: CollisionCategory) -> bool {
        let bits = category.bits();
        bits != 0 && self.0 & bits == bits
    }

    pub fn group(self) -> Group {
        Group::from_bits_truncate(self.0)
    }
}

impl BitOr<CollisionCategory> for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: CollisionCategory) -> CategoryMask {
        CategoryMask(self.0 | rhs.bits())
    }
}

/// True when Rapier would report a contact between the two categories.
pub fn can_contact(a: CollisionCategory, b: CollisionCategory) -> bool {
    a.listen_mask().contains(b) && b.listen_mask().contains(a)
}

/// The collision category of an entity, fixed at spawn time.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[component(immutable)]
pub struct Category(CollisionCategory);

impl Category {
    /// Returns `None` for [`CollisionCategory::None`]: every entity must carry
    /// exactly one real category.
    pub fn new(category: CollisionCategory) -> Option<Self> {
        match category {
            CollisionCategory::None => None,
            other => Some(Self(other)),
        }
    }

    pub const fn ship() -> Self {
        Self(CollisionCategory::Ship)
    }

    pub const fn projectile() -> Self {
        Self(CollisionCategory::Projectile)
    }

    pub const fn enemy() -> Self {
        Self(CollisionCategory::Enemy)
    }

    pub const fn get(self) -> CollisionCategory {
        self.0
    }

    pub fn listen_mask(self) -> CategoryMask {
        self.0.listen_mask()
    }

    /// Rapier membership/filter pair for this category.
    pub fn collision_groups(self) -> CollisionGroups {
        CollisionGroups::new(self.0.group(), self.listen_mask().group())
    }
}

/// Components every contact participant carries alongside its collider.
///
/// All participants are kinematic sensors: Rapier reports the overlap but
/// never pushes bodies apart, and kinematic-kinematic pairs must be enabled
/// explicitly.
pub fn contact_sensor(
    category: Category,
) -> (
    Category,
    CollisionGroups,
    Sensor,
    ActiveEvents,
    ActiveCollisionTypes,
) {
    (
        category,
        category.collision_groups(),
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
        ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_KINEMATIC,
    )
}
