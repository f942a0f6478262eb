//! The per-schema `World` type and the traits that make component
//! access and rollback snapshotting generic over it.
//!
//! Converted from the teacher's `game_api.rs` export table: instead of
//! a single fixed `edict_t` struct with every field a game might ever
//! want, each schema gets its own generated `World` whose component set
//! is exactly what that simulation declares. `define_world!` is the
//! macro that generates it (the source engine's closest analogue is
//! `dispatch.rs`'s table-of-function-pointers construction, here
//! replaced by a table of trait impls the compiler resolves instead of
//! a vtable the CPU dispatches through).

use crate::entity::EntityId;
use crate::error::EcsError;
use simcore_bitset::BitsetLike;

/// A generated `World`'s fixed shape: an entity-capacity and the
/// bitset type sized for it.
pub trait EcsWorld: Sized {
    type Bits: BitsetLike;

    fn active(&self) -> &Self::Bits;
    fn active_mut(&mut self) -> &mut Self::Bits;
    fn capacity(&self) -> usize;
}

/// Implemented once per `(World, ComponentType)` pair by
/// `define_world!`. The generic ECS operations (`add_component`,
/// queries, ...) are written once against this trait and monomorphize
/// per schema — resolved entirely at compile time, so there is no
/// runtime branch on "which component type is this."
pub trait HasComponent<T: Copy>: EcsWorld {
    fn storage(&self) -> &crate::storage::ComponentStorage<T, Self::Bits>;
    fn storage_mut(&mut self) -> &mut crate::storage::ComponentStorage<T, Self::Bits>;
}

/// Human-readable name for a component type within a world, used only
/// for diagnostics (log lines, panic messages) — never for dispatch.
pub trait ComponentId<W> {
    const NAME: &'static str;
}

/// Anything a rollback ring can snapshot and restore byte-for-byte.
///
/// Lives in this crate rather than in the rollback crate so the
/// rollback crate can depend on the ECS crate without a cycle: the
/// ECS crate knows how to copy itself without allocating, the rollback
/// crate only knows how to schedule those copies into a ring.
pub trait Rollbackable {
    /// Overwrite `self` with `other`'s contents. Must not allocate
    /// once both sides have been constructed at full capacity.
    fn copy_from(&mut self, other: &Self);
    /// Upper bound on the bytes a single snapshot occupies, used by the
    /// rollback ring's eager `FrameTooLarge` check.
    fn byte_size(&self) -> usize;
}

/// Entity allocation is schema-independent: it only touches the
/// `active` bitset, so it is written once here instead of being
/// regenerated per world by the macro.
pub fn create_entity<W: EcsWorld>(world: &mut W) -> Result<EntityId, EcsError> {
    let cap = world.capacity() as u32;
    match world.active().first_clear_from(0) {
        Some(id) if id < cap => {
            world.active_mut().set(id);
            Ok(id)
        }
        _ => Err(EcsError::EntityLimitExceeded),
    }
}

#[inline]
pub fn is_active<W: EcsWorld>(world: &W, entity: EntityId) -> bool {
    (entity as usize) < world.capacity() && world.active().test(entity)
}

/// Generic add/get/remove over a single component type, written once
/// against [`HasComponent`] and reused by every schema.
pub fn add_component<W, T>(world: &mut W, entity: EntityId, value: T) -> Result<(), EcsError>
where
    W: HasComponent<T>,
    T: Copy,
{
    if !is_active(world, entity) {
        return Err(EcsError::InvalidEntity);
    }
    world.storage_mut().insert(entity, value)
}

pub fn set_component<W, T>(world: &mut W, entity: EntityId, value: T) -> Result<(), EcsError>
where
    W: HasComponent<T>,
    T: Copy,
{
    if !is_active(world, entity) {
        return Err(EcsError::InvalidEntity);
    }
    world.storage_mut().insert_or_replace(entity, value);
    Ok(())
}

pub fn remove_component<W, T>(world: &mut W, entity: EntityId) -> bool
where
    W: HasComponent<T>,
    T: Copy,
{
    world.storage_mut().remove(entity)
}

pub fn get_component<'w, W, T>(world: &'w W, entity: EntityId) -> Option<&'w T>
where
    W: HasComponent<T>,
    T: Copy,
{
    world.storage().get(entity)
}

pub fn get_component_mut<'w, W, T>(world: &'w mut W, entity: EntityId) -> Option<&'w mut T>
where
    W: HasComponent<T>,
    T: Copy,
{
    world.storage_mut().get_mut(entity)
}

pub fn has_component<W, T>(world: &W, entity: EntityId) -> bool
where
    W: HasComponent<T>,
    T: Copy,
{
    world.storage().has(entity)
}

/// Generates a `World` struct for a fixed component schema: the
/// storage fields, the `EcsWorld`/`HasComponent<T>`/`ComponentId<W>`
/// impls, `destroy_entity` (the one entity-allocator operation that
/// *is* schema-dependent, since it must clear every component table),
/// and `Rollbackable`.
///
/// ```ignore
/// simcore_ecs::define_world! {
///     pub struct DemoWorld {
///         bits: simcore_bitset::BitSet1024,
///         capacity: 1024,
///         components: {
///             position: Position,
///             velocity: Velocity,
///         }
///     }
/// }
/// ```
#[macro_export]
macro_rules! define_world {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            bits: $bits:ty,
            capacity: $capacity:expr,
            components: {
                $( $field:ident : $ty:ty ),+ $(,)?
            }
        }
    ) => {
        #[derive(Clone)]
        $(#[$meta])*
        $vis struct $name {
            active: $bits,
            $( $field: $crate::storage::ComponentStorage<$ty, $bits>, )+
        }

        impl $name {
            pub fn new() -> Self {
                use simcore_bitset::BitsetLike;
                $name {
                    active: <$bits as BitsetLike>::default(),
                    $( $field: $crate::storage::ComponentStorage::new($capacity), )+
                }
            }

            /// Deactivates `entity` and removes it from every
            /// component table. Returns `false` if it was not active.
            pub fn destroy_entity(&mut self, entity: $crate::entity::EntityId) -> bool {
                use simcore_bitset::BitsetLike;
                if !$crate::world::is_active(self, entity) {
                    return false;
                }
                self.active.unset(entity);
                $( self.$field.remove(entity); )+
                true
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::new()
            }
        }

        impl $crate::world::EcsWorld for $name {
            type Bits = $bits;

            #[inline]
            fn active(&self) -> &$bits {
                &self.active
            }

            #[inline]
            fn active_mut(&mut self) -> &mut $bits {
                &mut self.active
            }

            #[inline]
            fn capacity(&self) -> usize {
                $capacity
            }
        }

        $(
            impl $crate::world::HasComponent<$ty> for $name {
                #[inline]
                fn storage(&self) -> &$crate::storage::ComponentStorage<$ty, $bits> {
                    &self.$field
                }

                #[inline]
                fn storage_mut(&mut self) -> &mut $crate::storage::ComponentStorage<$ty, $bits> {
                    &mut self.$field
                }
            }

            impl $crate::world::ComponentId<$name> for $ty {
                const NAME: &'static str = stringify!($ty);
            }
        )+

        impl $crate::world::Rollbackable for $name {
            fn copy_from(&mut self, other: &Self) {
                self.active = other.active;
                $( self.$field.copy_from(&other.$field); )+
            }

            fn byte_size(&self) -> usize {
                std::mem::size_of::<$bits>()
                    $( + self.$field.byte_size() )+
            }
        }
    };
}
