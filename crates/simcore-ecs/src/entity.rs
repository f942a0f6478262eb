/// A 32-bit entity identifier in `[0, MAX_ENTITIES)`.
///
/// Plain integer, never a pointer; its identity as a conceptual object
/// is the union of the components a `World` has attached to it.
/// Entity ids are reused immediately after `destroy_entity` — see
/// `DESIGN.md`'s note on `GenerationTable` for hosts that need to
/// close that hazard.
pub type EntityId = u32;

/// Sentinel for "no entity".
pub const INVALID_ENTITY: EntityId = u32::MAX;

/// Optional generation counter a host can layer over a `World` to
/// detect the §9 entity-id-reuse hazard: holding an `EntityId` across
/// a `destroy_entity`/`create_entity` pair silently aliases the new
/// entity unless the holder re-validates with `has_component` or a
/// generation check like this one.
///
/// `World` itself never requires this — entity ids stay plain `u32`s
/// per the data model (§3).
#[derive(Clone)]
pub struct GenerationTable {
    generations: Vec<u32>,
}

impl GenerationTable {
    pub fn new(capacity: usize) -> Self {
        GenerationTable { generations: vec![0; capacity] }
    }

    /// Call when an entity is created (including id reuse) to mint a
    /// fresh generation for its slot.
    pub fn bump(&mut self, entity: EntityId) -> u32 {
        let slot = &mut self.generations[entity as usize];
        *slot = slot.wrapping_add(1);
        *slot
    }

    pub fn current(&self, entity: EntityId) -> u32 {
        self.generations[entity as usize]
    }

    /// A generational handle minted from `bump`; compares equal only
    /// if the entity has not been destroyed and recreated since.
    pub fn is_current(&self, entity: EntityId, generation: u32) -> bool {
        self.generations[entity as usize] == generation
    }
}

/// A `(EntityId, generation)` pair for hosts using [`GenerationTable`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct GenerationalEntityId {
    pub entity: EntityId,
    pub generation: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_table_starts_every_slot_at_generation_zero() {
        let table = GenerationTable::new(8);
        assert_eq!(table.current(3), 0);
        assert!(table.is_current(3, 0));
    }

    #[test]
    fn bump_advances_and_returns_the_new_generation() {
        let mut table = GenerationTable::new(8);
        let g1 = table.bump(2);
        assert_eq!(g1, 1);
        assert_eq!(table.current(2), 1);
        let g2 = table.bump(2);
        assert_eq!(g2, 2);
        assert_eq!(table.current(2), 2);
    }

    #[test]
    fn stale_generation_no_longer_compares_current_after_reuse() {
        let mut table = GenerationTable::new(8);
        let handle = GenerationalEntityId { entity: 5, generation: table.bump(5) };
        assert!(table.is_current(handle.entity, handle.generation));

        // Entity 5 is destroyed and its id reused for a new entity.
        table.bump(5);
        assert!(!table.is_current(handle.entity, handle.generation));
    }

    #[test]
    fn bumping_one_slot_does_not_affect_another() {
        let mut table = GenerationTable::new(8);
        table.bump(1);
        assert_eq!(table.current(1), 1);
        assert_eq!(table.current(2), 0);
    }

    #[test]
    fn generational_entity_id_equality_requires_matching_generation() {
        let a = GenerationalEntityId { entity: 4, generation: 1 };
        let b = GenerationalEntityId { entity: 4, generation: 1 };
        let c = GenerationalEntityId { entity: 4, generation: 2 };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
