//! Bitset-based entity/component store generated per simulation
//! schema, plus the query and system-scheduling surface that runs
//! against it.
//!
//! See [`define_world!`] for how a schema turns into a concrete
//! `World` type.

pub mod entity;
pub mod error;
pub mod query;
pub mod storage;
pub mod system;
pub mod world;

pub use entity::{EntityId, GenerationTable, GenerationalEntityId, INVALID_ENTITY};
pub use error::EcsError;
pub use query::{query as run_query, QueryIter, QuerySpec};
pub use storage::ComponentStorage;
pub use system::{Schedule, System};
pub use world::{
    add_component, create_entity, get_component, get_component_mut, has_component, is_active,
    remove_component, set_component, ComponentId, EcsWorld, HasComponent, Rollbackable,
};
