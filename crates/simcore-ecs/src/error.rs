use std::fmt;

/// Errors raised by the ECS operation surface (§7).
///
/// `ComponentNotRegistered` is part of the taxonomy for documentation
/// completeness, but in this implementation a request for an
/// unregistered component type is a *compile* error — there is no
/// `HasComponent<T>` impl to call, so the program never builds, and
/// this variant is never constructed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcsError {
    /// `create_entity`/`add_component` with no free capacity.
    EntityLimitExceeded,
    /// Operation targeted an entity not currently in `active`.
    InvalidEntity,
    /// `add_component` on an entity that already has this component.
    /// See `DESIGN.md` for why this is an error rather than a no-op.
    ComponentAlreadyPresent,
    /// Requested a component type outside the compile-time schema.
    /// Never produced at runtime; see the type-level note above.
    #[allow(dead_code)]
    ComponentNotRegistered,
}

impl fmt::Display for EcsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcsError::EntityLimitExceeded => write!(f, "entity capacity exhausted"),
            EcsError::InvalidEntity => write!(f, "entity is not active"),
            EcsError::ComponentAlreadyPresent => {
                write!(f, "component already present on this entity")
            }
            EcsError::ComponentNotRegistered => write!(f, "component type not in schema"),
        }
    }
}

impl std::error::Error for EcsError {}
