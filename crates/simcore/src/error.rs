use std::fmt;

use simcore_ecs::EcsError;
use simcore_fixed::FpError;
use simcore_rollback::RollbackError;

/// Unified error type across the three fallible subsystems, composed
/// the way the teacher's `RenderError` composes lower-level failures:
/// one enum, manual `Display`/`Error`, and a `From` impl per source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    Fp(FpError),
    Ecs(EcsError),
    Rollback(RollbackError),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Fp(e) => write!(f, "fixed-point error: {e}"),
            SimError::Ecs(e) => write!(f, "ecs error: {e}"),
            SimError::Rollback(e) => write!(f, "rollback error: {e}"),
        }
    }
}

impl std::error::Error for SimError {}

impl From<FpError> for SimError {
    fn from(e: FpError) -> Self {
        SimError::Fp(e)
    }
}

impl From<EcsError> for SimError {
    fn from(e: EcsError) -> Self {
        SimError::Ecs(e)
    }
}

impl From<RollbackError> for SimError {
    fn from(e: RollbackError) -> Self {
        SimError::Rollback(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_impls_wrap_each_source_error() {
        let e: SimError = FpError::DivideByZero.into();
        assert_eq!(e, SimError::Fp(FpError::DivideByZero));
        let e: SimError = EcsError::InvalidEntity.into();
        assert_eq!(e, SimError::Ecs(EcsError::InvalidEntity));
        let e: SimError = RollbackError::SlotOutOfRange.into();
        assert_eq!(e, SimError::Rollback(RollbackError::SlotOutOfRange));
    }

    #[test]
    fn display_mentions_the_source_subsystem() {
        let e: SimError = FpError::DomainError.into();
        assert!(e.to_string().contains("fixed-point"));
    }
}
