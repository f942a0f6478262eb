use std::fmt;

/// Errors raised by fallible `FP` operations.
///
/// Mirrors the error taxonomy for the fixed-point layer: `DomainError`
/// for `sqrt` of a negative value, `ln`/`log2`/`log10` of a non-positive
/// value, and `pow` with a non-positive base; `DivideByZero` for
/// division/modulo by zero; `OverflowError` for `exp` beyond its
/// clamped domain. The fixed-point layer never logs — callers decide
/// how to surface these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpError {
    /// Operand outside the function's mathematical domain
    /// (negative `sqrt`, non-positive `ln`, non-positive `pow` base).
    DomainError,
    /// Division or modulo with a zero denominator.
    DivideByZero,
    /// `exp` argument exceeded the representable clamp.
    OverflowError,
}

impl fmt::Display for FpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FpError::DomainError => write!(f, "fixed-point operand outside function domain"),
            FpError::DivideByZero => write!(f, "fixed-point division by zero"),
            FpError::OverflowError => write!(f, "fixed-point exp argument overflowed"),
        }
    }
}

impl std::error::Error for FpError {}
