use std::fmt;

/// Errors raised by [`crate::RollbackRing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackError {
    /// A frame's `byte_size()` exceeded the ring's configured
    /// `MAX_BYTES`. Checked eagerly, before any slot is touched, so a
    /// rejected save leaves the ring exactly as it was (all-or-nothing).
    FrameTooLarge { size: usize, max: usize },
    /// The requested frame was never saved, has already been evicted
    /// by ring wraparound, or is at or before the confirmed floor.
    SlotOutOfRange,
}

impl fmt::Display for RollbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollbackError::FrameTooLarge { size, max } => {
                write!(f, "frame size {size} exceeds ring limit {max}")
            }
            RollbackError::SlotOutOfRange => write!(f, "requested frame is not available"),
        }
    }
}

impl std::error::Error for RollbackError {}
