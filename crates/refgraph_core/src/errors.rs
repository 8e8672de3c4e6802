//! Error surface for tracker operations.

use std::fmt;

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Which argument of a tracker call held the invalid handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleRole {
    /// The sole handle argument of a single-handle operation.
    Operand,
    /// The source side of `refer_to`.
    Referer,
    /// The target side of `refer_to`.
    Referee,
}

impl HandleRole {
    fn as_str(&self) -> &'static str {
        match self {
            HandleRole::Operand => "object",
            HandleRole::Referer => "referer object",
            HandleRole::Referee => "referee object",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerError {
    /// The handle's identifier is not in the object table: it was never
    /// allocated, or the object has already been reclaimed.
    UnknownObject { id: usize, role: HandleRole },
    /// `decrease_root_count` was called on an object whose root count is
    /// already zero.
    NegativeRootCount { id: usize },
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::UnknownObject { id, role } => {
                write!(f, "{} id not found: {id}", role.as_str())
            }
            TrackerError::NegativeRootCount { id } => {
                write!(f, "root count already zero for object id {id}")
            }
        }
    }
}

impl std::error::Error for TrackerError {}
