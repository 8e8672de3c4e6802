//! Handles naming tracked objects.

/// Handle to a tracked object.
///
/// A handle is a plain lookup key into a [`Tracker`](crate::Tracker) and
/// carries no ownership. It may outlive the object it names; a stale handle
/// is only detected when it is passed back to a tracker operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

impl Handle {
    pub fn new(id: usize) -> Self {
        Handle(id)
    }

    /// Returns the raw numeric identifier for logging or external maps.
    pub fn id(&self) -> usize {
        self.0
    }
}
