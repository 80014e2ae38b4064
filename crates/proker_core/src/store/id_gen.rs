//! Timestamp-derived program identifiers.

use crate::model::program::ProgramId;

/// Issues epoch-millisecond identifiers, strictly increasing per generator.
///
/// Two creations inside the same millisecond get consecutive values instead
/// of colliding. Uniqueness across processes sharing one storage slot is not
/// guaranteed.
#[derive(Debug, Clone, Default)]
pub struct ProgramIdGenerator {
    last_issued: ProgramId,
}

impl ProgramIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an externally known id so later ids stay above it.
    pub fn observe(&mut self, id: ProgramId) {
        self.last_issued = self.last_issued.max(id);
    }

    /// Issues the next id as if the clock read `now_ms`.
    ///
    /// Returns `None` once `i64::MAX` has been issued or observed; the
    /// generator state is left unchanged in that case.
    pub fn next_at(&mut self, now_ms: i64) -> Option<ProgramId> {
        let id = if now_ms > self.last_issued {
            now_ms
        } else {
            self.last_issued.checked_add(1)?
        };
        self.last_issued = id;
        Some(id)
    }
}
