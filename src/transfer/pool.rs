use std::time::Duration;

use super::handle::{HandleState, TransferHandle};
use crate::Result;

/// Status code reported by every pool operation.
pub const STATUS_OK: i32 = 0;

/// Token identifying a handle registered with a [`TransferPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformStatus {
    pub code: i32,
    /// Number of handles driven by the call
    pub processed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completions {
    pub code: i32,
    /// Handles with data ready, in registration order
    pub ready: Vec<HandleId>,
    pub errors: Vec<(HandleId, String)>,
}

/// Sequential stand-in for a multiplexed transfer engine.
///
/// Membership is the list of active handles; `perform_all` drives them one
/// after another in registration order.
#[derive(Debug, Default)]
pub struct TransferPool {
    members: Vec<(HandleId, TransferHandle)>,
    next_id: u64,
}

impl TransferPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, mut handle: TransferHandle) -> HandleId {
        let id = HandleId(self.next_id);
        self.next_id += 1;

        handle.set_state(HandleState::Active);
        self.members.push((id, handle));

        log::trace!("registered {:?}, {} active", id, self.members.len());
        id
    }

    /// Take a handle out of the pool, handing it back to the caller.
    ///
    /// Returns `None` for handles that are not members, so repeated
    /// removal is harmless.
    pub fn deregister(&mut self, id: HandleId) -> Option<TransferHandle> {
        let position = self
            .members
            .iter()
            .position(|(member, _)| *member == id)?;
        let (_, mut handle) = self.members.remove(position);
        handle.set_state(HandleState::Removed);

        log::trace!("deregistered {:?}, {} active", id, self.members.len());
        Some(handle)
    }

    pub fn perform_all(&mut self) -> Result<PerformStatus> {
        let processed = self.members.len();
        for (_, handle) in self.members.iter_mut() {
            handle.perform()?;
        }

        log::debug!("performed {} transfers", processed);
        Ok(PerformStatus {
            code: STATUS_OK,
            processed,
        })
    }

    /// Every active handle is reported as ready on every poll
    pub fn poll_completions(&self) -> Completions {
        Completions {
            code: STATUS_OK,
            ready: self
                .members
                .iter()
                .filter(|(_, handle)| handle.is_active())
                .map(|(id, _)| *id)
                .collect(),
            errors: Vec::new(),
        }
    }

    /// Returns immediately; transfers are already complete
    pub fn wait(&self, _timeout: Duration) {}

    /// Drop every member and empty the pool
    pub fn close(&mut self) {
        for (_, mut handle) in self.members.drain(..) {
            handle.set_state(HandleState::Removed);
            handle.close();
        }
    }

    pub fn handle(&self, id: HandleId) -> Option<&TransferHandle> {
        self.members
            .iter()
            .find(|(member, _)| *member == id)
            .map(|(_, handle)| handle)
    }

    pub fn handle_mut(&mut self, id: HandleId) -> Option<&mut TransferHandle> {
        self.members
            .iter_mut()
            .find(|(member, _)| *member == id)
            .map(|(_, handle)| handle)
    }

    pub fn ids(&self) -> Vec<HandleId> {
        self.members.iter().map(|(id, _)| *id).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
