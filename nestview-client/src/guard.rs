use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::ClientError;

/// Busy flag allowing at most one submission in flight.
/// Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct SubmissionGuard {
    busy: Arc<AtomicBool>,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the guard busy. Fails with [`ClientError::Busy`] if a [`Ticket`] is still alive.
    pub fn try_begin(&self) -> Result<Ticket, ClientError> {
        match self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Ok(Ticket {
                busy: self.busy.clone(),
            }),
            Err(_) => Err(ClientError::Busy),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof of an ongoing submission. The guard is released when the ticket is dropped,
/// whether the submission succeeded, failed or was abandoned.
#[derive(Debug)]
pub struct Ticket {
    busy: Arc<AtomicBool>,
}

impl Drop for Ticket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_ticket_at_a_time() {
        let guard = SubmissionGuard::new();
        let shared = guard.clone();

        let ticket = guard.try_begin().unwrap();
        assert!(shared.is_busy());
        assert!(matches!(shared.try_begin(), Err(ClientError::Busy)));

        drop(ticket);
        assert!(!guard.is_busy());
        assert!(shared.try_begin().is_ok());
    }
}
