use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::github::transport::Transport;

/// Single entry point to the transport. Counts every access for diagnostics.
pub struct ApiFacade {
    transport: Arc<dyn Transport>,
    calls: AtomicUsize,
}

impl ApiFacade {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call(&self) -> &dyn Transport {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.transport.as_ref()
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}
