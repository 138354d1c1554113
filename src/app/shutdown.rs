//! External stop request.
//!
//! A cloneable flag shared between whatever raises the interrupt (stop
//! button ISR on device, test harness on host) and the control loop,
//! which polls it between ticks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal(Arc<AtomicBool>);

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop. Lock-free, callable from interrupt context.
    pub fn trigger(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
