//! Test utilities and helper functions

use crate::common::mock_interface::MockInterface;
use bma023::Bma023Driver;

/// Mock delay implementation for testing
///
/// Returns immediately and records every requested delay in milliseconds.
#[derive(Debug, Clone, Default)]
pub struct MockDelay {
    /// Requested delays, in order
    pub delays_ms: Vec<u32>,
}

impl MockDelay {
    /// Create a delay with an empty record
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all requested delays
    #[allow(dead_code)]
    pub fn total_ms(&self) -> u32 {
        self.delays_ms.iter().sum()
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_ms.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.delays_ms.push(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }
}

/// Create a mock driver for testing
/// Returns (driver, interface) where interface is a clone that shares state with the driver
#[cfg(not(feature = "async"))]
#[allow(dead_code)]
pub fn create_mock_driver() -> (Bma023Driver<MockInterface>, MockInterface) {
    let interface = MockInterface::new();
    let interface_clone = interface.clone();
    let driver = Bma023Driver::new(interface).expect("Failed to create mock driver");
    interface_clone.clear_operations();
    (driver, interface_clone)
}

/// Create a mock driver for async testing
#[cfg(feature = "async")]
#[allow(dead_code)]
pub async fn create_mock_driver() -> (Bma023Driver<MockInterface>, MockInterface) {
    let interface = MockInterface::new();
    let interface_clone = interface.clone();
    let driver = Bma023Driver::new(interface)
        .await
        .expect("Failed to create mock driver");
    interface_clone.clear_operations();
    (driver, interface_clone)
}
