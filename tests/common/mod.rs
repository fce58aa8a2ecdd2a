//! Common test utilities and mock implementations

pub mod mock_interface;
pub mod test_utils;

#[allow(unused_imports)]
pub use mock_interface::{MockError, MockInterface, Operation};
pub use test_utils::{MockDelay, create_mock_driver};
