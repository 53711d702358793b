//! Testing utilities for the pinlist crates.
//!
//! [`ListContainerTestRule`] owns a container wired to a recording engine,
//! event sink and frame scheduler, so scenarios can be driven step by step
//! without a platform behind them.

mod fakes;
mod testing;

pub use fakes::*;
pub use testing::*;

/// Sends `log` output to the test writer. A no-op unless the `logging`
/// feature is enabled; safe to call from every test.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::builder().is_test(true).try_init();
    }
}
