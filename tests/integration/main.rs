//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  All tests run on the host with no ADC and no
//! network required.

mod dispatch_tests;
mod monitor_service_tests;
