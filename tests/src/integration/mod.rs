//! Cross-crate integration suites.

pub mod bus_contract;
pub mod declarations;
