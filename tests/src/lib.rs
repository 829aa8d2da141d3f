//! # Component Events Test Suite
//!
//! Unified test crate exercising the workspace crates together.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── bus_contract.rs   # emit/on/once/off guarantees of the shared bus
//!     ├── lifecycle.rs      # component creation/destruction wiring
//!     └── declarations.rs   # configuration-sourced handler declarations
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p events-tests
//!
//! # By suite
//! cargo test -p events-tests integration::lifecycle::
//! ```

pub mod integration;
