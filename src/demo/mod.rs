//! Small sample collaborators.
//!
//! These give the pipeline realistic code to describe and double as fixtures
//! for the test suite. Nothing in the documentation flow depends on them.

pub mod calculator;
pub mod users;

pub use calculator::{CalcError, Calculator};
pub use users::{User, UserError, UserStore, UserUpdate};
