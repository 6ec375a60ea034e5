//! Solving and reducing constraint spaces.
//!
//! [`ac3`] tightens a space's domains to the arc-consistent fixed point;
//! [`solve`] lazily enumerates the solutions of a discrete space by
//! chronological backtracking, optionally with AC-3 lookahead at every
//! assignment.

pub mod ac3;
pub mod error;
pub mod search;

pub use ac3::ac3;
pub use error::SolveError;
pub use search::{solve, Method, Solutions};
