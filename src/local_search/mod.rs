//! Local search operators for improving vehicle routes.
//!
//! - [`two_opt_improve`] — Intra-route 2-opt segment reversal over direct roads

mod two_opt;

pub use two_opt::{route_cost, two_opt_improve, two_opt_improve_with_limit, DEFAULT_MAX_PASSES};
