pub mod chart;
pub mod config;
pub mod dimensional;
pub mod error;
pub mod filter;
pub mod hotspot;
pub mod partition;
pub mod prelude;
pub mod reduce;
pub mod selection;
