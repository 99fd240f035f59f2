//! Safe SQL builder: identifiers are fixed table/column names, values always bound as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
