//! Wire and on-disk data types.

mod config;
mod ids;
mod resources;

pub use self::config::*;
pub use self::ids::*;
pub use self::resources::*;
