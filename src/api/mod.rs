pub mod core;
pub mod models;
pub mod stats;

pub use self::core::*;
pub use models::*;
pub use stats::*;
