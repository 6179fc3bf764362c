pub mod core;
pub mod events;
pub mod history;

pub use self::core::*;
pub use events::*;
pub use history::*;
