pub mod game;
pub mod user;
pub mod errors;

// Re-export all types
pub use game::*;
pub use user::*;
pub use errors::*;
