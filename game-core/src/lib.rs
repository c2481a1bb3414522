pub mod requests;
pub mod sanitize;
pub mod validation;

// Re-export main components
pub use requests::*;
pub use sanitize::*;
pub use validation::*;
