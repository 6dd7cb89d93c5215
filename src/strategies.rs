pub mod policies;
pub use policies::*;
