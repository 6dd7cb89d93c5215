pub mod health_states;
pub use health_states::*;
pub mod contact_graph;
pub use contact_graph::*;
pub mod small_world;
pub use small_world::*;
pub mod communities;
pub use communities::*;
pub mod game;
pub use game::*;
pub mod options;
pub use options::*;
pub mod errors;
pub use errors::*;
