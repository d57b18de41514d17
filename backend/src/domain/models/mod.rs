pub mod application;
pub mod ids;
pub mod pet;

pub use application::*;
pub use ids::*;
pub use pet::*;
