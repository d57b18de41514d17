pub mod application_mapper;
pub mod pet_mapper;

pub use application_mapper::ApplicationMapper;
pub use pet_mapper::PetMapper;
