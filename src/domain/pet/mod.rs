pub mod model;
pub mod repository;
pub mod service;

pub use model::{NewPet, Pet, PetChanges, PetCreateReceive, PetPatchReceive};
pub use repository::PetRepository;
pub use service::PetService;
