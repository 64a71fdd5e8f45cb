pub mod error;
pub mod person_repo;

pub use person_repo::{NewPerson, PersonRepo, PersonRow};
