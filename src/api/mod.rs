pub mod adoption;
pub mod animals;
pub mod applications;
pub mod auth;
pub mod error;
pub mod middleware;
pub mod profile;
pub mod recommendations;
pub mod shelters;
