//! Write-side workflows shared by the HTTP handlers.

pub mod accounts;
pub mod adoption;
pub mod profile;
