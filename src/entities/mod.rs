pub mod adoption_application;
pub mod animal;
pub mod shelter;
pub mod user;
pub mod user_profile;

pub use adoption_application::Entity as AdoptionApplication;
pub use animal::Entity as Animal;
pub use shelter::Entity as Shelter;
pub use user::Entity as User;
pub use user_profile::Entity as UserProfile;
