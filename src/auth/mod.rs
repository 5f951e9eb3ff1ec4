pub mod current_user;
pub mod jwt;
pub mod password;

pub use current_user::AuthenticatedUser;
