pub mod extract;
pub mod password;
pub mod token;
pub mod types;
pub mod users;

pub use extract::{AdminUser, AuthUser};
pub use token::TokenIssuer;
pub use types::PublicUser;
pub use users::UserDirectory;
