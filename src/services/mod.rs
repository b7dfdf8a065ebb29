pub mod media;
pub use media::{MediaError, MediaStore};

pub mod mailer;
pub use mailer::Mailer;

pub mod token;
pub use token::{Claims, JwtManager};

pub mod password_reset;
pub mod password_reset_impl;
pub use password_reset::{PasswordResetError, PasswordResetService};
pub use password_reset_impl::SeaOrmPasswordResetService;
