pub mod admin;
pub mod error;
pub mod sessions;

pub use error::AppError;
