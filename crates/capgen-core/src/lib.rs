mod context;
mod error;

pub use context::CurrentUser;
pub use error::HttpError;
