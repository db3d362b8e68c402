#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod error;
mod password;
mod routes;
mod service;
mod token;

pub use error::AuthError;
pub use routes::endpoint_router;
pub use service::{AuthService, PublicUser, TokenGrant};
pub use token::{SessionClaims, TokenIssuer};
