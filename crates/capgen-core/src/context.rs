use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated identity attached to a request by the bearer-auth
/// middleware
///
/// Carries only what the verified token proves; handlers that need the
/// full user record load it from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User ID from the token `sub` claim
    pub id: Uuid,
    /// Email from the token claims
    pub email: String,
}
