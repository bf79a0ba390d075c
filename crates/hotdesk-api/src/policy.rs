use hotdesk_types::api::Claims;
use hotdesk_types::models::Role;

use crate::error::ApiError;

/// Capability levels a route can demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Authenticated,
    Admin,
}

/// Transport-independent allow/deny decision. Holding valid claims at all is
/// what `Authenticated` means; `Admin` additionally requires the admin role
/// carried in the token.
pub fn allows(claims: &Claims, required: Capability) -> bool {
    match required {
        Capability::Authenticated => true,
        Capability::Admin => claims.role == Role::Admin,
    }
}

/// Handler-facing wrapper: deny becomes a 403.
pub fn authorize(claims: &Claims, required: Capability) -> Result<(), ApiError> {
    if allows(claims, required) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}
