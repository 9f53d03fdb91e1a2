use serde::{Deserialize, Serialize};

/// JWT payload issued by the authentication service.
///
/// `sub` is the user id recorded as a proposal's submitter or reviewer.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    pub admin: bool,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
