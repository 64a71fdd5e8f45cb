use serde::Serialize;
use tracing::error;

use crate::error::AppError;
use crate::services::auth::jwt::JwtIssuer;

#[derive(Debug, Serialize)]
struct PersonTokenClaims<'a> {
    id: u64,
    name: &'a str,
    iat: i64,
    exp: i64,
}

/// Issues the token handed back to a client when a person is created.
#[derive(Clone, Debug)]
pub struct TokenIssuer {
    jwt: JwtIssuer,
}

impl TokenIssuer {
    pub fn new(jwt: JwtIssuer) -> Self {
        Self { jwt }
    }

    /// Sign `{id, name}` for a stored person.
    pub fn issue_person_token(&self, id: u64, name: &str) -> Result<String, AppError> {
        let now = chrono::Utc::now().timestamp();
        let exp = i64::try_from(self.jwt.ttl_seconds())
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or_else(|| {
                error!(ttl_seconds = self.jwt.ttl_seconds(), "token expiry out of range");
                AppError::Internal
            })?;

        let claims = PersonTokenClaims {
            id,
            name,
            iat: now,
            exp,
        };

        self.jwt.sign(&claims)
    }
}
