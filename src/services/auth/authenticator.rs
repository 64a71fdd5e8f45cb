//! Bearer authentication: header parsing → token verification → store cross-check.
//!
//! Every failure is a typed `AuthError` for logging, but the HTTP layer maps
//! all of them to the same 401.

use axum::http::{HeaderMap, header};
use thiserror::Error;

use crate::repos::PersonRepo;
use crate::services::auth::access_jwt::{AccessJwtError, PersonClaims, TokenVerifier};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingHeader,

    #[error("malformed authorization header")]
    MalformedHeader,

    #[error(transparent)]
    Token(#[from] AccessJwtError),

    #[error("unknown person {id}")]
    UnknownPerson { id: u64 },

    #[error("name claim does not match person {id}")]
    NameMismatch { id: u64 },
}

/// Decides whether a request's headers carry a valid credential.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, headers: &HeaderMap) -> Result<PersonClaims, AuthError>;
}

#[derive(Debug, Clone)]
pub struct BearerAuthenticator {
    verifier: TokenVerifier,
    people: PersonRepo,
}

impl BearerAuthenticator {
    pub fn new(verifier: TokenVerifier, people: PersonRepo) -> Self {
        Self { verifier, people }
    }
}

/// `Bearer <token>` → `<token>`. Anything else (other scheme, missing or
/// extra parts) is rejected.
fn bearer_token(value: &str) -> Result<&str, AuthError> {
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}

impl Authenticator for BearerAuthenticator {
    fn authenticate(&self, headers: &HeaderMap) -> Result<PersonClaims, AuthError> {
        let value = headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingHeader)?
            .to_str()
            .map_err(|_| AuthError::MalformedHeader)?;

        let token = bearer_token(value)?;
        let claims = self.verifier.verify_strict(token)?;

        let person = self
            .people
            .find(claims.id)
            .map_err(|_| AuthError::UnknownPerson { id: claims.id })?;

        if person.name != claims.name {
            return Err(AuthError::NameMismatch { id: claims.id });
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use serde_json::json;

    use super::*;
    use crate::repos::NewPerson;
    use crate::test_support::{OTHER_PRIVATE_KEY_PEM, TEST_PUBLIC_KEY_PEM, token_for};

    fn seeded() -> (BearerAuthenticator, PersonRepo) {
        let people = PersonRepo::new();
        people.save(NewPerson {
            name: "Oguz".to_string(),
            age: 15,
            credential_hash: "x".to_string(),
        });
        let verifier = TokenVerifier::new(TEST_PUBLIC_KEY_PEM).unwrap();
        (BearerAuthenticator::new(verifier, people.clone()), people)
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn accepts_token_matching_stored_person() {
        let (auth, _) = seeded();
        let claims = auth
            .authenticate(&headers(&format!("Bearer {}", token_for(0, "Oguz"))))
            .unwrap();

        assert_eq!(claims.id, 0);
        assert_eq!(claims.name, "Oguz");
    }

    #[test]
    fn tolerates_extra_whitespace() {
        let (auth, _) = seeded();
        let value = format!("Bearer   {}  ", token_for(0, "Oguz"));
        assert!(auth.authenticate(&headers(&value)).is_ok());
    }

    #[test]
    fn rejects_missing_header() {
        let (auth, _) = seeded();
        assert!(matches!(
            auth.authenticate(&HeaderMap::new()),
            Err(AuthError::MissingHeader)
        ));
    }

    #[test]
    fn rejects_other_schemes_and_shapes() {
        let (auth, _) = seeded();
        let token = token_for(0, "Oguz");

        for value in [
            "Basic abc".to_string(),
            "Bearer".to_string(),
            "Bearer ".to_string(),
            token.clone(),
            format!("bearer {token}"),
            format!("Bearer {token} extra"),
        ] {
            assert!(
                matches!(
                    auth.authenticate(&headers(&value)),
                    Err(AuthError::MalformedHeader)
                ),
                "accepted {value:?}"
            );
        }
    }

    #[test]
    fn rejects_wrong_algorithm_family() {
        let (auth, _) = seeded();
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &json!({"id": 0, "name": "Oguz"}),
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(matches!(
            auth.authenticate(&headers(&format!("Bearer {token}"))),
            Err(AuthError::Token(_))
        ));
    }

    #[test]
    fn rejects_foreign_signature() {
        let (auth, _) = seeded();
        let key = EncodingKey::from_ed_pem(OTHER_PRIVATE_KEY_PEM.as_bytes()).unwrap();
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::EdDSA),
            &json!({"id": 0, "name": "Oguz"}),
            &key,
        )
        .unwrap();

        assert!(matches!(
            auth.authenticate(&headers(&format!("Bearer {token}"))),
            Err(AuthError::Token(_))
        ));
    }

    #[test]
    fn rejects_unknown_id() {
        let (auth, _) = seeded();
        assert!(matches!(
            auth.authenticate(&headers(&format!("Bearer {}", token_for(7, "Oguz")))),
            Err(AuthError::UnknownPerson { id: 7 })
        ));
    }

    #[test]
    fn rejects_name_mismatch() {
        let (auth, _) = seeded();
        assert!(matches!(
            auth.authenticate(&headers(&format!("Bearer {}", token_for(0, "Ege")))),
            Err(AuthError::NameMismatch { id: 0 })
        ));
    }

    #[test]
    fn sees_people_saved_after_construction() {
        let (auth, people) = seeded();
        let id = people.save(NewPerson {
            name: "Ege".to_string(),
            age: 20,
            credential_hash: "y".to_string(),
        });

        assert!(
            auth.authenticate(&headers(&format!("Bearer {}", token_for(id, "Ege"))))
                .is_ok()
        );
    }
}
