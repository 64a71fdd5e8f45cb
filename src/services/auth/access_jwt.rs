use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::{error::Error as StdError, fmt};

// Errors returned by token verification + strict claim validation.
#[derive(Debug)]
pub enum AccessJwtError {
    Jwt(jsonwebtoken::errors::Error),
    EmptyClaim(&'static str),
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

/// Claims carried by a person token.
///
/// `id` and `name` are required and typed; a token missing either (or carrying
/// the wrong JSON type) fails to deserialize and is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersonClaims {
    pub id: u64,
    pub name: String,

    #[serde(default)]
    pub exp: Option<u64>,
}

/// EdDSA (Ed25519) token verifier.
///
/// - The accepted algorithm is pinned to EdDSA; the token header's `alg` is
///   only checked against it, never trusted.
/// - `exp` is optional but validated when present.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(public_key_pem: &str) -> Result<Self, String> {
        let decoding_key = DecodingKey::from_ed_pem(public_key_pem.as_bytes())
            .map_err(|e| format!("invalid ed25519 public key pem: {}", e))?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.required_spec_claims.clear();
        validation.validate_aud = false;
        validation.leeway = 0;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    // Verify and decode a person token.
    pub fn verify(&self, token: &str) -> Result<PersonClaims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<PersonClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify + strict claim validation.
    ///
    /// `jsonwebtoken::Validation` already checks the signature, the pinned
    /// algorithm and `exp` (when present). This additionally rejects an empty `name`.
    pub fn verify_strict(&self, token: &str) -> Result<PersonClaims, AccessJwtError> {
        let claims = self.verify(token)?;

        if claims.name.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("name"));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header, errors::ErrorKind};
    use serde_json::json;

    use super::*;
    use crate::test_support::{OTHER_PRIVATE_KEY_PEM, TEST_PRIVATE_KEY_PEM, TEST_PUBLIC_KEY_PEM};

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(TEST_PUBLIC_KEY_PEM).unwrap()
    }

    fn sign_ed(private_pem: &str, claims: &serde_json::Value) -> String {
        let key = EncodingKey::from_ed_pem(private_pem.as_bytes()).unwrap();
        jsonwebtoken::encode(&Header::new(Algorithm::EdDSA), claims, &key).unwrap()
    }

    fn jwt_kind(err: AccessJwtError) -> ErrorKind {
        match err {
            AccessJwtError::Jwt(e) => e.into_kind(),
            other => panic!("expected jwt error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_token_without_exp() {
        let token = sign_ed(TEST_PRIVATE_KEY_PEM, &json!({"id": 0, "name": "Oguz"}));
        let claims = verifier().verify_strict(&token).unwrap();

        assert_eq!(claims.id, 0);
        assert_eq!(claims.name, "Oguz");
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn rejects_expired_token() {
        let exp = chrono::Utc::now().timestamp() - 60;
        let token = sign_ed(
            TEST_PRIVATE_KEY_PEM,
            &json!({"id": 0, "name": "Oguz", "exp": exp}),
        );

        let err = verifier().verify_strict(&token).unwrap_err();
        assert!(matches!(jwt_kind(err), ErrorKind::ExpiredSignature));
    }

    #[test]
    fn rejects_token_signed_by_another_key() {
        let token = sign_ed(OTHER_PRIVATE_KEY_PEM, &json!({"id": 0, "name": "Oguz"}));

        let err = verifier().verify_strict(&token).unwrap_err();
        assert!(matches!(jwt_kind(err), ErrorKind::InvalidSignature));
    }

    #[test]
    fn rejects_hmac_token() {
        let key = EncodingKey::from_secret(TEST_PUBLIC_KEY_PEM.as_bytes());
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &json!({"id": 0, "name": "Oguz"}),
            &key,
        )
        .unwrap();

        assert!(verifier().verify_strict(&token).is_err());
    }

    #[test]
    fn rejects_missing_or_mistyped_claims() {
        let v = verifier();

        for claims in [
            json!({"name": "Oguz"}),
            json!({"id": 0}),
            json!({"id": "0", "name": "Oguz"}),
            json!({"id": -1, "name": "Oguz"}),
            json!({"id": 0, "name": 42}),
        ] {
            let token = sign_ed(TEST_PRIVATE_KEY_PEM, &claims);
            assert!(v.verify_strict(&token).is_err(), "accepted {claims}");
        }
    }

    #[test]
    fn rejects_empty_name() {
        let token = sign_ed(TEST_PRIVATE_KEY_PEM, &json!({"id": 0, "name": "  "}));

        assert!(matches!(
            verifier().verify_strict(&token),
            Err(AccessJwtError::EmptyClaim("name"))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(verifier().verify_strict("not-a-jwt").is_err());
        assert!(verifier().verify_strict("").is_err());
    }

    #[test]
    fn invalid_public_key_is_an_error() {
        assert!(TokenVerifier::new("not a pem").is_err());
    }
}
