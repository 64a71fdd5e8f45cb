/// Factory: build auth services from application `Config`.
///
/// Key material that does not parse is a configuration error, not a runtime one.
use std::sync::Arc;

use tracing::warn;

use crate::config::{Config, ConfigError};
use crate::repos::PersonRepo;
use crate::services::auth::{
    Authenticator, BearerAuthenticator, JwtIssuer, TokenIssuer, TokenVerifier,
};

pub fn build_authenticator(
    config: &Config,
    people: PersonRepo,
) -> Result<Arc<dyn Authenticator>, ConfigError> {
    let verifier = TokenVerifier::new(&config.jwt_public_key_pem).map_err(|e| {
        warn!(error = %e, "failed to parse JWT public key PEM (expected Ed25519 SPKI PEM)");
        ConfigError::Invalid("JWT_PUBLIC_KEY_PEM")
    })?;

    Ok(Arc::new(BearerAuthenticator::new(verifier, people)))
}

pub fn build_token_issuer(config: &Config) -> Result<Arc<TokenIssuer>, ConfigError> {
    let jwt = JwtIssuer::new(&config.jwt_private_key_pem, config.token_ttl_seconds).map_err(
        |e| {
            warn!(error = %e, "failed to parse JWT private key PEM (expected Ed25519 PKCS#8 PEM)");
            ConfigError::Invalid("JWT_PRIVATE_KEY_PEM")
        },
    )?;

    Ok(Arc::new(TokenIssuer::new(jwt)))
}
