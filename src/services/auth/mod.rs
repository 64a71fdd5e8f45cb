pub mod access_jwt;
pub mod authenticator;
pub mod factory;
pub mod jwt;
pub mod token_issuer;

pub use access_jwt::TokenVerifier;
pub use authenticator::{Authenticator, BearerAuthenticator};
pub use factory::{build_authenticator, build_token_issuer};
pub use jwt::JwtIssuer;
pub use token_issuer::TokenIssuer;
