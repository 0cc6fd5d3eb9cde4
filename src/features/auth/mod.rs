mod jwks;
mod validator;

pub mod dto;
pub mod handler;
pub mod model;
pub mod routes;

use async_trait::async_trait;

use crate::core::error::Result;
use model::Session;

pub use jwks::JwksClient;
pub use validator::JwtValidator;

/// Turns a bearer token into a `Session`.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Session>;
}
