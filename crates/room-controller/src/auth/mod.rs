//! Access-token issuance and verification.

mod token;

pub use token::{TokenService, TOKEN_VALIDITY_SECONDS};
