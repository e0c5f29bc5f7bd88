//! Login payloads and the credential bundle.

pub mod credentials;
pub mod expiry;
pub mod token;

pub use credentials::CredentialBundle;
pub use token::{IssuedToken, LoginRequest, LoginResponse, TokenPair};
