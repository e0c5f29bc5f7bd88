//! User identity and registration.

pub mod model;
pub mod signup;

pub use model::User;
pub use signup::{SignupForm, SignupRequest};
