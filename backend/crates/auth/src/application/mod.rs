//! Application Layer
//!
//! Use cases and application services.

pub mod authenticator;
pub mod config;
pub mod current_user;
mod hashing;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod unlock_attempts;

// Re-exports
pub use authenticator::{Authenticator, Identity};
pub use config::AuthConfig;
pub use current_user::GetCurrentUserUseCase;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use unlock_attempts::UnlockAttemptsUseCase;
