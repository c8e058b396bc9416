pub mod failures;
pub mod requests;
pub mod responses;

pub use failures::AuthFailure;
pub use requests::{LoginRequest, PasswordResetConfirmRequest, PasswordResetRequest, SignupRequest};
pub use responses::{LoginResponse, PasswordResetResponse, RefreshTokenResponse};
