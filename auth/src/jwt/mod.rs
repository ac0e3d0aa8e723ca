pub mod claims;
pub mod errors;
pub mod service;
pub mod settings;

pub use claims::TokenClaims;
pub use errors::SecretKeyError;
pub use errors::TokenError;
pub use service::SignedToken;
pub use service::TokenService;
pub use settings::SecretKey;
pub use settings::TokenSettings;
