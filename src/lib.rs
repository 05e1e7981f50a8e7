mod accounts;
mod app;
mod errors;
mod handle;
mod hashing;
mod maybe_auth;
mod middleware;
mod secret;
mod sessions;
mod token_actions;
mod tokens;

pub use accounts::{
    AccountData,
    register_new_account,
};
pub use app::{
    App,
    AppConfig,
    AppStore,
    AppTypes,
};
pub use errors::{
    Error,
    Outcome,
};
pub use handle::AccountHandle;
pub use maybe_auth::{
    Auth,
    MaybeAuth,
    maybe_auth_from_request,
    require_auth_from_request,
};
pub use middleware::middleware;
pub use secret::{
    PasswordHash,
    Secret,
};
pub use sessions::{
    login,
    verify_auth_token,
};

/// OWASP recommend a bcrypt work factor of at least 10 for password storage.
///
/// Note that bcrypt only reads the first 72 bytes of the password; longer
/// passwords are silently truncated by the algorithm.
///
/// See https://cheatsheetseries.owasp.org/cheatsheets/Password_Storage_Cheat_Sheet.html#bcrypt
pub const DEFAULT_PASSWORD_HASH_COST: u32 = 10;
