use crate::{
    accounts::AccountData,
    errors::Error,
    secret::{PasswordHash, Secret},
    DEFAULT_PASSWORD_HASH_COST,
};

pub trait App: AppConfig + AppStore + AppTypes + Clone + 'static {
    /// Returns the current time, in seconds since the Unix epoch.
    ///
    /// Token expiry is checked against this clock, not against the ambient
    /// system time.
    fn time_now(&self) -> u64;
}

pub trait AppTypes: Sized {
    /// The type of an account id in the credential store; usually `String`,
    /// holding an ObjectId-style opaque value assigned by the store when the
    /// record is created.
    ///
    /// Ids are embedded in auth token claims, so they must serialize and
    /// deserialize.
    type ID: Clone
        + Eq
        + std::fmt::Display
        + serde::Serialize
        + for<'de> serde::Deserialize<'de>
        + Send
        + Sync
        + 'static;

    /// A type representing an application error. This must support conversion
    /// from `accountlogic::Error`.
    type Error: From<Error> + actix_web::ResponseError;
}

/// This trait defines functions which provide configuration parameters to
/// the account library. All configuration is loaded by the application once
/// at startup and treated as immutable for the process lifetime; the library
/// never reads the environment itself.
pub trait AppConfig {
    /// Returns the secret used to sign and verify auth tokens.
    fn token_signing_secret(&self) -> &Secret;

    /// Returns the bcrypt cost factor used when hashing a new password.
    ///
    /// Default is 10, as in `DEFAULT_PASSWORD_HASH_COST`.
    fn password_hash_cost(&self) -> u32 {
        DEFAULT_PASSWORD_HASH_COST
    }

    /// Returns the number of hours after which an auth token expires. Tokens
    /// are not renewed; after expiry the user must log in again.
    ///
    /// Default is 1 day.
    fn token_expire_after_hours(&self) -> u64 {
        1 * 24
    }

    /// Returns the name of the cookie which holds the auth token.
    ///
    /// Default is `"authToken"`.
    fn auth_token_cookie_name(&self) -> &str {
        "authToken"
    }

    /// Indicates whether a `Same-Site: strict` header should be sent with the
    /// auth token cookie. If `false`, a `Same-Site: lax` header will be sent
    /// instead.
    ///
    /// Default is `true`.
    fn auth_token_cookie_same_site_strict(&self) -> bool {
        true
    }
}

/// This trait defines functions which will be used by the account library to
/// store and retrieve credential records.
///
/// The implementation owns its database handle; establishing the connection
/// (once, at process startup) and dealing with connection failures are the
/// application's concern, not this library's.
#[trait_variant::make(Send)]
pub trait AppStore: AppTypes {
    /// Gets an account's record, including its password hash, by its id.
    ///
    /// Returns `None` if there is no account with that id.
    async fn get_account_by_id(
        &self,
        account_id: &Self::ID,
    ) -> Result<Option<AccountData<Self>>, Self::Error>;

    /// Gets an account's record, including its password hash, by exact match
    /// on its email address.
    ///
    /// Returns `None` if there is no account with that email.
    async fn get_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountData<Self>>, Self::Error>;

    /// Inserts a new account record with the given email and password hash,
    /// returning the new record's store-assigned id. The remaining fields
    /// take their defaults: unverified, no websites, not an admin.
    ///
    /// The store must enforce a unique index on email: inserting a record
    /// whose email is already registered must fail. That index is also what
    /// makes concurrent registrations of the same email safe, since at most
    /// one of them can succeed.
    async fn insert_account(
        &self,
        email: &str,
        password_hash: PasswordHash,
    ) -> Result<Self::ID, Self::Error>;

    /// Deletes an account record by its id, returning whether a record was
    /// actually removed.
    async fn delete_account_by_id(&self, account_id: &Self::ID) -> Result<bool, Self::Error>;
}
