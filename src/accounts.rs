use crate::{
    app::{App, AppTypes},
    errors::{Error, Outcome},
    hashing,
    secret::{PasswordHash, Secret},
};

/// A credential record: the persisted fields of one account, as stored and
/// returned by the application's `AppStore` implementation.
pub struct AccountData<A: AppTypes> {
    /// The store-assigned id. Never changes once the record is created.
    pub id: A::ID,

    /// The email address the account logs in with. Unique across all
    /// records, enforced by the store.
    pub email: String,

    /// The bcrypt hash of the account's password. The plaintext is never
    /// stored.
    pub password_hash: PasswordHash,

    /// Whether the email address has been verified. No current flow sets
    /// this; it is carried because the stored schema has it.
    pub email_verified: bool,

    /// Identifiers of the websites associated with this account, in the
    /// order they were added.
    pub websites: Vec<String>,

    /// Whether the account has administrator rights.
    pub is_admin: bool,
}

/// Registers a new account with the given email address and password. The
/// password is hashed before anything is stored; the plaintext never leaves
/// this function.
///
/// Neither input is validated here: email format and password strength are
/// the application's concern.
///
/// Returns a 201 `Outcome` on success. Fails with `Error::Hasher` if the
/// password could not be hashed, and with `Error::EmailInUse` if the store
/// refused the insert, most commonly because the email is already
/// registered.
pub async fn register_new_account<A: App>(
    app: &A,
    email: &str,
    password: Secret,
) -> Result<Outcome, A::Error> {
    let hash = hashing::generate_password_hash(&password, app.password_hash_cost())?;

    match app.insert_account(email, hash).await {
        Ok(account_id) => {
            log::info!("Registered new account #{account_id}");
            Ok(Outcome::ACCOUNT_CREATED)
        }
        Err(e) => {
            // Usually the unique index on email rejecting a duplicate; the
            // caller cannot tell other insert failures apart, so keep the
            // store's reason in the log.
            log::warn!("Could not insert new account: {e}");
            Error::EmailInUse.as_app_err()
        }
    }
}
