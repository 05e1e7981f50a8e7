use crate::{
    errors::Error,
    secret::{PasswordHash, Secret},
};

/// Checks a password against a stored bcrypt hash, returning `Ok` if the
/// password is correct and `Err(Error::IncorrectPassword)` otherwise.
///
/// The comparison is delegated to the bcrypt library's own verify primitive;
/// implementations must never compare hash strings directly.
///
/// Also returns an error if the stored hash is malformed.
pub(crate) fn verify_password(stored_hash: &PasswordHash, given_password: &Secret) -> Result<(), Error> {
    let correct = bcrypt::verify(given_password.0.as_bytes(), stored_hash.expose())
        .map_err(Error::Hasher)?;

    if correct {
        Ok(())
    } else {
        Err(Error::IncorrectPassword)
    }
}

/// Computes a salted bcrypt hash of the given password, which can be stored
/// in the database. The cost factor determines the CPU cost of each hashing
/// operation; `AppConfig::password_hash_cost` supplies it.
///
/// bcrypt only considers the first 72 bytes of the password; longer inputs
/// are silently truncated by the algorithm.
///
/// This function cannot be used to compare a password against a stored hash;
/// instead, use the `verify_password` function.
pub(crate) fn generate_password_hash(new_password: &Secret, cost: u32) -> Result<PasswordHash, Error> {
    let hash = bcrypt::hash(new_password.0.as_bytes(), cost)
        .map_err(Error::Hasher)?;

    Ok(PasswordHash::from(hash))
}
