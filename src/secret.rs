use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secret string (a password, a session token, or a hash). Use
/// `Secret::from` to convert a `String` to a `Secret`, and `secret.expose()`
/// to access the string value where necessary.
///
/// Secrets are redacted in `std::fmt::Debug` displays, and are automatically
/// zeroed-out in memory when the value is dropped.
pub struct Secret(pub(crate) String);

/// A stored password hash. Use `PasswordHash::from` to convert a `String` to
/// a `PasswordHash`, and `hash.expose()` to access the string value where
/// necessary (e.g. when persisting the hash in the credential store).
///
/// Hashes are redacted in `std::fmt::Debug` displays, and are automatically
/// zeroed-out in memory when the value is dropped.
pub struct PasswordHash(pub(crate) Secret);

impl Secret {
    /// Make use of this secret as a `&str`. This may be needed when sending a
    /// secret to the client, or storing a hashed secret in the database.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl ZeroizeOnDrop for Secret {}

impl PasswordHash {
    /// Make use of this password hash as a `&str`. This may be needed when
    /// storing in the database.
    pub fn expose(&self) -> &str {
        self.0.expose()
    }
}

impl From<String> for Secret {
    fn from(string: String) -> Self {
        Self(string)
    }
}

impl From<String> for PasswordHash {
    fn from(string: String) -> Self {
        Self(Secret(string))
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[SECRET]")
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[SECRET]")
    }
}

impl<'de> serde::Deserialize<'de> for Secret {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)
            .map(Self::from)
    }
}

impl<'de> serde::Deserialize<'de> for PasswordHash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Secret::deserialize(deserializer)
            .map(Self)
    }
}
