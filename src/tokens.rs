use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    errors::Error,
    secret::Secret,
};

/// The claims carried by an auth token: the account's id and email, plus the
/// standard issued-at and expiry timestamps in seconds since the Unix epoch.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims<ID> {
    pub(crate) id: ID,
    pub(crate) email: String,
    pub(crate) iat: u64,
    pub(crate) exp: u64,
}

/// Signs a new auth token (an HS256 JWT) embedding the account's id and
/// email, expiring `expire_after_hours` hours after `now`.
pub(crate) fn issue<ID: Serialize>(
    signing_secret: &Secret,
    id: ID,
    email: String,
    now: u64,
    expire_after_hours: u64,
) -> Result<Secret, Error> {
    let claims = Claims {
        id,
        email,
        iat: now,
        exp: now + 3600 * expire_after_hours,
    };

    let key = EncodingKey::from_secret(signing_secret.0.as_bytes());
    let token = jsonwebtoken::encode(&Header::default(), &claims, &key)
        .map_err(Error::Token)?;

    Ok(Secret(token))
}

/// Verifies an auth token's signature and decodes its claims, then checks
/// its expiry against `now`.
///
/// The expiry check is made here against the caller's clock, rather than by
/// the JWT library against the ambient system time, so that a token issued
/// at time T is accepted strictly within [T, T + expiry) and rejected from
/// the expiry instant onwards.
pub(crate) fn verify<ID: DeserializeOwned>(
    signing_secret: &Secret,
    token: &Secret,
    now: u64,
) -> Result<Claims<ID>, Error> {
    let key = DecodingKey::from_secret(signing_secret.0.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;

    let data = jsonwebtoken::decode::<Claims<ID>>(&token.0, &key, &validation)
        .map_err(Error::Token)?;

    let claims = data.claims;
    if now >= claims.exp {
        return Err(Error::TokenExpired);
    }

    Ok(claims)
}
