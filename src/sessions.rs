use actix_web::{
    dev::ServiceRequest,
    HttpRequest,
};

use crate::{
    app::App,
    errors::{Error, Outcome},
    hashing,
    maybe_auth::{Auth, MaybeAuth},
    secret::Secret,
    token_actions::AuthTokenAction,
    tokens,
};

/// Verifies an account's password and issues a signed auth token for it.
///
/// On success the token is also queued as an `AuthTokenAction`, so the
/// session middleware will set the auth token cookie on the response; the
/// returned copy is for applications which additionally send the token in
/// the response body, for non-browser clients.
pub async fn login<A: App>(
    app: &A,
    email: &str,
    password: Secret,
    request: &HttpRequest,
) -> Result<Secret, A::Error> {
    let account = match app.get_account_by_email(email).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            log::debug!("Login attempt for unknown email");
            return Error::NoSuchAccount.as_app_err();
        }
        Err(e) => {
            // A store failure answers like an unknown email, so the login
            // form cannot be used to probe store health. The real reason
            // goes to the log.
            log::warn!("Could not look up account by email: {e}");
            return Error::NoSuchAccount.as_app_err();
        }
    };

    hashing::verify_password(&account.password_hash, &password)?;

    let token = tokens::issue(
        app.token_signing_secret(),
        account.id.clone(),
        account.email,
        app.time_now(),
        app.token_expire_after_hours(),
    )?;
    AuthTokenAction::Issue(Secret(token.0.clone()))
        .insert_into_request(request);

    log::debug!("Successful password login for account #{}", account.id);

    Ok(token)
}

/// Verifies a signed auth token and returns the authentication it proves.
/// This is how tokens presented outside the cookie flow, such as in an
/// `Authorization` header by a non-browser client, are checked.
pub fn verify_auth_token<A: App>(app: &A, token: &Secret) -> Result<Auth<A>, A::Error> {
    let claims = tokens::verify::<A::ID>(app.token_signing_secret(), token, app.time_now())?;

    Ok(Auth {
        id: claims.id,
        email: claims.email,
        _deny_public_constructor: (),
    })
}

impl<A: App> MaybeAuth<A> {
    /// Logs out the authenticated account, if there is one, and returns the
    /// outcome to report. Returns `None` if the request was not
    /// authenticated, in which case there is no cookie worth clearing: the
    /// middleware already queues a removal for cookies that fail
    /// verification.
    pub fn logout(self, request: &HttpRequest) -> Option<Outcome> {
        match self {
            MaybeAuth::Authenticated(auth) => Some(auth.logout(request)),
            MaybeAuth::Unauthenticated => None,
        }
    }
}

impl<A: App> Auth<A> {
    /// Logs out this account by telling the client to discard its auth token
    /// cookie.
    ///
    /// The token itself stays cryptographically valid until its expiry; a
    /// copy kept elsewhere would still verify. Logout is only as complete as
    /// the client's willingness to drop the cookie.
    pub fn logout(self, request: &HttpRequest) -> Outcome {
        log::debug!("Logging out account #{}", self.id);

        AuthTokenAction::Revoke
            .insert_into_request(request);

        Outcome::LOGGED_OUT
    }
}

/// Determines the authentication state from the auth token cookie, if any,
/// and queues a cookie removal in case the presented token is expired or
/// otherwise invalid. Purely a signature and expiry check; the store is not
/// consulted.
pub(crate) fn authenticate_by_auth_token<A: App>(
    app: &A,
    request: &ServiceRequest,
) -> MaybeAuth<A> {
    let revoke_cookie = || {
        AuthTokenAction::Revoke
            .insert_into_request(request);
        MaybeAuth::Unauthenticated
    };

    let Some(cookie) = request.cookie(app.auth_token_cookie_name()) else {
        // The visitor has no auth token cookie.
        log::debug!("Request has no auth token cookie");
        return MaybeAuth::Unauthenticated;
    };

    // Sadly, the `actix_web` and `cookie` crates don't provide any API for
    // securely zeroizing cookies after use; this is the best we can easily do.
    let token = Secret(cookie.value().to_string());
    drop(cookie);

    let claims = match tokens::verify::<A::ID>(app.token_signing_secret(), &token, app.time_now()) {
        Ok(claims) => claims,
        Err(Error::TokenExpired) => {
            // An expired cookie is the normal end of a session.
            log::debug!("Auth token has expired; revoking cookie");
            return revoke_cookie();
        }
        Err(e) => {
            // Could be a token signed under a rotated secret, a cookie set
            // by some other application, or an attacker's forgery.
            log::info!("Invalid auth token: {e:?}");
            return revoke_cookie();
        }
    };

    log::debug!("Request authenticated as account #{}", claims.id);

    MaybeAuth::Authenticated(Auth {
        id: claims.id,
        email: claims.email,
        _deny_public_constructor: (),
    })
}
