use actix_web::http::StatusCode;

#[derive(Debug)]
pub enum Error {
    /// Indicates that the record for an account id could not be found when an
    /// `AccountHandle` tried to hydrate. The handle might have been built
    /// from a token which outlived its account, or the store might be
    /// inconsistent.
    AccountDataNotFound {account_id: String},

    /// Indicates that the store could not remove the record for an account
    /// id: either no record with that id exists, or the store reported an
    /// error. The store error, if any, is logged before this is raised.
    DeleteFailed {account_id: String},

    /// Indicates that a new account could not be inserted into the store.
    /// The most common cause is the unique index on email rejecting a
    /// duplicate, so the caller-visible message says the email is taken; the
    /// underlying store error is logged, since this variant deliberately does
    /// not distinguish uniqueness violations from other insert failures.
    EmailInUse,

    /// Indicates that the user did not provide a correct password when
    /// attempting to log in.
    IncorrectPassword,

    /// Indicates that the user tried to log in with an email address which
    /// no account is registered under, or that the store failed while
    /// looking the email up. Both cases answer alike so the login form
    /// behaves the same either way; store failures are logged.
    NoSuchAccount,

    /// Indicates that the user is not authenticated in a context where they
    /// need to be.
    NotAuthenticated,

    /// Internal error which occurs when hashing or verifying a password.
    /// This could indicate, for example, that a hash stored in the database
    /// is in the wrong format.
    Hasher(bcrypt::BcryptError),

    /// Indicates that a presented auth token is malformed, carries an
    /// invalid signature, or has claims of the wrong shape.
    Token(jsonwebtoken::errors::Error),

    /// Indicates that a presented auth token was genuine, but its expiry
    /// time has passed.
    TokenExpired,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NoSuchAccount
            | Self::IncorrectPassword => StatusCode::BAD_REQUEST,

            Self::NotAuthenticated
            | Self::Token(_)
            | Self::TokenExpired => StatusCode::UNAUTHORIZED,

            Self::EmailInUse => StatusCode::CONFLICT,

            Self::AccountDataNotFound {..} => StatusCode::NOT_FOUND,

            Self::DeleteFailed {..}
            | Self::Hasher(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message which should be shown to the user for this error.
    /// Together with `status_code`, this is the `{status, message}` pair the
    /// surrounding application reports; none of the messages leak internal
    /// detail.
    pub fn message(&self) -> &'static str {
        match self {
            Self::AccountDataNotFound {..} => "Could not find account data",
            Self::DeleteFailed {..} => "Could not delete user data",
            Self::EmailInUse => "Email already in use",
            Self::IncorrectPassword => "Incorrect password",
            Self::NoSuchAccount => "Account does not exist",
            Self::NotAuthenticated => "Not authenticated",
            Self::Hasher(_) => "Could not hash the password",
            Self::Token(_) => "Invalid auth token",
            Self::TokenExpired => "Auth token expired",
        }
    }

    pub(crate) fn as_app_err<T, E: From<Self>>(self) -> Result<T, E> {
        Err(E::from(self))
    }
}

/// The successful result of an account operation: a status code and a
/// message to show to the user. The failing counterpart is `Error`, whose
/// `status_code` and `message` methods carry the same pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub status: StatusCode,
    pub message: &'static str,
}

impl Outcome {
    pub(crate) const ACCOUNT_CREATED: Self = Self {
        status: StatusCode::CREATED,
        message: "Account created successfully",
    };

    pub(crate) const ACCOUNT_DELETED: Self = Self {
        status: StatusCode::OK,
        message: "Account deleted successfully",
    };

    pub(crate) const LOGGED_OUT: Self = Self {
        status: StatusCode::OK,
        message: "Logged out successfully",
    };
}
