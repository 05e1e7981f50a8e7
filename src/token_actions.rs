use actix_web::HttpMessage;

use crate::secret::Secret;

/// Represents an update to make to the client's auth token cookie, if any:
/// issue a freshly-signed token on login, or clear the cookie on logout or
/// when the presented token fails verification. The action is queued in the
/// request's extensions and applied to the response before it is sent.
pub(crate) enum AuthTokenAction {
    Issue(Secret),
    Revoke,
    DoNothing,
}

impl AuthTokenAction {
    /// Queues this action on the request, so that it will be performed when
    /// the response is sent. A later queued action replaces an earlier one.
    pub(crate) fn insert_into_request(self, request: &impl HttpMessage) {
        request
            .extensions_mut()
            .insert(self);
    }

    /// Takes the queued action from the request. This should only be called
    /// once, by the session middleware when it is ready to perform the action
    /// by inserting the appropriate `Set-Cookie` header into the response.
    pub(crate) fn take_from_request(request: &impl HttpMessage) -> Self {
        request
            .extensions_mut()
            .remove()
            .unwrap_or(AuthTokenAction::DoNothing)
    }
}
