use tokio::sync::OnceCell;

use crate::{
    accounts::AccountData,
    app::{App, AppTypes},
    errors::{Error, Outcome},
    maybe_auth::{Auth, MaybeAuth},
    secret::PasswordHash,
};

/// A request-scoped, lazily-hydrated handle to one account's stored record.
///
/// A handle starts out knowing only the account id, typically taken from a
/// verified auth token. The first field access fetches the full record from
/// the store and caches it for the handle's lifetime; afterwards every
/// accessor, for any field, answers from the cache with no further I/O.
/// Concurrent first accesses coalesce into a single store fetch. If
/// hydration fails, nothing is cached and the next access tries again.
///
/// A handle belongs to the request that created it; it is not meant to be
/// shared between requests or kept beyond one.
pub struct AccountHandle<A: AppTypes> {
    account_id: A::ID,
    data: OnceCell<AccountData<A>>,
}

impl<A: App> AccountHandle<A> {
    pub fn new(account_id: A::ID) -> Self {
        Self {
            account_id,
            data: OnceCell::new(),
        }
    }

    /// Gets the account's id. The id is known from construction, so this
    /// never touches the store.
    pub fn id(&self) -> &A::ID {
        &self.account_id
    }

    /// Gets the account's email address, hydrating the handle if necessary.
    pub async fn email(&self, app: &A) -> Result<&str, A::Error> {
        Ok(&self.data(app).await?.email)
    }

    /// Gets whether the account's email address has been verified, hydrating
    /// the handle if necessary.
    pub async fn email_verified(&self, app: &A) -> Result<bool, A::Error> {
        Ok(self.data(app).await?.email_verified)
    }

    /// Gets the account's stored password hash, hydrating the handle if
    /// necessary.
    pub async fn password_hash(&self, app: &A) -> Result<&PasswordHash, A::Error> {
        Ok(&self.data(app).await?.password_hash)
    }

    /// Gets the identifiers of the websites associated with the account,
    /// hydrating the handle if necessary.
    pub async fn websites(&self, app: &A) -> Result<&[String], A::Error> {
        Ok(&self.data(app).await?.websites)
    }

    /// Gets whether the account has administrator rights, hydrating the
    /// handle if necessary.
    pub async fn is_admin(&self, app: &A) -> Result<bool, A::Error> {
        Ok(self.data(app).await?.is_admin)
    }

    /// Removes this account's record from the store. Deleting does not
    /// require the handle to be hydrated.
    ///
    /// Auth tokens already issued for this account are **not** invalidated:
    /// they keep verifying, by signature, until their natural expiry.
    /// Applications which need immediate lockout after deletion must track
    /// revocation themselves, at the cost of reintroducing server-side
    /// session state.
    ///
    /// Fields cached by an earlier hydration remain readable after deletion,
    /// but a second `delete` fails, as does hydration of any new handle for
    /// this id.
    pub async fn delete(&self, app: &A) -> Result<Outcome, A::Error> {
        match app.delete_account_by_id(&self.account_id).await {
            Ok(true) => {
                log::info!("Deleted account #{}", self.account_id);
                Ok(Outcome::ACCOUNT_DELETED)
            }
            Ok(false) => {
                log::info!("No account #{} to delete", self.account_id);
                self.delete_failed()
            }
            Err(e) => {
                log::warn!("Store error deleting account #{}: {e}", self.account_id);
                self.delete_failed()
            }
        }
    }

    fn delete_failed(&self) -> Result<Outcome, A::Error> {
        Error::DeleteFailed {account_id: self.account_id.to_string()}
            .as_app_err()
    }

    /// Returns the cached record, hydrating the handle first if no field has
    /// been accessed yet. All field accessors funnel through here, so the
    /// store is fetched at most once per handle however the accessors are
    /// called.
    async fn data(&self, app: &A) -> Result<&AccountData<A>, A::Error> {
        self.data.get_or_try_init(|| self.fetch(app))
            .await
    }

    async fn fetch(&self, app: &A) -> Result<AccountData<A>, A::Error> {
        log::debug!("Hydrating account #{}", self.account_id);

        let Some(data) = app.get_account_by_id(&self.account_id)
            .await?
        else {
            log::info!("No stored record for account #{}", self.account_id);
            return Error::AccountDataNotFound {account_id: self.account_id.to_string()}
                .as_app_err();
        };

        Ok(data)
    }
}

impl<A: App> Auth<A> {
    /// Creates an `AccountHandle` for the authenticated account.
    pub fn account(&self) -> AccountHandle<A> {
        AccountHandle::new(self.id.clone())
    }
}

impl<A: App> MaybeAuth<A> {
    /// Creates an `AccountHandle` for the authenticated account, if there is
    /// one.
    pub fn account(&self) -> Option<AccountHandle<A>> {
        match self {
            Self::Authenticated(auth) => Some(auth.account()),
            Self::Unauthenticated => None,
        }
    }
}
