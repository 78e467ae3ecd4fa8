//! Account binding use case (QR scan)

use crate::domain::Account;
use crate::error::Result;
use crate::infrastructure::KeyValueStore;

pub const ACCOUNT_KEY: &str = "account";
pub const ACCOUNT_ID_KEY: &str = "accountId";

/// Binds the device to the account carried by a scanned QR code
pub struct AccountService<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> AccountService<S> {
    pub fn new(kv: S) -> Self {
        AccountService { kv }
    }

    /// Validate the payload and store it verbatim as the bound account,
    /// replacing any previous binding.
    pub fn bind(&self, payload: &str) -> Result<Account> {
        let account = Account::from_qr_payload(payload)?;

        self.kv.set(ACCOUNT_KEY, payload)?;
        match &account.account_id {
            Some(id) => self.kv.set(ACCOUNT_ID_KEY, id)?,
            None => self.kv.remove(ACCOUNT_ID_KEY)?,
        }

        tracing::info!(affiliation = %account.affiliation(), "bound account");
        Ok(account)
    }

    /// The bound account. An unreadable stored payload counts as unbound.
    pub fn current(&self) -> Result<Option<Account>> {
        let Some(raw) = self.kv.get(ACCOUNT_KEY)? else {
            return Ok(None);
        };

        match Account::from_qr_payload(&raw) {
            Ok(account) => Ok(Some(account)),
            Err(e) => {
                tracing::warn!(error = %e, "stored account is unreadable, treating as unbound");
                Ok(None)
            }
        }
    }

    /// Id that new entries are attributed to
    pub fn account_id(&self) -> Result<Option<String>> {
        Ok(self
            .kv
            .get(ACCOUNT_ID_KEY)?
            .filter(|id| !id.trim().is_empty()))
    }

    pub fn unbind(&self) -> Result<()> {
        self.kv.remove(ACCOUNT_KEY)?;
        self.kv.remove(ACCOUNT_ID_KEY)?;
        Ok(())
    }
}
