//! Store for the connected wallet account.

use dioxus::prelude::*;
use wave_portal_shared::Account;

/// The account the wallet has authorized, if any
pub static CURRENT_ACCOUNT: GlobalSignal<Option<Account>> = Signal::global(|| None);

/// Set the connected account
pub fn set_current_account(account: Account) {
    *CURRENT_ACCOUNT.write() = Some(account);
}
