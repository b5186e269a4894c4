use hub_core::{Account, ReconcileAction};

/// Result of a successful reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub account: Account,
    pub action: ReconcileAction,
}

impl ReconcileOutcome {
    pub fn new(account: Account, action: ReconcileAction) -> Self {
        Self { account, action }
    }

    pub fn into_account(self) -> Account {
        self.account
    }
}
