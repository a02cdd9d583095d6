// ============================================================================
// Account Ledger
// ============================================================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AccountId, Quantity, Side};
use crate::error::{Error, Result};

/// Settlement figures for one account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Cash credited by sales and debited by purchases
    pub balance: Decimal,
    /// Net quantity held
    pub position: i64,
    /// Cumulative notional traded
    pub turnover: Decimal,
    /// Cumulative quantity traded
    pub traded_volume: u64,
}

impl Account {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_traded(&self) -> bool {
        self.traded_volume > 0
    }

    /// State after one trade leg, or `None` if any figure leaves its range
    fn with_fill(&self, side: Side, quantity: Quantity, notional: Decimal) -> Option<Account> {
        let signed = i64::try_from(quantity).ok()?;
        let (balance, position) = match side {
            Side::Buy => (
                self.balance.checked_sub(notional)?,
                self.position.checked_add(signed)?,
            ),
            Side::Sell => (
                self.balance.checked_add(notional)?,
                self.position.checked_sub(signed)?,
            ),
        };

        Some(Account {
            balance,
            position,
            turnover: self.turnover.checked_add(notional)?,
            traded_volume: self.traded_volume.checked_add(quantity)?,
        })
    }
}

/// Account id -> account state for one batch.
///
/// Accounts are created on first touch and never removed. There is no
/// rollback: callers must only settle a trade they have committed to, and a
/// refused settlement changes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    accounts: BTreeMap<AccountId, Account>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account with a zero state if it does not exist yet
    pub fn touch(&mut self, account_id: AccountId) -> &mut Account {
        self.accounts.entry(account_id).or_default()
    }

    /// Add a signed delta to the account's cash balance
    pub fn credit(&mut self, account_id: AccountId, delta_balance: Decimal) -> Result<()> {
        let account = self.touch(account_id);
        account.balance = account
            .balance
            .checked_add(delta_balance)
            .ok_or(Error::SettlementOverflow {
                account: account_id,
            })?;
        Ok(())
    }

    /// Record one side of a fill: cash moves by `notional` against `side`,
    /// position moves by `quantity` with it, turnover and traded volume grow.
    /// The account is left untouched when any figure would overflow.
    pub fn apply_fill(
        &mut self,
        account_id: AccountId,
        side: Side,
        quantity: Quantity,
        notional: Decimal,
    ) -> Result<()> {
        let next = self
            .touch(account_id)
            .with_fill(side, quantity, notional)
            .ok_or(Error::SettlementOverflow {
                account: account_id,
            })?;
        self.accounts.insert(account_id, next);
        Ok(())
    }

    /// Commit one trade for both counterparties and return its notional.
    ///
    /// Both legs are computed before either is stored, so an overflow on
    /// one side leaves the whole ledger unchanged.
    pub fn settle(
        &mut self,
        buyer: AccountId,
        seller: AccountId,
        quantity: Quantity,
        price: Decimal,
    ) -> Result<Decimal> {
        let notional = Decimal::from(quantity)
            .checked_mul(price)
            .ok_or(Error::SettlementOverflow { account: buyer })?;

        let bought = self
            .accounts
            .get(&buyer)
            .cloned()
            .unwrap_or_default()
            .with_fill(Side::Buy, quantity, notional)
            .ok_or(Error::SettlementOverflow { account: buyer })?;

        // A self-trade applies both legs to the same account
        let seller_before = if seller == buyer {
            bought.clone()
        } else {
            self.accounts.get(&seller).cloned().unwrap_or_default()
        };
        let sold = seller_before
            .with_fill(Side::Sell, quantity, notional)
            .ok_or(Error::SettlementOverflow { account: seller })?;

        self.accounts.insert(buyer, bought);
        self.accounts.insert(seller, sold);
        Ok(notional)
    }

    pub fn get(&self, account_id: AccountId) -> Option<&Account> {
        self.accounts.get(&account_id)
    }

    /// Accounts in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, &Account)> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<AccountId, Account> {
        self.accounts
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = (&'a AccountId, &'a Account);
    type IntoIter = std::collections::btree_map::Iter<'a, AccountId, Account>;

    fn into_iter(self) -> Self::IntoIter {
        self.accounts.iter()
    }
}
