//! Wallet search filter for trade and transfer tables

use super::trade::Trade;
use super::transfer::Transfer;
use std::borrow::Cow;

/// Records that involve exactly two wallets
pub trait Counterparties {
    fn counterparties(&self) -> (&str, &str);
}

impl Counterparties for Trade {
    fn counterparties(&self) -> (&str, &str) {
        (&self.taker_wallet, &self.maker_wallet)
    }
}

impl Counterparties for Transfer {
    fn counterparties(&self) -> (&str, &str) {
        (&self.source, &self.destination)
    }
}

/// Keep records whose either wallet contains `term`, ignoring case.
///
/// A blank term returns the input untouched (borrowed). Input order is kept.
pub fn filter_by_wallet<'a, T>(records: &'a [T], term: &str) -> Cow<'a, [T]>
where
    T: Counterparties + Clone,
{
    if term.trim().is_empty() {
        return Cow::Borrowed(records);
    }

    let needle = term.to_lowercase();
    let matches = |wallet: &str| wallet.to_lowercase().contains(&needle);

    Cow::Owned(
        records
            .iter()
            .filter(|record| {
                let (a, b) = record.counterparties();
                matches(a) || matches(b)
            })
            .cloned()
            .collect(),
    )
}
