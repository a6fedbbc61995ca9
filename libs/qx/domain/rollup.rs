//! Per-wallet roll-ups over trades and transfers
//!
//! Each aggregation produces three tables: one per direction (buyers and
//! sellers, or senders and receivers) sorted by amount, and a combined table
//! sorted by absolute net. Grouping remembers the order in which wallets were
//! first seen and every sort is stable, so equal keys keep that order.

use super::filter::filter_by_wallet;
use super::numeric::finite_or_zero;
use super::trade::Trade;
use super::transfer::Transfer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Ordered grouping
// =============================================================================

/// Wallet-keyed accumulator that remembers first-seen order
struct WalletLedger<V> {
    index: HashMap<String, usize>,
    entries: Vec<V>,
}

impl<V> WalletLedger<V> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn entry(&mut self, wallet: &str, init: impl FnOnce() -> V) -> &mut V {
        let idx = match self.index.get(wallet) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.index.insert(wallet.to_string(), idx);
                self.entries.push(init());
                idx
            }
        };
        &mut self.entries[idx]
    }

    fn into_entries(self) -> Vec<V> {
        self.entries
    }
}

// =============================================================================
// Rows
// =============================================================================

/// One wallet's activity in one direction (bought, sold, sent or received)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSideTotal {
    pub wallet: String,
    /// Quote-currency value for trades, asset amount for transfers
    pub amount: f64,
    /// Tokens moved (trades only, equals `amount` for transfers)
    pub tokens: f64,
    pub count: u32,
    pub registered: bool,
}

impl WalletSideTotal {
    fn new(wallet: &str, registered: bool) -> Self {
        Self {
            wallet: wallet.to_string(),
            amount: 0.0,
            tokens: 0.0,
            count: 0,
            registered,
        }
    }
}

/// Combined buy/sell picture of one wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRollup {
    pub wallet: String,
    pub total_bought: f64,
    pub total_sold: f64,
    pub tokens_bought: f64,
    pub tokens_sold: f64,
    /// total_bought - total_sold
    pub net: f64,
    pub registered: bool,
}

impl WalletRollup {
    fn new(wallet: &str, registered: bool) -> Self {
        Self {
            wallet: wallet.to_string(),
            total_bought: 0.0,
            total_sold: 0.0,
            tokens_bought: 0.0,
            tokens_sold: 0.0,
            net: 0.0,
            registered,
        }
    }

    /// Gross traded value in both directions
    pub fn volume(&self) -> f64 {
        self.total_bought + self.total_sold
    }
}

/// Combined sent/received picture of one wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferWalletRollup {
    pub wallet: String,
    pub sent: f64,
    pub received: f64,
    pub sent_count: u32,
    pub received_count: u32,
    /// received - sent
    pub net: f64,
}

impl TransferWalletRollup {
    fn new(wallet: &str) -> Self {
        Self {
            wallet: wallet.to_string(),
            sent: 0.0,
            received: 0.0,
            sent_count: 0,
            received_count: 0,
            net: 0.0,
        }
    }

    pub fn total_count(&self) -> u32 {
        self.sent_count + self.received_count
    }
}

fn sort_by_amount(rows: &mut [WalletSideTotal]) {
    rows.sort_by(|a, b| b.amount.total_cmp(&a.amount));
}

// =============================================================================
// Trades
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeRollup {
    pub buyers: Vec<WalletSideTotal>,
    pub sellers: Vec<WalletSideTotal>,
    pub totals: Vec<WalletRollup>,
}

impl TradeRollup {
    /// Attribute every trade to its buyer and its seller
    pub fn aggregate(trades: &[Trade]) -> Self {
        let mut buyers = WalletLedger::new();
        let mut sellers = WalletLedger::new();
        let mut totals = WalletLedger::new();

        for trade in trades {
            let notional = finite_or_zero(trade.notional());
            let tokens = finite_or_zero(trade.quantity);

            let (buyer, seller) = (trade.buyer(), trade.seller());
            let (buyer_reg, seller_reg) = (trade.buyer_registered(), trade.seller_registered());

            let b = buyers.entry(buyer, || WalletSideTotal::new(buyer, buyer_reg));
            b.amount += notional;
            b.tokens += tokens;
            b.count += 1;

            let s = sellers.entry(seller, || WalletSideTotal::new(seller, seller_reg));
            s.amount += notional;
            s.tokens += tokens;
            s.count += 1;

            let bt = totals.entry(buyer, || WalletRollup::new(buyer, buyer_reg));
            bt.total_bought += notional;
            bt.tokens_bought += tokens;

            let st = totals.entry(seller, || WalletRollup::new(seller, seller_reg));
            st.total_sold += notional;
            st.tokens_sold += tokens;
        }

        let mut buyers = buyers.into_entries();
        let mut sellers = sellers.into_entries();
        let mut totals = totals.into_entries();

        sort_by_amount(&mut buyers);
        sort_by_amount(&mut sellers);

        for row in totals.iter_mut() {
            row.net = row.total_bought - row.total_sold;
        }
        totals.sort_by(|a, b| b.net.abs().total_cmp(&a.net.abs()));

        Self {
            buyers,
            sellers,
            totals,
        }
    }

    /// Apply the wallet search term, then aggregate
    pub fn aggregate_filtered(trades: &[Trade], term: &str) -> Self {
        Self::aggregate(&filter_by_wallet(trades, term))
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

// =============================================================================
// Transfers
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferRollup {
    pub senders: Vec<WalletSideTotal>,
    pub receivers: Vec<WalletSideTotal>,
    pub totals: Vec<TransferWalletRollup>,
}

impl TransferRollup {
    /// Attribute every transfer to its source and its destination
    pub fn aggregate(transfers: &[Transfer]) -> Self {
        let mut senders = WalletLedger::new();
        let mut receivers = WalletLedger::new();
        let mut totals = WalletLedger::new();

        for transfer in transfers {
            let amount = finite_or_zero(transfer.amount);
            let (source, destination) = (transfer.source.as_str(), transfer.destination.as_str());

            let s = senders.entry(source, || WalletSideTotal::new(source, false));
            s.amount += amount;
            s.tokens += amount;
            s.count += 1;

            let r = receivers.entry(destination, || WalletSideTotal::new(destination, false));
            r.amount += amount;
            r.tokens += amount;
            r.count += 1;

            let st = totals.entry(source, || TransferWalletRollup::new(source));
            st.sent += amount;
            st.sent_count += 1;

            let rt = totals.entry(destination, || TransferWalletRollup::new(destination));
            rt.received += amount;
            rt.received_count += 1;
        }

        let mut senders = senders.into_entries();
        let mut receivers = receivers.into_entries();
        let mut totals = totals.into_entries();

        sort_by_amount(&mut senders);
        sort_by_amount(&mut receivers);

        for row in totals.iter_mut() {
            row.net = row.received - row.sent;
        }
        totals.sort_by(|a, b| b.net.abs().total_cmp(&a.net.abs()));

        Self {
            senders,
            receivers,
            totals,
        }
    }

    /// Apply the wallet search term, then aggregate
    pub fn aggregate_filtered(transfers: &[Transfer], term: &str) -> Self {
        Self::aggregate(&filter_by_wallet(transfers, term))
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}
