//! Property-based tests for wallet roll-ups and the search filter
//!
//! Run with: cargo test -p qx rollup_properties

mod common;

use common::fixtures::{epoch_trades, trade, transfer};
use proptest::prelude::*;
use qx::domain::filter_by_wallet;
use qx::{Trade, TradeRollup, TradeSide, Transfer, TransferRollup};
use std::borrow::Cow;

const WALLETS: [&str; 5] = ["ALPHA", "BRAVO", "CHARLIE", "DELTA", "ECHO"];

fn trades_strategy() -> impl Strategy<Value = Vec<Trade>> {
    prop::collection::vec(
        (0usize..5, 0usize..5, any::<bool>(), 0.1..100.0f64, 0.0..1000.0f64),
        0..40,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .map(|(t, m, buy, price, qty)| {
                let side = if buy { TradeSide::Buy } else { TradeSide::Sell };
                trade(WALLETS[t], WALLETS[m], side, price, qty)
            })
            .collect()
    })
}

fn transfers_strategy() -> impl Strategy<Value = Vec<Transfer>> {
    prop::collection::vec((0usize..5, 0usize..5, 0.0..5000.0f64), 0..40).prop_map(|raw| {
        raw.into_iter()
            .map(|(s, d, amount)| transfer(WALLETS[s], WALLETS[d], amount))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Bought notional across wallets equals sold notional
    #[test]
    fn trade_totals_balance(trades in trades_strategy()) {
        let rollup = TradeRollup::aggregate(&trades);
        let bought: f64 = rollup.totals.iter().map(|r| r.total_bought).sum();
        let sold: f64 = rollup.totals.iter().map(|r| r.total_sold).sum();
        let notional: f64 = trades.iter().map(|t| t.price * t.quantity).sum();

        prop_assert!((bought - sold).abs() < 1e-6 * notional.max(1.0));
        prop_assert!((bought - notional).abs() < 1e-6 * notional.max(1.0));

        let net: f64 = rollup.totals.iter().map(|r| r.net).sum();
        prop_assert!(net.abs() < 1e-6 * notional.max(1.0));
    }

    /// Per-side tables sort by amount, totals by absolute net
    #[test]
    fn trade_tables_sorted(trades in trades_strategy()) {
        let rollup = TradeRollup::aggregate(&trades);
        for pair in rollup.buyers.windows(2) {
            prop_assert!(pair[0].amount >= pair[1].amount);
        }
        for pair in rollup.sellers.windows(2) {
            prop_assert!(pair[0].amount >= pair[1].amount);
        }
        for pair in rollup.totals.windows(2) {
            prop_assert!(pair[0].net.abs() >= pair[1].net.abs());
        }
    }

    /// Each wallet appears at most once per table and counts add up
    #[test]
    fn trade_counts_match(trades in trades_strategy()) {
        let rollup = TradeRollup::aggregate(&trades);
        let buys: u32 = rollup.buyers.iter().map(|r| r.count).sum();
        let sells: u32 = rollup.sellers.iter().map(|r| r.count).sum();
        prop_assert_eq!(buys as usize, trades.len());
        prop_assert_eq!(sells as usize, trades.len());

        let mut wallets: Vec<&str> = rollup.totals.iter().map(|r| r.wallet.as_str()).collect();
        wallets.sort_unstable();
        wallets.dedup();
        prop_assert_eq!(wallets.len(), rollup.totals.len());
    }

    /// Same input, same output
    #[test]
    fn aggregation_deterministic(trades in trades_strategy()) {
        prop_assert_eq!(TradeRollup::aggregate(&trades), TradeRollup::aggregate(&trades));
    }

    /// Filtered records are a subsequence that all mention the term
    #[test]
    fn filter_is_ordered_subset(trades in trades_strategy(), idx in 0usize..5) {
        let term = WALLETS[idx].to_lowercase();
        let filtered = filter_by_wallet(&trades, &term);

        let mut rest = trades.iter();
        for kept in filtered.iter() {
            prop_assert!(rest.any(|t| t == kept));
            prop_assert!(kept.taker_wallet.to_lowercase().contains(&term)
                || kept.maker_wallet.to_lowercase().contains(&term));
        }
        let expected = trades
            .iter()
            .filter(|t| t.taker_wallet == WALLETS[idx] || t.maker_wallet == WALLETS[idx])
            .count();
        prop_assert_eq!(filtered.len(), expected);
    }

    /// Transfer nets sum to zero; received == sent overall
    #[test]
    fn transfer_totals_balance(transfers in transfers_strategy()) {
        let rollup = TransferRollup::aggregate(&transfers);
        let sent: f64 = rollup.totals.iter().map(|r| r.sent).sum();
        let received: f64 = rollup.totals.iter().map(|r| r.received).sum();
        let total: f64 = transfers.iter().map(|t| t.amount).sum();

        prop_assert!((sent - received).abs() < 1e-6 * total.max(1.0));
        for pair in rollup.totals.windows(2) {
            prop_assert!(pair[0].net.abs() >= pair[1].net.abs());
        }
    }
}

#[test]
fn test_blank_term_borrows() {
    let trades = epoch_trades();
    assert!(matches!(filter_by_wallet(&trades, ""), Cow::Borrowed(_)));
    assert!(matches!(filter_by_wallet(&trades, "   "), Cow::Borrowed(_)));
}

#[test]
fn test_epoch_rollup() {
    let rollup = TradeRollup::aggregate(&epoch_trades());

    // W1: bought 1000 + 550; W2: bought 180, sold 1000 + 550
    assert_eq!(rollup.buyers[0].wallet, "W1");
    assert_eq!(rollup.buyers[0].amount, 1550.0);
    assert_eq!(rollup.buyers[0].count, 2);
    assert_eq!(rollup.sellers[0].wallet, "W2");
    assert_eq!(rollup.sellers[0].amount, 1550.0);

    let w2 = rollup.totals.iter().find(|r| r.wallet == "W2").unwrap();
    assert_eq!(w2.total_bought, 180.0);
    assert_eq!(w2.net, 180.0 - 1550.0);
    assert_eq!(rollup.totals[0].wallet, "W1");
}

#[test]
fn test_filtered_rollup() {
    let rollup = TradeRollup::aggregate_filtered(&epoch_trades(), "w3");
    assert_eq!(rollup.totals.len(), 2);
    assert_eq!(rollup.buyers[0].wallet, "W2");
    assert_eq!(rollup.sellers[0].wallet, "W3");
}

#[test]
fn test_empty_inputs() {
    assert!(TradeRollup::aggregate(&[]).is_empty());
    assert!(TransferRollup::aggregate(&[]).is_empty());
}
