//! Unit tests for gavel-kernel
//!
//! The kernel is pure (no IO), making it ideal for unit testing.
//! Every code path can be tested without mocks.

use gavel_types::{Amount, BidStatus, BidderId, Outcome};
use proptest::prelude::*;
use test_case::test_case;

use crate::effects::Effect;
use crate::kernel::{close, place_bid};
use crate::ledger::{Ledger, Phase};

// ============================================================================
// Test Helpers
// ============================================================================

fn bidder(name: &str) -> BidderId {
    BidderId::new(name).expect("test bidder names are non-empty")
}

/// Applies a sequence of bids, discarding effects.
fn apply_all(ledger: Ledger, bids: &[(&str, u64)]) -> (Ledger, Vec<BidStatus>) {
    let mut ledger = ledger;
    let mut statuses = Vec::with_capacity(bids.len());
    for (name, amount) in bids {
        let (next, status, _) = place_bid(ledger, bidder(name), Amount::new(*amount));
        ledger = next;
        statuses.push(status);
    }
    (ledger, statuses)
}

fn closed(ledger: Ledger) -> Ledger {
    close(ledger).0
}

// ============================================================================
// PlaceBid Tests
// ============================================================================

#[test]
fn first_bid_on_empty_ledger_is_accepted() {
    let (ledger, status, _) = place_bid(Ledger::new(), bidder("a"), Amount::new(10));

    assert_eq!(status, BidStatus::Accepted);
    assert_eq!(ledger.entry(&bidder("a")), Some(Amount::new(10)));
    assert_eq!(ledger.highest_bid(), Amount::new(10));
}

#[test]
fn zero_bid_on_empty_ledger_is_accepted() {
    let (ledger, status, _) = place_bid(Ledger::new(), bidder("a"), Amount::ZERO);

    assert_eq!(status, BidStatus::Accepted);
    assert_eq!(ledger.accepted_count(), 1);
}

#[test]
fn first_accepted_bid_schedules_close_once() {
    let (ledger, _, effects) = place_bid(Ledger::new(), bidder("a"), Amount::new(10));
    assert_eq!(effects, vec![Effect::ScheduleClose]);
    assert!(ledger.closing_scheduled());

    let (ledger, _, effects) = place_bid(ledger, bidder("b"), Amount::new(20));
    assert!(effects.is_empty());

    let (_, _, effects) = place_bid(ledger, bidder("a"), Amount::new(30));
    assert!(effects.is_empty());
}

#[test]
fn rejected_bid_does_not_schedule_close() {
    let (ledger, _) = apply_all(Ledger::new(), &[("a", 10)]);
    let (_, status, effects) = place_bid(ledger, bidder("b"), Amount::new(5));

    assert_eq!(status, BidStatus::RejectedTooLow);
    assert!(effects.is_empty());
}

#[test]
fn bid_below_maximum_is_rejected_without_mutation() {
    let (ledger, _) = apply_all(Ledger::new(), &[("a", 10), ("b", 20)]);
    let before = ledger.clone();

    let (after, status, effects) = place_bid(ledger, bidder("a"), Amount::new(15));

    assert_eq!(status, BidStatus::RejectedTooLow);
    assert!(effects.is_empty());
    assert_eq!(after, before);
    assert_eq!(after.entry(&bidder("a")), Some(Amount::new(10)));
}

#[test]
fn bid_equal_to_maximum_is_accepted() {
    let (ledger, statuses) = apply_all(Ledger::new(), &[("a", 20), ("b", 20)]);

    assert_eq!(statuses, vec![BidStatus::Accepted, BidStatus::Accepted]);
    assert_eq!(ledger.bidder_count(), 2);
    assert_eq!(ledger.highest_bid(), Amount::new(20));
}

#[test]
fn later_bid_overwrites_same_bidder_entry() {
    let (ledger, _) = apply_all(Ledger::new(), &[("a", 10), ("a", 25)]);

    assert_eq!(ledger.entry(&bidder("a")), Some(Amount::new(25)));
    assert_eq!(ledger.bidder_count(), 1);
    assert_eq!(ledger.accepted_count(), 2);
}

#[test]
fn bids_after_close_are_rejected() {
    let (ledger, _) = apply_all(Ledger::new(), &[("a", 10)]);
    let ledger = closed(ledger);
    let before = ledger.clone();

    let (after, status, effects) = place_bid(ledger, bidder("b"), Amount::new(1_000));

    assert_eq!(status, BidStatus::RejectedClosed);
    assert!(effects.is_empty());
    assert_eq!(after, before);
}

// ============================================================================
// Close Tests
// ============================================================================

#[test]
fn close_transitions_open_to_closed() {
    let (ledger, _) = apply_all(Ledger::new(), &[("a", 10), ("b", 20)]);
    assert_eq!(ledger.phase(), Phase::Open);

    let (ledger, effects) = close(ledger);

    assert_eq!(ledger.phase(), Phase::Closed);
    assert_eq!(
        effects,
        vec![Effect::AuctionClosed(Outcome::closed(
            Amount::new(20),
            bidder("b")
        ))]
    );
}

#[test]
fn close_is_idempotent() {
    let (ledger, _) = apply_all(Ledger::new(), &[("a", 10)]);
    let ledger = closed(ledger);
    let before = ledger.clone();

    let (after, effects) = close(ledger);

    assert!(effects.is_empty());
    assert_eq!(after, before);
}

#[test]
fn close_on_empty_ledger_keeps_it_open() {
    let (ledger, effects) = close(Ledger::new());

    assert!(effects.is_empty());
    assert!(ledger.is_open());
    assert_eq!(ledger.outcome(), Outcome::running(Amount::ZERO));

    let (_, status, _) = place_bid(ledger, bidder("a"), Amount::new(1));
    assert_eq!(status, BidStatus::Accepted);
}

// ============================================================================
// Outcome Tests
// ============================================================================

#[test]
fn open_outcome_reports_running_maximum_without_winner() {
    let (ledger, _) = apply_all(Ledger::new(), &[("a", 10), ("b", 20)]);

    assert_eq!(ledger.outcome(), Outcome::running(Amount::new(20)));
}

#[test]
fn empty_ledger_outcome_is_zero() {
    assert_eq!(Ledger::new().outcome(), Outcome::running(Amount::ZERO));
}

#[test]
fn three_bid_scenario() {
    let (ledger, statuses) = apply_all(Ledger::new(), &[("A", 10), ("B", 20), ("A", 15)]);

    assert_eq!(
        statuses,
        vec![
            BidStatus::Accepted,
            BidStatus::Accepted,
            BidStatus::RejectedTooLow
        ]
    );
    assert_eq!(ledger.outcome(), Outcome::running(Amount::new(20)));
    assert_eq!(ledger.outcome().winner_label(), "");

    let ledger = closed(ledger);
    assert_eq!(
        ledger.outcome(),
        Outcome::closed(Amount::new(20), bidder("B"))
    );
}

#[test_case(&[("a", 20), ("b", 20)], "a" ; "first of two tied bidders")]
#[test_case(&[("b", 20), ("a", 20)], "b" ; "order not name decides")]
#[test_case(&[("a", 10), ("b", 20), ("c", 20), ("a", 20)], "b" ; "earliest to reach maximum")]
#[test_case(&[("a", 20), ("b", 20), ("b", 30)], "b" ; "new maximum resets the tie")]
fn ties_resolve_to_earliest_bidder(bids: &[(&str, u64)], expected: &str) {
    let (ledger, _) = apply_all(Ledger::new(), bids);
    let ledger = closed(ledger);

    assert_eq!(ledger.outcome().winner, Some(bidder(expected)));
}

#[test]
fn ledger_serializes_to_json() {
    let (ledger, _) = apply_all(Ledger::new(), &[("a", 10)]);
    let json = serde_json::to_string(&ledger).expect("ledger serializes");
    let restored: Ledger = serde_json::from_str(&json).expect("ledger deserializes");

    assert_eq!(restored, ledger);
}

// ============================================================================
// Property-Based Tests
// ============================================================================

fn bid_sequence() -> impl Strategy<Value = Vec<(u8, u64)>> {
    prop::collection::vec((0u8..5, 0u64..100), 0..40)
}

fn name_of(index: u8) -> BidderId {
    bidder(&format!("bidder-{index}"))
}

proptest! {
    /// Property: the reported highest bid equals the maximum accepted amount.
    #[test]
    fn prop_highest_bid_is_max_accepted(bids in bid_sequence()) {
        let mut ledger = Ledger::new();
        let mut max_accepted = Amount::ZERO;

        for (who, amount) in bids {
            let amount = Amount::new(amount);
            let (next, status, _) = place_bid(ledger, name_of(who), amount);
            ledger = next;
            if status == BidStatus::Accepted {
                max_accepted = max_accepted.max(amount);
            }
        }

        prop_assert_eq!(ledger.outcome().highest_bid, max_accepted);
    }

    /// Property: a bid strictly below the maximum is rejected and leaves the
    /// ledger untouched.
    #[test]
    fn prop_low_bids_never_mutate(bids in bid_sequence(), who in 0u8..5, below in 0u64..100) {
        let mut ledger = Ledger::new();
        for (b, amount) in bids {
            ledger = place_bid(ledger, name_of(b), Amount::new(amount)).0;
        }

        let highest = ledger.highest_bid().as_u64();
        prop_assume!(highest > 0);
        let low = highest - 1 - (below % highest);

        let before = ledger.clone();
        let (after, status, effects) = place_bid(ledger, name_of(who), Amount::new(low));

        prop_assert_eq!(status, BidStatus::RejectedTooLow);
        prop_assert!(effects.is_empty());
        prop_assert_eq!(after, before);
    }

    /// Property: the closing timer is requested exactly once per non-empty
    /// ledger, no matter how many bids arrive.
    #[test]
    fn prop_schedule_close_emitted_once(bids in bid_sequence()) {
        let mut ledger = Ledger::new();
        let mut schedules = 0usize;

        for (who, amount) in &bids {
            let (next, _, effects) = place_bid(ledger, name_of(*who), Amount::new(*amount));
            ledger = next;
            schedules += effects.iter().filter(|e| **e == Effect::ScheduleClose).count();
        }

        prop_assert_eq!(schedules, usize::from(!bids.is_empty()));
    }

    /// Property: after closing, every bid is rejected and the ledger stops
    /// changing.
    #[test]
    fn prop_closed_ledger_is_frozen(before in bid_sequence(), after in bid_sequence()) {
        prop_assume!(!before.is_empty());
        let mut ledger = Ledger::new();
        for (who, amount) in before {
            ledger = place_bid(ledger, name_of(who), Amount::new(amount)).0;
        }
        let frozen = closed(ledger);

        let mut ledger = frozen.clone();
        for (who, amount) in after {
            let (next, status, effects) = place_bid(ledger, name_of(who), Amount::new(amount));
            prop_assert_eq!(status, BidStatus::RejectedClosed);
            prop_assert!(effects.is_empty());
            ledger = next;
        }

        prop_assert_eq!(ledger, frozen);
    }

    /// Property: replaying the same input yields the same winner.
    #[test]
    fn prop_winner_is_deterministic(bids in bid_sequence()) {
        let run = |bids: &[(u8, u64)]| {
            let mut ledger = Ledger::new();
            for (who, amount) in bids {
                ledger = place_bid(ledger, name_of(*who), Amount::new(*amount)).0;
            }
            closed(ledger).outcome()
        };

        prop_assert_eq!(run(&bids), run(&bids));
    }

    /// Property: the winner is the first accepted bid at the maximum.
    #[test]
    fn prop_winner_is_earliest_at_maximum(bids in bid_sequence()) {
        let mut ledger = Ledger::new();
        for (who, amount) in bids {
            ledger = place_bid(ledger, name_of(who), Amount::new(amount)).0;
        }
        let ledger = closed(ledger);
        let outcome = ledger.outcome();

        let expected = ledger
            .accepted()
            .iter()
            .find(|bid| bid.amount == outcome.highest_bid)
            .map(|bid| bid.bidder.clone());

        prop_assert_eq!(outcome.winner, expected);
    }
}
