use proptest::prelude::*;

use ethkl_types::{ClaimHistory, Timestamp, WalletAddress, WeiAmount};
use ethkl_wallet_core::merge_histories;

fn histories() -> impl Strategy<Value = Vec<(WalletAddress, ClaimHistory)>> {
    prop::collection::vec(
        (
            0u64..4,
            prop::collection::vec((1u64..1_000, 0u64..50), 0..6),
        ),
        0..6,
    )
    .prop_map(|claimers| {
        claimers
            .into_iter()
            .map(|(who, entries)| {
                let history = ClaimHistory::new(
                    entries.iter().map(|(a, _)| WeiAmount::from_wei(*a as u128)).collect(),
                    entries.iter().map(|(_, t)| Timestamp::new(*t)).collect(),
                );
                (WalletAddress::from_low_u64(who), history)
            })
            .collect()
    })
}

proptest! {
    /// Output is ordered newest first.
    #[test]
    fn merged_records_are_non_increasing(input in histories()) {
        let merged = merge_histories(input);
        for pair in merged.records.windows(2) {
            prop_assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }

    /// Every consistent entry appears exactly once.
    #[test]
    fn merge_keeps_every_entry(input in histories()) {
        let expected: usize = input.iter().map(|(_, h)| h.amounts.len()).sum();
        let merged = merge_histories(input);
        prop_assert_eq!(merged.records.len(), expected);
        prop_assert_eq!(merged.excluded_claimers, 0);
    }

    /// Records sharing a timestamp keep claimer order, then array order.
    #[test]
    fn ties_are_stable(input in histories()) {
        let mut flat = Vec::new();
        for (claimer, history) in &input {
            for (amount, ts) in history.amounts.iter().zip(&history.timestamps) {
                flat.push((*ts, *claimer, *amount));
            }
        }
        let merged = merge_histories(input);
        for ts in merged.records.iter().map(|r| r.timestamp) {
            let got: Vec<_> = merged
                .records
                .iter()
                .filter(|r| r.timestamp == ts)
                .map(|r| (r.claimer, r.amount))
                .collect();
            let want: Vec<_> = flat
                .iter()
                .filter(|(t, _, _)| *t == ts)
                .map(|(_, c, a)| (*c, *a))
                .collect();
            prop_assert_eq!(got, want);
        }
    }

    /// A claimer with misaligned arrays drops out and is counted.
    #[test]
    fn misaligned_claimer_is_excluded(input in histories(), extra in 1usize..4) {
        let mut input = input;
        let bad = ClaimHistory::new(
            vec![WeiAmount::from_wei(1); extra],
            Vec::new(),
        );
        input.push((WalletAddress::from_low_u64(99), bad));
        let merged = merge_histories(input);
        prop_assert_eq!(merged.excluded_claimers, 1);
        prop_assert_eq!(merged.excluded_entries, extra);
        prop_assert!(merged.records.iter().all(|r| r.claimer != WalletAddress::from_low_u64(99)));
    }
}
