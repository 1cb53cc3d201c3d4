//! Management-fee gate.
//!
//! The fee is credited only while the chain-wide average issuance per signup
//! stays at or below a threshold, evaluated against the counters visible
//! *before* the current signup is credited.

use crate::schedule::RewardSet;
use ur_types::Wei;

/// Average-issuance ceiling above which the management fee stops (10,000 UR).
pub fn management_fee_threshold() -> Wei {
    Wei::from_ur(10_000)
}

/// Whether the management fee applies at the given pre-signup counters.
///
/// `n_signups == 0` short-circuits to `true` — the first signup always pays
/// the fee. The division is integer division, so the short-circuit also
/// covers the `0 / 0` case.
pub fn management_fee_applies(n_signups: Wei, total_wei: Wei) -> bool {
    if n_signups.is_zero() {
        return true;
    }
    let average = total_wei.raw() / n_signups.raw();
    average <= management_fee_threshold().raw()
}

/// The management fee credited for one signup at the given pre-signup
/// counters: the scheduled fee when the gate is open, zero otherwise.
pub fn management_fee_for(rewards: &RewardSet, n_signups: Wei, total_wei: Wei) -> Wei {
    if management_fee_applies(n_signups, total_wei) {
        rewards.management_fee
    } else {
        Wei::ZERO
    }
}
