// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! The sequential probe plan behind `get`.
//!
//! Probing is a state machine over tier metadata only, with no I/O, so the
//! skip-ahead and termination rules can be tested in isolation from any
//! backend.

use stratum_tier::TierMetadata;

/// Where the probe currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProbeState {
    /// Waiting on the result of the tier at this index.
    Probing(usize),
    /// A value was found at this index.
    Found(usize),
    /// Every eligible tier was exhausted.
    NotFound,
}

/// The probe traversal over a primary chain.
///
/// One tier is in flight at a time; the outcome of tier `i` decides the next
/// state. A miss does not simply advance to `i + 1`: it scans forward for
/// the first tier that is either skip-ahead eligible or retains entries
/// longer than tier `i`, and jumps there. Tiers that pass neither test are
/// skipped because a miss at `i` already implies they cannot hold the key
/// any longer.
#[derive(Debug)]
pub(crate) struct ProbePlan<'a> {
    tiers: &'a [TierMetadata],
    state: ProbeState,
}

impl<'a> ProbePlan<'a> {
    /// Starts a probe at the first tier.
    pub(crate) fn new(tiers: &'a [TierMetadata]) -> Self {
        let state = if tiers.is_empty() {
            ProbeState::NotFound
        } else {
            ProbeState::Probing(0)
        };
        Self { tiers, state }
    }

    /// The index currently awaiting a result, if the probe is still running.
    pub(crate) fn current(&self) -> Option<usize> {
        match self.state {
            ProbeState::Probing(index) => Some(index),
            ProbeState::Found(_) | ProbeState::NotFound => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> ProbeState {
        self.state
    }

    /// The current tier returned a value.
    pub(crate) fn on_hit(&mut self) {
        if let ProbeState::Probing(index) = self.state {
            self.state = ProbeState::Found(index);
        }
    }

    /// The current tier answered cleanly but had no value: jump to the next
    /// tier worth checking, if any.
    pub(crate) fn on_miss(&mut self) {
        let ProbeState::Probing(index) = self.state else {
            return;
        };
        let current_ttl = self.tiers[index].default_ttl;
        let next = (index + 1..self.tiers.len())
            .find(|&j| self.tiers[j].skip_ahead_on_miss || self.tiers[j].default_ttl > current_ttl);
        self.state = match next {
            Some(j) => ProbeState::Probing(j),
            None => ProbeState::NotFound,
        };
    }

    /// The current tier failed: fall through to the next tier in order, or
    /// give up if this was the last one.
    pub(crate) fn on_error(&mut self) {
        let ProbeState::Probing(index) = self.state else {
            return;
        };
        self.state = if index + 1 < self.tiers.len() {
            ProbeState::Probing(index + 1)
        } else {
            ProbeState::NotFound
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use stratum_tier::TierKind;

    fn tier(ttl_secs: u64, skip_ahead: bool) -> TierMetadata {
        TierMetadata::new(TierKind::Memory)
            .default_ttl(Duration::from_secs(ttl_secs))
            .skip_ahead_on_miss(skip_ahead)
    }

    #[test]
    fn empty_chain_starts_not_found() {
        let plan = ProbePlan::new(&[]);
        assert_eq!(plan.state(), ProbeState::NotFound);
        assert_eq!(plan.current(), None);
    }

    #[test]
    fn hit_terminates_at_current_index() {
        let tiers = [tier(60, true), tier(600, true)];
        let mut plan = ProbePlan::new(&tiers);
        assert_eq!(plan.current(), Some(0));
        plan.on_hit();
        assert_eq!(plan.state(), ProbeState::Found(0));
        assert_eq!(plan.current(), None);
    }

    #[test]
    fn miss_advances_to_skip_ahead_eligible_tier() {
        let tiers = [tier(60, true), tier(600, true)];
        let mut plan = ProbePlan::new(&tiers);
        plan.on_miss();
        assert_eq!(plan.state(), ProbeState::Probing(1));
    }

    #[test]
    fn miss_jumps_past_ineligible_shorter_lived_tiers() {
        // Tier 1 opted out of skip-ahead and retains entries no longer than
        // tier 0, so a miss at 0 goes straight to tier 2.
        let tiers = [tier(60, true), tier(60, false), tier(600, false)];
        let mut plan = ProbePlan::new(&tiers);
        plan.on_miss();
        assert_eq!(plan.state(), ProbeState::Probing(2));
    }

    #[test]
    fn longer_ttl_qualifies_even_without_skip_ahead_flag() {
        let tiers = [tier(60, true), tier(600, false)];
        let mut plan = ProbePlan::new(&tiers);
        plan.on_miss();
        assert_eq!(plan.state(), ProbeState::Probing(1));
    }

    #[test]
    fn miss_with_no_eligible_tier_ends_not_found() {
        let tiers = [tier(600, true), tier(60, false)];
        let mut plan = ProbePlan::new(&tiers);
        plan.on_miss();
        assert_eq!(plan.state(), ProbeState::NotFound);
    }

    #[test]
    fn error_advances_one_tier_regardless_of_eligibility() {
        // Errors fall through in index order, ignoring skip-ahead rules.
        let tiers = [tier(60, true), tier(60, false), tier(600, false)];
        let mut plan = ProbePlan::new(&tiers);
        plan.on_error();
        assert_eq!(plan.state(), ProbeState::Probing(1));
    }

    #[test]
    fn error_at_last_tier_ends_not_found() {
        let tiers = [tier(60, true)];
        let mut plan = ProbePlan::new(&tiers);
        plan.on_error();
        assert_eq!(plan.state(), ProbeState::NotFound);
    }

    #[test]
    fn terminal_states_ignore_further_events() {
        let tiers = [tier(60, true), tier(600, true)];
        let mut plan = ProbePlan::new(&tiers);
        plan.on_hit();
        plan.on_miss();
        plan.on_error();
        assert_eq!(plan.state(), ProbeState::Found(0));
    }
}
