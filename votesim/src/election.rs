// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! An election: a profile, a number of seats, and a rule, run at most once.

use std::collections::BTreeSet;
use std::sync::Mutex;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use crate::candidate::Candidate;
use crate::election_rules::{ElectionRule, RoundContext};
use crate::election_state::{ElectionOutcome, RoundRecord};
use crate::errors::ValidationError;
use crate::preference_profile::PreferenceProfile;
use crate::random_util::{rng_from_seed, Randomness};

#[derive(Copy,Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub enum ElectionStatus {
    /// constructed, not yet run.
    Pending,
    /// some thread is counting.
    Running,
    /// the outcome is computed and cached.
    Complete,
}

/// A validated election. The first call to [Election::run_election] computes the outcome, and every
/// later call (from any thread) returns the same outcome without recomputing or drawing new random numbers.
pub struct Election {
    profile : PreferenceProfile,
    seats : usize,
    rule : Box<dyn ElectionRule>,
    /// used for tie resolution. Held for the duration of the count.
    randomness : Mutex<Randomness>,
    outcome : OnceCell<ElectionOutcome>,
}

impl Election {
    /// Check the arguments and make an election. `seed` makes tie resolution reproducible.
    pub fn new<R:ElectionRule+'static>(profile:PreferenceProfile,seats:usize,rule:R,seed:Option<u64>) -> Result<Self,ValidationError> {
        let candidates = profile.candidates();
        if seats==0 || seats>candidates.len() { return Err(ValidationError::InvalidSeats{seats,candidates:candidates.len()}); }
        if profile.num_ballots().is_zero() { return Err(ValidationError::ZeroWeightProfile); }
        Ok(Election{ profile, seats, rule: Box::new(rule), randomness: Mutex::new(rng_from_seed(seed)), outcome: OnceCell::new() })
    }

    pub fn profile(&self) -> &PreferenceProfile { &self.profile }
    pub fn seats(&self) -> usize { self.seats }
    pub fn rule_name(&self) -> &'static str { self.rule.name() }

    /// A poisoned lock means a count started and did not finish, so it is reported as running.
    pub fn status(&self) -> ElectionStatus {
        if self.outcome.get().is_some() { return ElectionStatus::Complete }
        match self.randomness.try_lock() {
            Ok(_) => ElectionStatus::Pending,
            Err(_) => ElectionStatus::Running,
        }
    }

    /// The outcome, computed on the first call.
    pub fn run_election(&self) -> Result<&ElectionOutcome,ValidationError> {
        self.outcome.get_or_try_init(||{
            let mut rng = self.randomness.lock().unwrap_or_else(|poisoned|poisoned.into_inner());
            self.count(&mut rng)
        })
    }

    fn count(&self,rng:&mut Randomness) -> Result<ElectionOutcome,ValidationError> {
        let candidates = self.profile.candidates();
        let mut continuing : Vec<Candidate> = candidates.clone();
        let mut profile = self.profile.clone();
        // names on ballots that are not standing are skipped, so later preferences count.
        let not_standing : BTreeSet<Candidate> = profile.get_candidates().into_iter().filter(|c|!continuing.contains(c)).collect();
        if !not_standing.is_empty() {
            log::debug!("Removing {} candidates that are not standing : {:?}",not_standing.len(),not_standing);
            profile = profile.with_candidates_removed(&not_standing);
        }
        let initial_total = profile.num_ballots();
        log::info!("Running {} election for {} seats with {} candidates, {} votes",self.rule.name(),self.seats,candidates.len(),initial_total);
        let mut seats_remaining = self.seats;
        let mut rounds = vec![];
        while seats_remaining>0 && !continuing.is_empty() {
            let round = rounds.len()+1;
            let context = RoundContext{ round, profile: &profile, continuing: &continuing, seats: self.seats, seats_remaining, initial_total: &initial_total };
            let result = self.rule.run_round(&context,rng)?;
            if result.elected.is_empty() && result.eliminated.is_empty() { return Err(ValidationError::Stalled(round)); }
            for (c,t) in &result.tallies { log::debug!("Round {} tally {} : {}",round,c,t); }
            log::info!("Round {} elected {:?} eliminated {:?}",round,result.elected,result.eliminated);
            seats_remaining = seats_remaining.saturating_sub(result.elected.len());
            continuing.retain(|c|!(result.elected.contains(c) || result.eliminated.contains(c)));
            let remaining = result.order.iter().filter(|c|continuing.contains(c)).cloned().collect();
            profile = result.profile.clone();
            rounds.push(RoundRecord{
                round,
                tallies: result.tallies,
                elected: result.elected,
                elected_because: result.elected_because,
                eliminated: result.eliminated,
                remaining,
                tie_resolutions: result.tie_resolutions,
                profile: result.profile,
            });
        }
        Ok(ElectionOutcome{ rule: self.rule.name().to_string(), seats: self.seats, candidates, rounds })
    }
}
