// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! Election rules. Each rule is a way of doing one round of counting; the
//! [crate::election::Election] runs rounds until the seats are filled.

pub mod plurality;
pub mod stv;
pub mod borda;

use std::collections::{BTreeMap, BTreeSet};
use rand::RngCore;
use crate::candidate::Candidate;
use crate::election_state::ElectionReason;
use crate::errors::ValidationError;
use crate::preference_profile::PreferenceProfile;
use crate::tie_resolution::TieResolutionExplicitDecision;
use crate::weight::Weight;

/// What a rule is given at the start of a round.
pub struct RoundContext<'a> {
    /// 1 for the first round.
    pub round : usize,
    /// the profile left after the previous round, or the initial profile.
    pub profile : &'a PreferenceProfile,
    /// candidates neither elected nor eliminated, in the order of the initial profile.
    pub continuing : &'a [Candidate],
    /// total seats in the election.
    pub seats : usize,
    /// seats not yet filled.
    pub seats_remaining : usize,
    /// total weight of the initial profile.
    pub initial_total : &'a Weight,
}

impl <'a> RoundContext<'a> {
    /// A tally of zero for each continuing candidate.
    pub fn zero_tallies(&self) -> BTreeMap<Candidate,Weight> {
        self.continuing.iter().map(|c|(c.clone(),Weight::zero())).collect()
    }

    /// First preference tallies of the continuing candidates.
    pub fn first_preference_tallies(&self) -> BTreeMap<Candidate,Weight> {
        let mut res = self.zero_tallies();
        for (c,t) in self.profile.first_place_tallies() {
            if let Some(tally) = res.get_mut(&c) { *tally+=t; }
        }
        res
    }
}

/// What happened in a round.
#[derive(Clone,Debug)]
pub struct RoundResult {
    pub tallies : BTreeMap<Candidate,Weight>,
    /// every continuing candidate, highest tally first (after tie resolution).
    pub order : Vec<Candidate>,
    pub elected : Vec<Candidate>,
    pub elected_because : Option<ElectionReason>,
    pub eliminated : Vec<Candidate>,
    pub tie_resolutions : Vec<TieResolutionExplicitDecision>,
    /// the profile for the next round, without the candidates elected or eliminated.
    pub profile : PreferenceProfile,
}

impl RoundResult {
    /// Elect the first `elected` of the order and eliminate the rest. Used by rules that only ever have one round.
    pub(crate) fn single_round(context:&RoundContext,tallies:BTreeMap<Candidate,Weight>,order:Vec<Candidate>,tie_resolution:Option<TieResolutionExplicitDecision>) -> Self {
        let num_elected = context.seats_remaining.min(order.len());
        let elected = order[..num_elected].to_vec();
        let eliminated = order[num_elected..].to_vec();
        let profile = remove_candidates(context.profile,elected.iter().chain(eliminated.iter()));
        RoundResult{ tallies, order, elected, elected_because: Some(ElectionReason::HighestTally), eliminated, tie_resolutions: tie_resolution.into_iter().collect(), profile }
    }
}

pub(crate) fn remove_candidates<'a>(profile:&PreferenceProfile,candidates:impl Iterator<Item=&'a Candidate>) -> PreferenceProfile {
    let removed : BTreeSet<Candidate> = candidates.cloned().collect();
    profile.with_candidates_removed(&removed)
}

/// A way of counting. The rule need not be deterministic, but must only use the provided source of randomness.
pub trait ElectionRule : Send + Sync {
    fn name(&self) -> &'static str;
    fn run_round(&self,context:&RoundContext,rng:&mut dyn RngCore) -> Result<RoundResult,ValidationError>;
}

impl ElectionRule for Box<dyn ElectionRule> {
    fn name(&self) -> &'static str { self.as_ref().name() }
    fn run_round(&self, context: &RoundContext, rng: &mut dyn RngCore) -> Result<RoundResult, ValidationError> { self.as_ref().run_round(context,rng) }
}
