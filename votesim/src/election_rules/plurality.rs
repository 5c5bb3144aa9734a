// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! First past the post, generalized to k seats: the k candidates with the most first preferences win.

use rand::RngCore;
use crate::election_rules::{ElectionRule, RoundContext, RoundResult};
use crate::errors::ValidationError;
use crate::tie_resolution::{order_by_tally, TieResolutionUsage};

#[derive(Debug,Clone,Copy,Default)]
pub struct Plurality;

impl ElectionRule for Plurality {
    fn name(&self) -> &'static str { "Plurality" }

    fn run_round(&self, context: &RoundContext, rng: &mut dyn RngCore) -> Result<RoundResult, ValidationError> {
        let tallies = context.first_preference_tallies();
        let (order,tie_resolution) = order_by_tally(tallies.clone().into_iter().collect(),context.seats_remaining,TieResolutionUsage::Election,rng);
        Ok(RoundResult::single_round(context,tallies,order,tie_resolution))
    }
}
