// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! The Borda count. With n continuing candidates, a candidate in position i (0 based) of a ballot
//! gets n-i points, times the ballot weight. Every candidate in a tied position gets that position's
//! points, and unranked candidates get nothing. The k highest scores win.

use rand::RngCore;
use crate::election_rules::{ElectionRule, RoundContext, RoundResult};
use crate::errors::ValidationError;
use crate::tie_resolution::{order_by_tally, TieResolutionUsage};
use crate::weight::Weight;

#[derive(Debug,Clone,Copy,Default)]
pub struct Borda;

impl ElectionRule for Borda {
    fn name(&self) -> &'static str { "Borda" }

    fn run_round(&self, context: &RoundContext, rng: &mut dyn RngCore) -> Result<RoundResult, ValidationError> {
        let n = context.continuing.len();
        let mut scores = context.zero_tallies();
        for ballot in context.profile.get_ballots() {
            for (i,position) in ballot.ranking().iter().enumerate().take(n) {
                let points = ballot.weight()*&Weight::from_integer(n-i);
                for c in position {
                    if let Some(score) = scores.get_mut(c) { *score+=&points; }
                }
            }
        }
        let (order,tie_resolution) = order_by_tally(scores.clone().into_iter().collect(),context.seats_remaining,TieResolutionUsage::Election,rng);
        Ok(RoundResult::single_round(context,scores,order,tie_resolution))
    }
}
