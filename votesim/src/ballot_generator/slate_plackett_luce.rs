// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! The slate Plackett–Luce model.
//!
//! A voter fills their ballot one position at a time. For each position they first pick a
//! slate, with probability proportional to their bloc's cohesion toward that slate (among
//! slates that still have unplaced candidates), then pick a candidate from that slate
//! by the bloc's preference interval for it, renormalized over the candidates not yet placed.

use rand::RngCore;
use crate::ballot::Ranking;
use crate::ballot_generator::{linear_ranking, BallotGenerator};
use crate::bloc_model::BlocModel;
use crate::candidate::Candidate;
use crate::random_util::choose_weighted_index;

#[derive(Debug,Clone)]
pub struct SlatePlackettLuce {
    model : BlocModel,
}

impl SlatePlackettLuce {
    pub fn new(model:BlocModel) -> Self { SlatePlackettLuce{model} }
}

impl BallotGenerator for SlatePlackettLuce {
    fn model(&self) -> &BlocModel { &self.model }
    fn name(&self) -> &'static str { "slate Plackett-Luce" }

    fn generate_ranking(&self, bloc: &str, rng: &mut dyn RngCore) -> Ranking {
        let slates = self.model.bloc_slates(bloc);
        let mut remaining : Vec<Vec<&Candidate>> = slates.iter().map(|(_,_,interval)|interval.candidates().collect()).collect();
        let mut order = vec![];
        loop {
            let open : Vec<usize> = (0..slates.len()).filter(|&i|!remaining[i].is_empty()).collect();
            let cohesions : Vec<f64> = open.iter().map(|&i|slates[i].1).collect();
            let Some(chosen) = choose_weighted_index(&cohesions,rng) else { break };
            let slate = open[chosen];
            let Some(candidate) = slates[slate].2.sample_from(&remaining[slate],rng) else { break };
            remaining[slate].retain(|c|*c!=candidate);
            order.push(candidate.clone());
        }
        linear_ranking(order)
    }
}
