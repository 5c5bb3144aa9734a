// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! Impartial culture: every full ranking of the candidates is equally likely, regardless of bloc.
//! Useful as a null model.

use rand::RngCore;
use rand::seq::SliceRandom;
use crate::ballot::Ranking;
use crate::ballot_generator::{linear_ranking, BallotGenerator};
use crate::bloc_model::BlocModel;
use crate::candidate::Candidate;

#[derive(Debug,Clone)]
pub struct ImpartialCulture {
    model : BlocModel,
    candidates : Vec<Candidate>,
}

impl ImpartialCulture {
    /// Rank every candidate on every slate of the model.
    pub fn new(model:BlocModel) -> Self {
        let candidates = model.all_candidates();
        ImpartialCulture{model,candidates}
    }
}

impl BallotGenerator for ImpartialCulture {
    fn model(&self) -> &BlocModel { &self.model }
    fn name(&self) -> &'static str { "impartial culture" }

    fn generate_ranking(&self, _bloc: &str, rng: &mut dyn RngCore) -> Ranking {
        let mut order = self.candidates.clone();
        order.shuffle(rng);
        linear_ranking(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_util::rng_from_seed;

    #[test]
    fn test_uniform_first_places() {
        let model = BlocModel::from_json(r#"{
            "bloc_voter_prop": {"X": 1.0},
            "slate_to_candidates": {"X": ["A","B"], "Y": ["C"]},
            "pref_intervals": {"X": {"X": {"A": 1.0, "B": 0.0}}},
            "cohesion": {"X": {"X": 1.0}}
        }"#).unwrap();
        let generator = ImpartialCulture::new(model);
        let profile = generator.generate_profile(3000,&mut rng_from_seed(Some(11))).unwrap();
        assert!(profile.len()<=6);
        for (_,tally) in profile.first_place_tallies() {
            assert!((tally.to_f64()-1000.0).abs()<120.0);
        }
    }
}
