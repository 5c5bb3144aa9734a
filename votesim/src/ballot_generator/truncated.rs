// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! Limit the length of the ballots of any generator.

use rand::RngCore;
use crate::ballot::Ranking;
use crate::ballot_generator::{BallotGenerator, RankingSampler};
use crate::bloc_model::BlocModel;
use crate::errors::ValidationError;

/// Keeps only the first `ballot_length` positions of each ranking drawn from `inner`.
#[derive(Debug,Clone)]
pub struct Truncated<G> {
    inner : G,
    ballot_length : usize,
}

impl <G:BallotGenerator> Truncated<G> {
    pub fn new(inner:G,ballot_length:usize) -> Self { Truncated{inner,ballot_length} }
    pub fn ballot_length(&self) -> usize { self.ballot_length }
}

impl <G:BallotGenerator> BallotGenerator for Truncated<G> {
    fn model(&self) -> &BlocModel { self.inner.model() }
    fn name(&self) -> &'static str { self.inner.name() }

    fn generate_ranking(&self, bloc: &str, rng: &mut dyn RngCore) -> Ranking {
        let mut ranking = self.inner.generate_ranking(bloc,rng);
        ranking.truncate(self.ballot_length);
        ranking
    }

    fn profile_sampler<'a>(&'a self, rng: &mut dyn RngCore) -> Result<RankingSampler<'a>, ValidationError> {
        let mut inner = self.inner.profile_sampler(rng)?;
        let ballot_length = self.ballot_length;
        Ok(Box::new(move |bloc:&str,rng:&mut dyn RngCore|{
            let mut ranking = inner(bloc,rng);
            ranking.truncate(ballot_length);
            ranking
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ballot_generator::ballot_simplex::BallotSimplex;
    use crate::ballot_generator::plackett_luce::PlackettLuce;
    use crate::random_util::rng_from_seed;
    use crate::weight::Weight;

    fn model() -> BlocModel {
        BlocModel::from_json(r#"{
            "bloc_voter_prop": {"X": 1.0},
            "slate_to_candidates": {"X": ["A","B","C","D"]},
            "pref_intervals": {"X": {"X": {"A": 0.4, "B": 0.3, "C": 0.2, "D": 0.1}}},
            "cohesion": {"X": {"X": 1.0}}
        }"#).unwrap()
    }

    #[test]
    fn test_short_ballots() {
        let generator = Truncated::new(PlackettLuce::new(model()).unwrap(),2);
        let profile = generator.generate_profile(500,&mut rng_from_seed(Some(9))).unwrap();
        assert_eq!(profile.num_ballots(),Weight::from_integer(500));
        assert!(profile.get_ballots().iter().all(|b|b.ranking().len()==2));
        assert!(profile.len()<=12);
    }

    #[test]
    fn test_keeps_per_profile_draws() {
        let boxed : Box<dyn BallotGenerator> = Box::new(BallotSimplex::from_alpha(model(),0.0,None).unwrap());
        let generator = Truncated::new(boxed,1);
        let profile = generator.generate_profile(300,&mut rng_from_seed(Some(2))).unwrap();
        assert_eq!(profile.len(),1);
        assert_eq!(profile.get_ballots()[0].ranking().len(),1);
    }
}
