// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! The Bradley–Terry model. The probability of a full ranking is proportional to the product,
//! over every pair of candidates, of the chance the higher ranked one wins a head to head
//! contest, p_i/(p_i+p_j). Rankings are drawn from the exactly enumerated distribution, so
//! the number of candidates is limited.

use std::collections::BTreeMap;
use itertools::Itertools;
use rand::RngCore;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use crate::ballot::Ranking;
use crate::ballot_generator::{linear_ranking, BallotGenerator};
use crate::bloc_model::BlocModel;
use crate::candidate::{BlocName, Candidate};
use crate::errors::{ArithmeticError, ValidationError};
use crate::preference_interval::PreferenceInterval;

/// Enumeration is over n! rankings.
pub const MAX_BRADLEY_TERRY_CANDIDATES : usize = 8;

#[derive(Debug,Clone)]
struct RankingDistribution {
    rankings : Vec<Vec<Candidate>>,
    distribution : WeightedIndex<f64>,
}

#[derive(Debug,Clone)]
pub struct BradleyTerry {
    model : BlocModel,
    by_bloc : BTreeMap<BlocName,RankingDistribution>,
}

/// Unnormalized probability of a ranking. Two candidates with zero support are equally likely either way round.
fn ranking_weight(ranking:&[&Candidate],interval:&PreferenceInterval) -> f64 {
    let p : Vec<f64> = ranking.iter().map(|c|interval.probability(c.name())).collect();
    let mut res = 1.0;
    for i in 0..p.len() {
        for j in i+1..p.len() {
            let sum = p[i]+p[j];
            res *= if sum>0.0 { p[i]/sum } else { 0.5 };
        }
    }
    res
}

impl BradleyTerry {
    pub fn new(model:BlocModel) -> Result<Self,ValidationError> {
        let mut by_bloc = BTreeMap::new();
        for (bloc,_) in model.blocs() {
            let interval = model.combined_interval(bloc)?;
            if interval.len()>MAX_BRADLEY_TERRY_CANDIDATES { return Err(ValidationError::TooManyCandidates(interval.len(),MAX_BRADLEY_TERRY_CANDIDATES)); }
            let candidates : Vec<&Candidate> = interval.candidates().collect();
            let mut rankings = vec![];
            let mut weights = vec![];
            for ranking in candidates.iter().copied().permutations(candidates.len()) {
                weights.push(ranking_weight(&ranking,&interval));
                rankings.push(ranking.into_iter().cloned().collect());
            }
            let distribution = WeightedIndex::new(&weights).map_err(|_|ArithmeticError::DegenerateNormalization)?;
            by_bloc.insert(bloc.clone(),RankingDistribution{rankings,distribution});
        }
        Ok(BradleyTerry{model,by_bloc})
    }
}

impl BallotGenerator for BradleyTerry {
    fn model(&self) -> &BlocModel { &self.model }
    fn name(&self) -> &'static str { "Bradley-Terry" }

    fn generate_ranking(&self, bloc: &str, rng: &mut dyn RngCore) -> Ranking {
        match self.by_bloc.get(bloc) {
            Some(d) => linear_ranking(d.rankings[d.distribution.sample(rng)].iter().cloned()),
            None => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_util::rng_from_seed;

    fn model(slate:&str,interval:&str) -> BlocModel {
        BlocModel::from_json(&format!(r#"{{
            "bloc_voter_prop": {{"X": 1.0}},
            "slate_to_candidates": {{"X": {}}},
            "pref_intervals": {{"X": {{"X": {}}}}},
            "cohesion": {{"X": {{"X": 1.0}}}}
        }}"#,slate,interval)).unwrap()
    }

    #[test]
    fn test_pairwise_weights() {
        let interval = PreferenceInterval::new([("A",0.75),("B",0.25)]).unwrap();
        let a : Candidate = "A".into();
        let b : Candidate = "B".into();
        assert!((ranking_weight(&[&a,&b],&interval)-0.75).abs()<1e-12);
        assert!((ranking_weight(&[&b,&a],&interval)-0.25).abs()<1e-12);
    }

    #[test]
    fn test_strong_favourite_usually_first() {
        let generator = BradleyTerry::new(model(r#"["A","B","C"]"#,r#"{"A": 0.9, "B": 0.05, "C": 0.05}"#)).unwrap();
        let profile = generator.generate_profile(2000,&mut rng_from_seed(Some(8))).unwrap();
        let tallies = profile.first_place_tallies();
        assert!(tallies["A"].to_f64()>1500.0);
    }

    #[test]
    fn test_too_many_candidates() {
        let names : Vec<String> = (0..9).map(|i|format!("\"C{}\"",i)).collect();
        let interval : Vec<String> = (0..9).map(|i|format!("\"C{}\": 1.0",i)).collect();
        let model = model(&format!("[{}]",names.join(",")),&format!("{{{}}}",interval.join(",")));
        assert!(matches!(BradleyTerry::new(model),Err(ValidationError::TooManyCandidates(9,8))));
    }
}
