// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! The alternating crossover model. Every bloc has a slate of the same name. Most voters
//! rank their own slate first, then the other slates. A voter who crosses over to another
//! slate alternates between that slate and their own, starting with the other slate.
//! Within a slate, candidates are ordered by a Plackett–Luce draw from the bloc's interval.

use rand::RngCore;
use crate::ballot::Ranking;
use crate::ballot_generator::{linear_ranking, BallotGenerator};
use crate::bloc_model::BlocModel;
use crate::candidate::Candidate;
use crate::errors::ValidationError;
use crate::random_util::choose_weighted_index;

#[derive(Debug,Clone)]
pub struct AlternatingCrossover {
    model : BlocModel,
}

impl AlternatingCrossover {
    pub fn new(model:BlocModel) -> Result<Self,ValidationError> {
        for (bloc,_) in model.blocs() {
            if model.slate_candidates(bloc).is_none() { return Err(ValidationError::NoSlateForBloc(bloc.clone())); }
        }
        Ok(AlternatingCrossover{model})
    }

    /// Slates in the order a voter of the bloc would use them after the ones already taken: a draw without replacement weighted by cohesion.
    fn remaining_slate_order(&self,bloc:&str,taken:&[&str],rng:&mut dyn RngCore) -> Vec<String> {
        let mut slates : Vec<&String> = self.model.slates().iter().map(|(s,_)|s).filter(|s|!taken.contains(&s.as_str())).collect();
        let mut res = vec![];
        while !slates.is_empty() {
            let weights : Vec<f64> = slates.iter().map(|s|self.model.cohesion(bloc,s)).collect();
            let Some(i) = choose_weighted_index(&weights,rng) else { break };
            res.push(slates.remove(i).clone());
        }
        res
    }

    fn slate_order(&self,bloc:&str,slate:&str,rng:&mut dyn RngCore) -> Vec<Candidate> {
        self.model.interval(bloc,slate).map(|interval|interval.sample_ordering(rng)).unwrap_or_default()
    }
}

impl BallotGenerator for AlternatingCrossover {
    fn model(&self) -> &BlocModel { &self.model }
    fn name(&self) -> &'static str { "alternating crossover" }

    fn generate_ranking(&self, bloc: &str, rng: &mut dyn RngCore) -> Ranking {
        // the last weight is the chance of not crossing over.
        let others : Vec<&String> = self.model.slates().iter().map(|(s,_)|s).filter(|s|s.as_str()!=bloc).collect();
        let mut weights : Vec<f64> = others.iter().map(|s|self.model.crossover(bloc,s)).collect();
        weights.push((1.0-weights.iter().sum::<f64>()).max(0.0));
        let crossed = choose_weighted_index(&weights,rng).and_then(|i|others.get(i).copied());
        let mut order : Vec<Candidate> = vec![];
        let taken : Vec<&str> = match crossed {
            Some(other) => {
                let theirs = self.slate_order(bloc,other,rng);
                let ours = self.slate_order(bloc,bloc,rng);
                for i in 0..theirs.len().max(ours.len()) {
                    if let Some(c) = theirs.get(i) { order.push(c.clone()); }
                    if let Some(c) = ours.get(i) { order.push(c.clone()); }
                }
                vec![other.as_str(),bloc]
            }
            None => {
                order.extend(self.slate_order(bloc,bloc,rng));
                vec![bloc]
            }
        };
        for slate in self.remaining_slate_order(bloc,&taken,rng) {
            order.extend(self.slate_order(bloc,&slate,rng));
        }
        linear_ranking(order)
    }
}
