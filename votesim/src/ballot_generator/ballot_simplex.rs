// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! The ballot simplex: a probability distribution over every ranking of `ballot_length`
//! candidates, ignoring blocs.
//!
//! The distribution is either given by a point of support for each candidate, in which case the
//! chance of a ranking is proportional to the product of the support of the candidates on it,
//! or drawn afresh for each profile from a symmetric Dirichlet distribution with parameter alpha.
//! Alpha of 1 is impartial anonymous culture, where every anonymous profile is equally likely.
//! Alpha of 0 puts every voter on the same ranking.

use itertools::Itertools;
use rand::{Rng, RngCore};
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use crate::ballot::Ranking;
use crate::ballot_generator::{linear_ranking, BallotGenerator, RankingSampler};
use crate::bloc_model::BlocModel;
use crate::candidate::Candidate;
use crate::errors::{ArithmeticError, ValidationError};
use crate::preference_interval::PreferenceInterval;
use crate::random_util::dirichlet_weights;

/// Enumeration is over up to n! rankings.
pub const MAX_SIMPLEX_CANDIDATES : usize = 8;

#[derive(Debug,Clone)]
enum SimplexPoint {
    Fixed(WeightedIndex<f64>),
    Dirichlet(f64),
}

#[derive(Debug,Clone)]
pub struct BallotSimplex {
    model : BlocModel,
    rankings : Vec<Vec<Candidate>>,
    point : SimplexPoint,
}

/// Every ordered selection of `ballot_length` (default all) of the model's candidates.
fn all_rankings(model:&BlocModel,ballot_length:Option<usize>) -> Result<Vec<Vec<Candidate>>,ValidationError> {
    let candidates = model.all_candidates();
    if candidates.len()>MAX_SIMPLEX_CANDIDATES { return Err(ValidationError::TooManyCandidates(candidates.len(),MAX_SIMPLEX_CANDIDATES)); }
    let length = ballot_length.unwrap_or(candidates.len()).min(candidates.len());
    Ok(candidates.into_iter().permutations(length).collect())
}

impl BallotSimplex {
    /// A fixed distribution. The point need not mention every candidate; those it omits never appear.
    pub fn from_point(model:BlocModel,point:&PreferenceInterval,ballot_length:Option<usize>) -> Result<Self,ValidationError> {
        let rankings = all_rankings(&model,ballot_length)?;
        let weights : Vec<f64> = rankings.iter().map(|r|r.iter().map(|c|point.probability(c.name())).product::<f64>()).collect();
        let distribution = WeightedIndex::new(&weights).map_err(|_|ArithmeticError::DegenerateNormalization)?;
        Ok(BallotSimplex{model,rankings,point:SimplexPoint::Fixed(distribution)})
    }

    /// A distribution drawn for each profile from the symmetric Dirichlet distribution.
    pub fn from_alpha(model:BlocModel,alpha:f64,ballot_length:Option<usize>) -> Result<Self,ValidationError> {
        if !alpha.is_finite() || alpha<0.0 { return Err(ValidationError::NonPositiveAlpha(alpha)); }
        let rankings = all_rankings(&model,ballot_length)?;
        Ok(BallotSimplex{model,rankings,point:SimplexPoint::Dirichlet(alpha)})
    }

    pub fn impartial_anonymous_culture(model:BlocModel,ballot_length:Option<usize>) -> Result<Self,ValidationError> {
        Self::from_alpha(model,1.0,ballot_length)
    }

    pub fn num_rankings(&self) -> usize { self.rankings.len() }

    fn ranking(&self,index:usize) -> Ranking { linear_ranking(self.rankings[index].iter().cloned()) }
}

impl BallotGenerator for BallotSimplex {
    fn model(&self) -> &BlocModel { &self.model }
    fn name(&self) -> &'static str {
        match self.point {
            SimplexPoint::Dirichlet(alpha) if alpha==1.0 => "impartial anonymous culture",
            _ => "ballot simplex",
        }
    }

    /// For a single voter, a Dirichlet draw averages out to every ranking being equally likely.
    fn generate_ranking(&self, _bloc: &str, rng: &mut dyn RngCore) -> Ranking {
        match &self.point {
            SimplexPoint::Fixed(distribution) => self.ranking(distribution.sample(rng)),
            SimplexPoint::Dirichlet(_) => self.ranking(rng.random_range(0..self.rankings.len())),
        }
    }

    fn profile_sampler<'a>(&'a self, rng: &mut dyn RngCore) -> Result<RankingSampler<'a>, ValidationError> {
        let distribution = match &self.point {
            SimplexPoint::Fixed(distribution) => distribution.clone(),
            SimplexPoint::Dirichlet(alpha) => {
                let weights = dirichlet_weights(self.rankings.len(),*alpha,rng)?;
                WeightedIndex::new(&weights).map_err(|_|ArithmeticError::DegenerateNormalization)?
            }
        };
        Ok(Box::new(move |_bloc:&str,rng:&mut dyn RngCore|self.ranking(distribution.sample(rng))))
    }
}
