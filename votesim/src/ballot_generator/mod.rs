// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! Stochastic models that make a preference profile out of a [BlocModel].
//!
//! Each generated ballot is one voter: first the voter's bloc is chosen according to the
//! bloc proportions, then a ranking is drawn from the bloc's model. Generated ballots have
//! weight 1, and the resulting profile is condensed.
//!
//! Some models draw parameters once per profile (candidate positions, a distribution over
//! rankings) and then draw every voter from them. They override [BallotGenerator::profile_sampler].

pub mod slate_plackett_luce;
pub mod plackett_luce;
pub mod bradley_terry;
pub mod alternating_crossover;
pub mod impartial_culture;
pub mod ballot_simplex;
pub mod one_dim_spatial;
pub mod truncated;

use std::collections::BTreeMap;
use rand::RngCore;
use crate::ballot::{Ballot, RankPosition, Ranking};
use crate::bloc_model::BlocModel;
use crate::candidate::{BlocName, Candidate};
use crate::errors::ValidationError;
use crate::preference_profile::PreferenceProfile;
use crate::random_util::choose_weighted_index;
use crate::weight::Weight;

/// Draws the ranking of one voter from a bloc, with any per-profile parameters already fixed.
pub type RankingSampler<'a> = Box<dyn FnMut(&str,&mut dyn RngCore)->Ranking + 'a>;

pub trait BallotGenerator {
    /// The parameters the generator was built from.
    fn model(&self) -> &BlocModel;

    /// A name for logs and command lines.
    fn name(&self) -> &'static str;

    /// Draw the ranking of one voter from the given bloc.
    fn generate_ranking(&self,bloc:&str,rng:&mut dyn RngCore) -> Ranking;

    /// Called once at the start of each profile. The default draws every voter independently with [BallotGenerator::generate_ranking].
    fn profile_sampler<'a>(&'a self,_rng:&mut dyn RngCore) -> Result<RankingSampler<'a>,ValidationError> {
        Ok(Box::new(move |bloc:&str,rng:&mut dyn RngCore|self.generate_ranking(bloc,rng)))
    }

    /// Generate `number_of_ballots` voters, returning the aggregate profile and the sub-profile of each bloc.
    /// Both come from the same draws, so the bloc profiles always add up to the aggregate. Every bloc
    /// is present in the map, possibly with an empty profile.
    fn generate_profile_by_bloc(&self,number_of_ballots:usize,rng:&mut dyn RngCore) -> Result<(PreferenceProfile,BTreeMap<BlocName,PreferenceProfile>),ValidationError> {
        let model = self.model();
        let weights : Vec<f64> = model.blocs().iter().map(|(_,p)|*p).collect();
        let mut by_bloc : Vec<Vec<Ballot>> = vec![vec![];weights.len()];
        let mut sampler = self.profile_sampler(rng)?;
        for _ in 0..number_of_ballots {
            let Some(bloc) = choose_weighted_index(&weights,rng) else { break };
            let ranking = sampler(&model.blocs()[bloc].0,&mut *rng);
            by_bloc[bloc].push(Ballot::from_ranking(ranking,Weight::one())?);
        }
        let candidates = model.all_candidates();
        let mut all = vec![];
        let mut res = BTreeMap::new();
        for ((bloc,_),ballots) in model.blocs().iter().zip(by_bloc) {
            all.extend(ballots.iter().cloned());
            res.insert(bloc.clone(),PreferenceProfile::new(ballots,candidates.clone())?.condense());
        }
        let aggregate = PreferenceProfile::new(all,candidates)?.condense();
        log::debug!("{} generated {} ballots, {} distinct",self.name(),number_of_ballots,aggregate.len());
        Ok((aggregate,res))
    }

    /// Generate a profile of `number_of_ballots` voters.
    fn generate_profile(&self,number_of_ballots:usize,rng:&mut dyn RngCore) -> Result<PreferenceProfile,ValidationError> {
        Ok(self.generate_profile_by_bloc(number_of_ballots,rng)?.0)
    }
}

impl BallotGenerator for Box<dyn BallotGenerator> {
    fn model(&self) -> &BlocModel { self.as_ref().model() }
    fn name(&self) -> &'static str { self.as_ref().name() }
    fn generate_ranking(&self, bloc: &str, rng: &mut dyn RngCore) -> Ranking { self.as_ref().generate_ranking(bloc,rng) }
    fn profile_sampler<'a>(&'a self, rng: &mut dyn RngCore) -> Result<RankingSampler<'a>, ValidationError> { self.as_ref().profile_sampler(rng) }
}

/// A ranking with one candidate per position.
pub(crate) fn linear_ranking<I:IntoIterator<Item=Candidate>>(order:I) -> Ranking {
    order.into_iter().map(|c|RankPosition::from([c])).collect()
}
