// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! A one dimensional spatial model. Candidates and voters are placed on a line by standard
//! normal draws, and each voter ranks every candidate by distance, closest first.
//! Candidate positions are drawn once per profile unless fixed in advance. Blocs are ignored.

use std::collections::BTreeMap;
use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};
use crate::ballot::Ranking;
use crate::ballot_generator::{linear_ranking, BallotGenerator, RankingSampler};
use crate::bloc_model::BlocModel;
use crate::candidate::Candidate;
use crate::errors::ValidationError;

#[derive(Debug,Clone)]
pub struct OneDimSpatial {
    model : BlocModel,
    candidates : Vec<Candidate>,
    positions : Option<Vec<f64>>,
}

impl OneDimSpatial {
    pub fn new(model:BlocModel) -> Self {
        let candidates = model.all_candidates();
        OneDimSpatial{model,candidates,positions:None}
    }

    /// Use the same candidate positions for every profile.
    pub fn with_positions(model:BlocModel,positions:&BTreeMap<Candidate,f64>) -> Result<Self,ValidationError> {
        let candidates = model.all_candidates();
        let mut fixed = Vec::with_capacity(candidates.len());
        for c in &candidates {
            let position = *positions.get(c).ok_or_else(||ValidationError::MissingPosition(c.clone()))?;
            if !position.is_finite() { return Err(ValidationError::NegativeParameter(format!("position of {}",c),position)); }
            fixed.push(position);
        }
        Ok(OneDimSpatial{model,candidates,positions:Some(fixed)})
    }

    fn draw_positions(&self,rng:&mut dyn RngCore) -> Vec<f64> {
        self.candidates.iter().map(|_|StandardNormal.sample(rng)).collect()
    }

    fn rank_by_distance(&self,positions:&[f64],voter:f64) -> Ranking {
        let mut order : Vec<(f64,&Candidate)> = positions.iter().map(|p|(p-voter).abs()).zip(self.candidates.iter()).collect();
        order.sort_by(|a,b|a.0.total_cmp(&b.0));
        linear_ranking(order.into_iter().map(|(_,c)|c.clone()))
    }
}

impl BallotGenerator for OneDimSpatial {
    fn model(&self) -> &BlocModel { &self.model }
    fn name(&self) -> &'static str { "one dimensional spatial" }

    fn generate_ranking(&self, _bloc: &str, rng: &mut dyn RngCore) -> Ranking {
        let positions = match &self.positions {
            Some(fixed) => fixed.clone(),
            None => self.draw_positions(rng),
        };
        let voter : f64 = StandardNormal.sample(rng);
        self.rank_by_distance(&positions,voter)
    }

    fn profile_sampler<'a>(&'a self, rng: &mut dyn RngCore) -> Result<RankingSampler<'a>, ValidationError> {
        let positions = match &self.positions {
            Some(fixed) => fixed.clone(),
            None => self.draw_positions(rng),
        };
        log::trace!("Candidate positions {:?}",positions);
        Ok(Box::new(move |_bloc:&str,rng:&mut dyn RngCore|{
            let voter : f64 = StandardNormal.sample(rng);
            self.rank_by_distance(&positions,voter)
        }))
    }
}
