// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! The plain Plackett–Luce model. Each bloc has one interval over all candidates, the
//! cohesion weighted mix of its slate intervals, and each ballot is a sequence of draws
//! from it without replacement.

use std::collections::BTreeMap;
use rand::RngCore;
use crate::ballot::Ranking;
use crate::ballot_generator::{linear_ranking, BallotGenerator};
use crate::bloc_model::BlocModel;
use crate::candidate::BlocName;
use crate::errors::ValidationError;
use crate::preference_interval::PreferenceInterval;

#[derive(Debug,Clone)]
pub struct PlackettLuce {
    model : BlocModel,
    combined : BTreeMap<BlocName,PreferenceInterval>,
}

impl PlackettLuce {
    pub fn new(model:BlocModel) -> Result<Self,ValidationError> {
        let combined = model.blocs().iter().map(|(bloc,_)|Ok((bloc.clone(),model.combined_interval(bloc)?))).collect::<Result<_,ValidationError>>()?;
        Ok(PlackettLuce{model,combined})
    }

    pub fn bloc_interval(&self,bloc:&str) -> Option<&PreferenceInterval> { self.combined.get(bloc) }
}

impl BallotGenerator for PlackettLuce {
    fn model(&self) -> &BlocModel { &self.model }
    fn name(&self) -> &'static str { "Plackett-Luce" }

    fn generate_ranking(&self, bloc: &str, rng: &mut dyn RngCore) -> Ranking {
        match self.combined.get(bloc) {
            Some(interval) => linear_ranking(interval.sample_ordering(rng)),
            None => vec![],
        }
    }
}
