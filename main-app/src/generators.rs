// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! Choosing a ballot generator by name.

use std::str::FromStr;
use std::fmt::{Display, Formatter};
use serde::{Serialize,Deserialize};
use votesim::ballot_generator::alternating_crossover::AlternatingCrossover;
use votesim::ballot_generator::ballot_simplex::BallotSimplex;
use votesim::ballot_generator::bradley_terry::BradleyTerry;
use votesim::ballot_generator::impartial_culture::ImpartialCulture;
use votesim::ballot_generator::one_dim_spatial::OneDimSpatial;
use votesim::ballot_generator::plackett_luce::PlackettLuce;
use votesim::ballot_generator::slate_plackett_luce::SlatePlackettLuce;
use votesim::ballot_generator::truncated::Truncated;
use votesim::ballot_generator::BallotGenerator;
use votesim::bloc_model::BlocModel;
use votesim::errors::ValidationError;

#[derive(Copy,Clone,Debug,PartialEq,Eq,Serialize,Deserialize,Default)]
pub enum Generators {
    #[default]
    SlatePlackettLuce,
    PlackettLuce,
    BradleyTerry,
    AlternatingCrossover,
    ImpartialCulture,
    ImpartialAnonymousCulture,
    OneDimSpatial,
    BallotSimplex,
}

/// Settings used by only some generators.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct GeneratorOptions {
    /// Dirichlet parameter for the ballot simplex.
    pub alpha : f64,
    /// If present, cut every ballot down to this many positions.
    pub ballot_length : Option<usize>,
}

impl Default for GeneratorOptions {
    fn default() -> Self { GeneratorOptions{ alpha: 1.0, ballot_length: None } }
}

impl FromStr for Generators {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slate-pl" => Ok(Generators::SlatePlackettLuce),
            "pl" => Ok(Generators::PlackettLuce),
            "bt" => Ok(Generators::BradleyTerry),
            "ac" => Ok(Generators::AlternatingCrossover),
            "ic" => Ok(Generators::ImpartialCulture),
            "iac" => Ok(Generators::ImpartialAnonymousCulture),
            "1d" => Ok(Generators::OneDimSpatial),
            "simplex" => Ok(Generators::BallotSimplex),
            _ => Err("No such generator supported. Use slate-pl, pl, bt, ac, ic, iac, 1d or simplex")
        }
    }
}

impl Display for Generators {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Generators::SlatePlackettLuce => "slate-pl",
            Generators::PlackettLuce => "pl",
            Generators::BradleyTerry => "bt",
            Generators::AlternatingCrossover => "ac",
            Generators::ImpartialCulture => "ic",
            Generators::ImpartialAnonymousCulture => "iac",
            Generators::OneDimSpatial => "1d",
            Generators::BallotSimplex => "simplex",
        };
        f.write_str(s)
    }
}

impl Generators {
    pub fn build(&self,model:BlocModel,options:&GeneratorOptions) -> Result<Box<dyn BallotGenerator>,ValidationError> {
        let generator : Box<dyn BallotGenerator> = match self {
            Generators::SlatePlackettLuce => Box::new(SlatePlackettLuce::new(model)),
            Generators::PlackettLuce => Box::new(PlackettLuce::new(model)?),
            Generators::BradleyTerry => Box::new(BradleyTerry::new(model)?),
            Generators::AlternatingCrossover => Box::new(AlternatingCrossover::new(model)?),
            Generators::ImpartialCulture => Box::new(ImpartialCulture::new(model)),
            Generators::OneDimSpatial => Box::new(OneDimSpatial::new(model)),
            // the simplex enumerates rankings of the requested length itself.
            Generators::ImpartialAnonymousCulture => return Ok(Box::new(BallotSimplex::impartial_anonymous_culture(model,options.ballot_length)?)),
            Generators::BallotSimplex => return Ok(Box::new(BallotSimplex::from_alpha(model,options.alpha,options.ballot_length)?)),
        };
        Ok(match options.ballot_length {
            Some(ballot_length) => Box::new(Truncated::new(generator,ballot_length)),
            None => generator,
        })
    }
}
