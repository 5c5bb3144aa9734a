// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! Errors produced when constructing or running something with bad arguments.
//! These are all detected eagerly, at construction or at entry to an operation.

use thiserror::Error;
use crate::candidate::Candidate;

/// Normalization that cannot be done.
#[derive(Error,Debug,Clone,PartialEq)]
pub enum ArithmeticError {
    #[error("Can not normalize a preference interval in which every candidate has zero support")]
    DegenerateNormalization,
}

#[derive(Error,Debug,Clone,PartialEq)]
pub enum ValidationError {
    #[error("Candidate {0} is listed more than once")]
    DuplicateCandidate(Candidate),
    #[error("Ballot weight {0} is negative")]
    NegativeWeight(String),
    #[error("Preference interval has negative or non-finite support {1} for candidate {0}")]
    InvalidSupport(Candidate,f64),
    #[error("Preference interval is empty")]
    EmptyInterval,
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
    #[error("Bloc voter proportions sum to {0}, not 1")]
    ProportionsDoNotSumToOne(f64),
    #[error("Negative or non-finite value {1} given for {0}")]
    NegativeParameter(String,f64),
    #[error("Unknown bloc {0}")]
    UnknownBloc(String),
    #[error("Unknown slate {slate} referenced by bloc {bloc}")]
    UnknownSlate{bloc:String,slate:String},
    #[error("Candidate {candidate} in the preference interval of bloc {bloc} for slate {slate} is not on that slate")]
    CandidateNotOnSlate{bloc:String,slate:String,candidate:Candidate},
    #[error("Candidate {0} is on more than one slate")]
    CandidateOnMultipleSlates(Candidate),
    #[error("Bloc {bloc} has cohesion toward slate {slate} but no preference interval for it")]
    MissingInterval{bloc:String,slate:String},
    #[error("Bloc {0} has no positive cohesion toward any slate")]
    NoCohesion(String),
    #[error("Bloc {0} needs a slate of the same name")]
    NoSlateForBloc(String),
    #[error("Crossover rates for bloc {0} sum to {1}, more than 1")]
    CrossoverTooLarge(String,f64),
    #[error("Invalid Dirichlet parameter {0}")]
    NonPositiveAlpha(f64),
    #[error("No position given for candidate {0}")]
    MissingPosition(Candidate),
    #[error("Too many candidates ({0}) for this ballot generator; at most {1} supported")]
    TooManyCandidates(usize,usize),
    #[error("Can not elect {seats} candidates from {candidates} candidates")]
    InvalidSeats{seats:usize,candidates:usize},
    #[error("Profile has zero total weight")]
    ZeroWeightProfile,
    #[error("Election round {0} neither elected nor eliminated anyone")]
    Stalled(usize),
    #[error("Round number {0} out of range")]
    RoundOutOfRange(usize),
}
