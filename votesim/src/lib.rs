// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! Synthetic ranked-choice elections.
//!
//! Preference intervals and bloc parameters feed stochastic ballot generators, which produce
//! preference profiles, which are counted by round-based election rules.
//!
//! ```
//! use votesim::ballot::Ballot;
//! use votesim::candidate::Candidate;
//! use votesim::preference_profile::PreferenceProfile;
//! use votesim::election::Election;
//! use votesim::election_rules::plurality::Plurality;
//!
//! let profile = PreferenceProfile::from_ballots(vec![
//!     Ballot::linear(["A","B"]).scaled_by_integer(3),
//!     Ballot::linear(["B","A"]).scaled_by_integer(2),
//! ]);
//! let election = Election::new(profile,1,Plurality,Some(1)).unwrap();
//! let outcome = election.run_election().unwrap();
//! assert_eq!(outcome.get_all_winners(),vec![Candidate::from("A")]);
//! ```

pub mod candidate;
pub mod weight;
pub mod errors;
pub mod ballot;
pub mod preference_interval;
pub mod preference_profile;
pub mod cleaning;
pub mod random_util;
pub mod bloc_model;
pub mod ballot_generator;
pub mod tie_resolution;
pub mod election_state;
pub mod election_rules;
pub mod election;
pub mod profile_csv;
