// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.


use std::str::FromStr;
use std::fmt::{Display, Formatter};
use serde::{Serialize,Deserialize};
use votesim::election::Election;
use votesim::election_rules::borda::Borda;
use votesim::election_rules::plurality::Plurality;
use votesim::election_rules::stv::STV;
use votesim::election_rules::ElectionRule;
use votesim::election_state::ElectionOutcome;
use votesim::preference_profile::PreferenceProfile;

#[derive(Copy,Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub enum Rules {
    Plurality,
    STV,
    Borda,
}

impl FromStr for Rules {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plurality" | "fptp" => Ok(Rules::Plurality),
            "stv" => Ok(Rules::STV),
            "borda" => Ok(Rules::Borda),
            _ => Err("No such rule supported")
        }
    }
}

impl Display for Rules {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Rules::Plurality => "plurality",
            Rules::STV => "stv",
            Rules::Borda => "borda",
        };
        f.write_str(s)
    }
}

impl Rules {
    pub fn rule(&self) -> Box<dyn ElectionRule> {
        match self {
            Rules::Plurality => Box::new(Plurality),
            Rules::STV => Box::new(STV),
            Rules::Borda => Box::new(Borda),
        }
    }

    /// Run an election on the profile, returning the outcome.
    pub fn count(&self,profile:PreferenceProfile,seats:usize,seed:Option<u64>) -> anyhow::Result<ElectionOutcome> {
        let election = Election::new(profile,seats,self.rule(),seed)?;
        Ok(election.run_election()?.clone())
    }
}

#[derive(Serialize, Deserialize,Clone,Debug)]
pub struct RulesDetails{
    pub name : String,
    pub description : String,
}

impl RulesDetails {
    pub fn list() -> Vec<RulesDetails> {
        vec![
            RulesDetails{ name: Rules::Plurality.to_string(), description: "The candidates with the most first preferences are elected, all in one round.".to_string() },
            RulesDetails{ name: Rules::STV.to_string(), description: "Single transferable vote with a Droop quota and exact fractional transfer of surpluses. Candidates with the lowest tally are excluded one at a time.".to_string() },
            RulesDetails{ name: Rules::Borda.to_string(), description: "Each position on a ballot is worth one point less than the one above it, starting at the number of candidates. The highest scores are elected.".to_string() },
        ]
    }
}
