// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! Single transferable vote with exact fractional surplus transfers.
//!
//! The quota is the Droop quota of the initial total weight. Each round either:
//! * elects every continuing candidate, if there are no more of them than vacancies, or
//! * elects every candidate at or over quota, and passes on their surplus by multiplying
//!   their share of each ballot on which they are the top preference by the transfer value
//!   (tally-quota)/tally, or
//! * excludes the candidate with the lowest tally.

use std::collections::BTreeMap;
use rand::RngCore;
use crate::ballot::Ballot;
use crate::candidate::Candidate;
use crate::election_rules::{remove_candidates, ElectionRule, RoundContext, RoundResult};
use crate::election_state::ElectionReason;
use crate::errors::ValidationError;
use crate::tie_resolution::{order_by_tally, TieResolutionUsage};
use crate::weight::Weight;

#[derive(Debug,Clone,Copy,Default)]
pub struct STV;

/// The smallest whole number of votes that at most `seats` candidates can reach.
/// ```
/// use votesim::election_rules::stv::droop_quota;
/// use votesim::weight::Weight;
/// assert_eq!(droop_quota(&Weight::from_integer(100),2),Weight::from_integer(34));
/// assert_eq!(droop_quota(&Weight::from_integer(99),2),Weight::from_integer(34));
/// assert_eq!(droop_quota(&Weight::from_integer(5),1),Weight::from_integer(3));
/// ```
pub fn droop_quota(total:&Weight,seats:usize) -> Weight {
    (total/&Weight::from_integer(seats+1)).floor()+Weight::one()
}

/// Scale each elected candidate's share of ballots on which they are (possibly jointly) top by their transfer value.
fn transfer_surplus(ballots:&[Ballot],transfer_values:&BTreeMap<Candidate,Weight>) -> Vec<Ballot> {
    ballots.iter().map(|ballot|{
        match ballot.first_preferences() {
            Some(top) if top.iter().any(|c|transfer_values.contains_key(c)) => {
                let kept : Weight = top.iter().map(|c|transfer_values.get(c).cloned().unwrap_or_else(Weight::one)).sum();
                ballot.scaled(&kept.split(top.len()))
            }
            _ => ballot.clone(),
        }
    }).collect()
}

impl ElectionRule for STV {
    fn name(&self) -> &'static str { "STV" }

    fn run_round(&self, context: &RoundContext, rng: &mut dyn RngCore) -> Result<RoundResult, ValidationError> {
        let quota = droop_quota(context.initial_total,context.seats);
        let tallies = context.first_preference_tallies();
        log::debug!("STV round {} quota {}",context.round,quota);
        let as_list : Vec<(Candidate,Weight)> = tallies.clone().into_iter().collect();
        if context.continuing.len()<=context.seats_remaining {
            let (order,_) = order_by_tally(as_list,0,TieResolutionUsage::Election,rng);
            let profile = remove_candidates(context.profile,order.iter());
            return Ok(RoundResult{ tallies, elected: order.clone(), order, elected_because: Some(ElectionReason::AllRemainingMustBeElected), eliminated: vec![], tie_resolutions: vec![], profile });
        }
        let over_quota = tallies.values().filter(|t|**t>=quota).count();
        if over_quota>0 {
            let num_elected = over_quota.min(context.seats_remaining);
            let (order,tie_resolution) = order_by_tally(as_list,num_elected,TieResolutionUsage::Election,rng);
            let elected = order[..num_elected].to_vec();
            let mut transfer_values = BTreeMap::new();
            for c in &elected {
                let tally = &tallies[c];
                let surplus = tally-&quota;
                let tv = if tally.is_zero() { Weight::zero() } else { &surplus/tally };
                log::debug!("{} elected with {}, transfer value {}",c,tally,tv);
                transfer_values.insert(c.clone(),tv);
            }
            let transferred = context.profile.with_ballots(transfer_surplus(context.profile.get_ballots(),&transfer_values));
            let profile = remove_candidates(&transferred,elected.iter());
            return Ok(RoundResult{ tallies, order, elected, elected_because: Some(ElectionReason::ReachedQuota), eliminated: vec![], tie_resolutions: tie_resolution.into_iter().collect(), profile });
        }
        let (order,tie_resolution) = order_by_tally(as_list,context.continuing.len()-1,TieResolutionUsage::Exclusion,rng);
        let eliminated : Vec<Candidate> = order.last().cloned().into_iter().collect();
        let profile = remove_candidates(context.profile,eliminated.iter());
        Ok(RoundResult{ tallies, order, elected: vec![], elected_because: None, eliminated, tie_resolutions: tie_resolution.into_iter().collect(), profile })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use crate::candidate::candidate_list;
    use crate::preference_profile::PreferenceProfile;

    #[test]
    fn test_split_top_transfer() {
        let ballots = vec![Ballot::new(vec![vec!["A","B"],vec!["C"]]).scaled_by_integer(4),Ballot::linear(["B","A"])];
        let tvs = BTreeMap::from([(Candidate::from("A"),Weight::fraction(1,2))]);
        let after = transfer_surplus(&ballots,&tvs);
        // B keeps their half, A passes on half of their half.
        assert_eq!(after[0].weight(),&Weight::from_integer(3));
        assert_eq!(after[1].weight(),&Weight::one());
        let removed : BTreeSet<Candidate> = candidate_list(["A"]).into_iter().collect();
        let profile = PreferenceProfile::from_ballots(after).with_candidates_removed(&removed);
        assert_eq!(profile.first_place_tallies()["B"],Weight::from_integer(4));
    }
}
