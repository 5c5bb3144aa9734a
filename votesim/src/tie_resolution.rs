// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! Resolution of ties between candidates with equal tallies.
//!
//! Candidates are sorted by tally. Ties only matter when a group of equal candidates
//! straddles a boundary, e.g. the last seat, or the one candidate to be excluded.
//! Such a group is shuffled with the election's random source and the required number
//! taken from the front. Each such decision is recorded so it can be reported.

use std::fmt::{Display, Formatter};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use crate::candidate::Candidate;
use crate::weight::Weight;

#[derive(Serialize,Deserialize,Debug,Clone,Copy,Eq,PartialEq)]
pub enum TieResolutionUsage {
    /// choosing who is elected.
    Election,
    /// choosing who is excluded.
    Exclusion,
}

/// A random decision separating tied candidates.
#[derive(Serialize,Deserialize,Debug,Clone,Eq,PartialEq)]
pub struct TieResolutionExplicitDecision {
    /// increasing_favour[0] are the tied candidates who got the worse result. Order within this sub array doesn't matter.
    /// increasing_favour[1] are the tied candidates who got the better result.
    pub increasing_favour : Vec<Vec<Candidate>>,
    pub usage : TieResolutionUsage,
}

impl TieResolutionExplicitDecision {
    /// make a decision from a resolved order (most favoured first) where the first `favoured` were the winners.
    pub fn from_resolution(resolved_order:&[Candidate],favoured:usize,usage:TieResolutionUsage) -> Self {
        TieResolutionExplicitDecision{
            increasing_favour: vec![resolved_order[favoured..].to_vec(),resolved_order[..favoured].to_vec()],
            usage,
        }
    }

    /// Get the total number of candidates mentioned.
    pub fn num_candidates_mentioned(&self) -> usize {
        self.increasing_favour.iter().map(|v|v.len()).sum()
    }
}

impl Display for TieResolutionExplicitDecision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut had_something = false;
        write!(f,"Chose ")?;
        for candidates in &self.increasing_favour {
            if had_something { write!(f," < ")? }
            else { had_something = true; }
            write!(f,"{:?}",candidates)?;
        }
        Ok(())
    }
}

/// Sort candidates by decreasing tally. Candidates with equal tally stay in the order given, unless they
/// straddle `boundary` (that is, some of them would be in the first `boundary` and some not),
/// in which case they are randomly shuffled and the decision returned.
///
/// ```
/// use votesim::candidate::Candidate;
/// use votesim::tie_resolution::{order_by_tally, TieResolutionUsage};
/// use votesim::random_util::rng_from_seed;
/// use votesim::weight::Weight;
/// let tallies : Vec<(Candidate,Weight)> = vec![("A".into(),Weight::from_integer(3)),("B".into(),Weight::from_integer(5)),("C".into(),Weight::from_integer(3))];
/// let (order,decision) = order_by_tally(tallies.clone(),1,TieResolutionUsage::Election,&mut rng_from_seed(Some(1)));
/// assert_eq!(order[0].name(),"B");
/// assert!(decision.is_none());
/// let (_,decision) = order_by_tally(tallies,2,TieResolutionUsage::Election,&mut rng_from_seed(Some(1)));
/// assert_eq!(decision.unwrap().num_candidates_mentioned(),2);
/// ```
pub fn order_by_tally<R:Rng+?Sized>(mut tallies:Vec<(Candidate,Weight)>,boundary:usize,usage:TieResolutionUsage,rng:&mut R) -> (Vec<Candidate>,Option<TieResolutionExplicitDecision>) {
    tallies.sort_by(|(_,a),(_,b)|b.cmp(a)); // stable
    let mut decision = None;
    if boundary>0 && boundary<tallies.len() && tallies[boundary-1].1==tallies[boundary].1 {
        let tally = tallies[boundary].1.clone();
        let start = tallies.iter().position(|(_,t)|*t==tally).unwrap_or(boundary-1);
        let end = tallies.iter().rposition(|(_,t)|*t==tally).map(|e|e+1).unwrap_or(boundary+1);
        tallies[start..end].shuffle(rng);
        let tied : Vec<Candidate> = tallies[start..end].iter().map(|(c,_)|c.clone()).collect();
        let resolution = TieResolutionExplicitDecision::from_resolution(&tied,boundary-start,usage);
        log::debug!("Tie resolution: {}",resolution);
        decision = Some(resolution);
    }
    (tallies.into_iter().map(|(c,_)|c).collect(),decision)
}
