// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! Store the history of an election, round by round, and answer questions about it.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::candidate::Candidate;
use crate::errors::ValidationError;
use crate::preference_profile::PreferenceProfile;
use crate::tie_resolution::TieResolutionExplicitDecision;
use crate::weight::Weight;

#[derive(Copy,Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub enum ElectionReason {
    ReachedQuota,
    /// among the highest tallies when the rule elects on tally alone.
    HighestTally,
    AllRemainingMustBeElected,
}

/// What happened in one round.
#[derive(Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub struct RoundRecord {
    /// 1 is the first round.
    pub round : usize,
    /// the tally (first preferences, points, ...) of each continuing candidate at the start of the round.
    pub tallies : BTreeMap<Candidate,Weight>,
    /// elected this round, highest tally first.
    pub elected : Vec<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none",default)]
    pub elected_because : Option<ElectionReason>,
    /// eliminated this round, highest tally first.
    pub eliminated : Vec<Candidate>,
    /// continuing candidates after this round, highest tally first.
    pub remaining : Vec<Candidate>,
    #[serde(skip_serializing_if = "Vec::is_empty",default)]
    pub tie_resolutions : Vec<TieResolutionExplicitDecision>,
    /// the profile passed on to the next round.
    pub profile : PreferenceProfile,
}

/// Elected, eliminated, or still in the running at the end.
#[derive(Copy,Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub enum CandidateStatus {
    Elected,
    Eliminated,
    Remaining,
}

impl Display for CandidateStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CandidateStatus::Elected => "Elected",
            CandidateStatus::Eliminated => "Eliminated",
            CandidateStatus::Remaining => "Remaining",
        };
        f.pad(s)
    }
}

#[derive(Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub struct StatusRow {
    pub candidate : Candidate,
    pub status : CandidateStatus,
    /// the round the status was decided, or the last round for remaining candidates.
    pub round : usize,
}

/// The complete result of an election.
#[derive(Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub struct ElectionOutcome {
    pub rule : String,
    pub seats : usize,
    /// the candidates standing at the start.
    pub candidates : Vec<Candidate>,
    pub rounds : Vec<RoundRecord>,
}

impl ElectionOutcome {
    pub fn num_rounds(&self) -> usize { self.rounds.len() }

    fn rounds_up_to(&self,round:usize) -> &[RoundRecord] { &self.rounds[..round.min(self.rounds.len())] }

    fn winners_up_to(&self,round:usize) -> Vec<Candidate> {
        self.rounds_up_to(round).iter().flat_map(|r|r.elected.iter().cloned()).collect()
    }

    /// Most recently eliminated first; within a round, the lowest tally first.
    fn eliminated_up_to(&self,round:usize) -> Vec<Candidate> {
        self.rounds_up_to(round).iter().rev().flat_map(|r|r.eliminated.iter().rev().cloned()).collect()
    }

    fn remaining_after(&self,round:usize) -> Vec<Candidate> {
        if round==0 || self.rounds.is_empty() { self.candidates.clone() } else { self.rounds_up_to(round).last().map(|r|r.remaining.clone()).unwrap_or_default() }
    }

    /// Elected candidates, in order of election.
    pub fn get_all_winners(&self) -> Vec<Candidate> { self.winners_up_to(self.rounds.len()) }

    /// Eliminated candidates, most recently eliminated first.
    pub fn get_all_eliminated(&self) -> Vec<Candidate> { self.eliminated_up_to(self.rounds.len()) }

    /// Candidates still in the running at the end.
    pub fn remaining(&self) -> Vec<Candidate> { self.remaining_after(self.rounds.len()) }

    /// Every candidate, best first: winners, then those remaining, then those eliminated.
    pub fn get_rankings(&self) -> Vec<Candidate> { self.rankings_after(self.rounds.len()) }

    fn rankings_after(&self,round:usize) -> Vec<Candidate> {
        let mut res = self.winners_up_to(round);
        res.extend(self.remaining_after(round));
        res.extend(self.eliminated_up_to(round));
        res
    }

    /// The record of a given round, 1 being the first.
    pub fn get_round_outcome(&self,round:usize) -> Result<&RoundRecord,ValidationError> {
        if round==0 || round>self.rounds.len() { Err(ValidationError::RoundOutOfRange(round)) } else { Ok(&self.rounds[round-1]) }
    }

    /// Candidates whose position in the rankings differs between the end of round-1 and the end of round,
    /// with their (previous,new) 0 based positions. There is nothing to compare the first round to.
    pub fn changed_rankings(&self,round:usize) -> Result<BTreeMap<Candidate,(usize,usize)>,ValidationError> {
        if round<2 || round>self.rounds.len() { return Err(ValidationError::RoundOutOfRange(round)); }
        let previous : BTreeMap<Candidate,usize> = self.rankings_after(round-1).into_iter().enumerate().map(|(i,c)|(c,i)).collect();
        let mut res = BTreeMap::new();
        for (i,c) in self.rankings_after(round).into_iter().enumerate() {
            if let Some(&was) = previous.get(&c) {
                if was!=i { res.insert(c,(was,i)); }
            }
        }
        Ok(res)
    }

    /// The status of every candidate, in ranking order.
    pub fn status(&self) -> Vec<StatusRow> {
        let last = self.rounds.len();
        self.get_rankings().into_iter().map(|candidate|{
            let decided = self.rounds.iter().find_map(|r|{
                if r.elected.contains(&candidate) { Some((CandidateStatus::Elected,r.round)) }
                else if r.eliminated.contains(&candidate) { Some((CandidateStatus::Eliminated,r.round)) }
                else { None }
            });
            let (status,round) = decided.unwrap_or((CandidateStatus::Remaining,last));
            StatusRow{candidate,status,round}
        }).collect()
    }
}

/// A fixed width table of [ElectionOutcome::status].
impl Display for ElectionOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rows = self.status();
        let width = rows.iter().map(|r|r.candidate.name().chars().count()).max().unwrap_or(0).max("Candidate".len());
        writeln!(f,"{:<width$}  {:<10}  {:>5}","Candidate","Status","Round",width=width)?;
        for row in rows {
            writeln!(f,"{:<width$}  {:<10}  {:>5}",row.candidate.name(),row.status,row.round,width=width)?;
        }
        Ok(())
    }
}
