// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! A ballot: a ranked, possibly tied, possibly partial preference list with a weight.

use std::collections::BTreeSet;
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::candidate::Candidate;
use crate::errors::ValidationError;
use crate::weight::Weight;

/// The candidates given a particular rank. Empty is an undervote, more than one is a tie (overvote).
pub type RankPosition = BTreeSet<Candidate>;
/// Rank positions, most preferred first.
pub type Ranking = Vec<RankPosition>;
/// Identifies a voter in a cast vote record.
pub type VoterId = String;

/// A ranking and the number of voters (possibly fractional) who voted that way.
/// Ballots loaded from a cast vote record may also carry the ids of the voters who cast them.
///
/// A candidate appearing in more than one position is not rejected here; see [crate::cleaning].
#[derive(Clone,Debug,PartialEq,Eq,Hash,Serialize,Deserialize)]
#[serde(try_from = "UncheckedBallot")]
pub struct Ballot {
    ranking : Ranking,
    weight : Weight,
    #[serde(skip_serializing_if = "Option::is_none",default)]
    voters : Option<BTreeSet<VoterId>>,
}

#[derive(Deserialize)]
/// Only used so deserialization goes through the same checks as construction.
struct UncheckedBallot {
    ranking : Ranking,
    weight : Weight,
    #[serde(default)]
    voters : Option<BTreeSet<VoterId>>,
}

impl TryFrom<UncheckedBallot> for Ballot {
    type Error = ValidationError;
    fn try_from(value: UncheckedBallot) -> Result<Self, Self::Error> {
        let mut ballot = Ballot::from_ranking(value.ranking,value.weight)?;
        ballot.voters = value.voters;
        Ok(ballot)
    }
}

impl Ballot {
    /// A ballot of weight 1. Each element of `ranking` is the set of candidates in that position;
    /// repeated candidates within a position are merged.
    /// ```
    /// use votesim::ballot::Ballot;
    /// let b = Ballot::new(vec![vec!["A","A","B"],vec![],vec!["C"]]);
    /// assert_eq!(b.ranking()[0].len(),2);
    /// assert!(b.ranking()[1].is_empty());
    /// assert_eq!(b.to_string(),"{A,B} > {} > C");
    /// ```
    pub fn new<R,P,C>(ranking:R) -> Self
        where R:IntoIterator<Item=P>, P:IntoIterator<Item=C>, C:Into<Candidate> {
        Ballot{ ranking : Self::collect_ranking(ranking), weight: Weight::one(), voters: None }
    }

    /// Like [Ballot::new] but with a given weight, which must not be negative.
    pub fn with_weight<R,P,C>(ranking:R,weight:Weight) -> Result<Self,ValidationError>
        where R:IntoIterator<Item=P>, P:IntoIterator<Item=C>, C:Into<Candidate> {
        Self::from_ranking(Self::collect_ranking(ranking),weight)
    }

    /// A ballot of weight 1 listing one candidate per position.
    pub fn linear<I:IntoIterator<Item=C>,C:Into<Candidate>>(order:I) -> Self {
        Ballot{ ranking: order.into_iter().map(|c|RankPosition::from([c.into()])).collect(), weight: Weight::one(), voters: None }
    }

    pub fn from_ranking(ranking:Ranking,weight:Weight) -> Result<Self,ValidationError> {
        if weight.is_negative() { Err(ValidationError::NegativeWeight(weight.to_string())) }
        else { Ok(Ballot{ranking,weight,voters:None}) }
    }

    /// For weights known to be non-negative, e.g. sums of existing ballot weights.
    pub(crate) fn new_unchecked(ranking:Ranking,weight:Weight,voters:Option<BTreeSet<VoterId>>) -> Self {
        debug_assert!(!weight.is_negative());
        Ballot{ranking,weight,voters}
    }

    /// Record which voters cast this ballot.
    /// ```
    /// use votesim::ballot::Ballot;
    /// let b = Ballot::linear(["A"]).with_voters(["v1","v2"]);
    /// assert_eq!(b.voters().map(|v|v.len()),Some(2));
    /// ```
    pub fn with_voters<I:IntoIterator<Item=S>,S:Into<VoterId>>(self,voters:I) -> Self {
        Ballot{ voters: Some(voters.into_iter().map(|v|v.into()).collect()), ..self }
    }

    fn collect_ranking<R,P,C>(ranking:R) -> Ranking
        where R:IntoIterator<Item=P>, P:IntoIterator<Item=C>, C:Into<Candidate> {
        ranking.into_iter().map(|position|position.into_iter().map(|c|c.into()).collect::<RankPosition>()).collect()
    }

    pub fn ranking(&self) -> &[RankPosition] { &self.ranking }
    pub fn weight(&self) -> &Weight { &self.weight }
    /// The ids of the voters who cast this ballot, if known.
    pub fn voters(&self) -> Option<&BTreeSet<VoterId>> { self.voters.as_ref() }

    /// Consume, getting the ranking and weight.
    pub fn into_parts(self) -> (Ranking,Weight) { (self.ranking,self.weight) }

    /// All candidates mentioned anywhere on the ballot.
    pub fn candidates(&self) -> BTreeSet<&Candidate> {
        self.ranking.iter().flat_map(|p|p.iter()).collect()
    }

    /// The top non-empty position, if any. Leading undervotes are skipped.
    pub fn first_preferences(&self) -> Option<&RankPosition> {
        self.ranking.iter().find(|p|!p.is_empty())
    }

    /// The index of the first position containing the candidate.
    pub fn position_of(&self,candidate:&str) -> Option<usize> {
        self.ranking.iter().position(|p|p.contains(candidate))
    }

    /// true if no candidate is mentioned.
    pub fn is_empty(&self) -> bool { self.ranking.iter().all(|p|p.is_empty()) }

    /// Same ranking, different weight. The weight must not be negative.
    pub fn reweighted(&self,weight:Weight) -> Result<Ballot,ValidationError> {
        let mut res = Ballot::from_ranking(self.ranking.clone(),weight)?;
        res.voters = self.voters.clone();
        Ok(res)
    }

    /// Multiply the weight by a non-negative factor.
    pub fn scaled(&self,factor:&Weight) -> Ballot {
        debug_assert!(!factor.is_negative());
        Ballot{ ranking: self.ranking.clone(), weight: &self.weight*factor, voters: self.voters.clone() }
    }

    /// Multiply the weight by an integer, e.g. to represent n identical voters.
    pub fn scaled_by_integer(self,n:usize) -> Ballot {
        Ballot{ ranking: self.ranking, weight: self.weight*Weight::from_integer(n), voters: self.voters }
    }

    /// Remove the given candidates from every position, and drop positions that are left empty.
    /// Positions that were already empty (undervotes) are dropped too, as they no longer separate anything.
    pub fn with_candidates_removed(&self,removed:&BTreeSet<Candidate>) -> Ballot {
        let ranking = self.ranking.iter().map(|p|p.iter().filter(|c|!removed.contains(*c)).cloned().collect::<RankPosition>()).filter(|p|!p.is_empty()).collect();
        Ballot{ ranking, weight: self.weight.clone(), voters: self.voters.clone() }
    }
}

impl Display for Ballot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}",DisplayRanking(&self.ranking))
    }
}

/// Human readable form of a ranking, e.g. `A > {B,C} > {}`.
pub struct DisplayRanking<'a>(pub &'a [RankPosition]);

impl <'a> Display for DisplayRanking<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i,position) in self.0.iter().enumerate() {
            if i>0 { write!(f," > ")?; }
            if position.len()==1 {
                write!(f,"{}",position.iter().next().map(|c|c.name()).unwrap_or(""))?;
            } else {
                write!(f,"{{{}}}",position.iter().map(|c|c.name()).collect::<Vec<_>>().join(","))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_weight_rejected() {
        assert_eq!(Ballot::with_weight([["A"]],Weight::fraction(-1,2)),Err(ValidationError::NegativeWeight("-1/2".to_string())));
        assert!(Ballot::with_weight([["A"]],Weight::zero()).is_ok());
    }

    #[test]
    fn test_equality_is_structural() {
        assert_eq!(Ballot::linear(["A","B"]),Ballot::new([["A"],["B"]]));
        assert_ne!(Ballot::linear(["A","B"]),Ballot::linear(["B","A"]));
        assert_ne!(Ballot::linear(["A","B"]),Ballot::linear(["A","B"]).scaled_by_integer(2));
        // order within a position doesn't matter
        assert_eq!(Ballot::new([vec!["A","B"]]),Ballot::new([vec!["B","A"]]));
    }

    #[test]
    fn test_first_preferences_skip_undervotes() {
        let b = Ballot::new(vec![vec![],vec!["B","C"],vec!["A"]]);
        assert_eq!(b.first_preferences().map(|p|p.len()),Some(2));
        assert_eq!(b.position_of("A"),Some(2));
        assert!(Ballot::new(vec![Vec::<&str>::new()]).is_empty());
        assert_eq!(Ballot::new(vec![Vec::<&str>::new()]).first_preferences(),None);
    }

    #[test]
    fn test_remove_candidates() {
        let b = Ballot::new(vec![vec!["A"],vec![],vec!["B","C"]]).scaled_by_integer(3);
        let removed : BTreeSet<Candidate> = [Candidate::from("A"),Candidate::from("C")].into_iter().collect();
        let r = b.with_candidates_removed(&removed);
        assert_eq!(r,Ballot::linear(["B"]).scaled_by_integer(3));
    }

    #[test]
    fn test_deserialization_checks_weight() {
        let good : Ballot = serde_json::from_str(r#"{"ranking":[["A"],["B","C"]],"weight":"1/2"}"#).unwrap();
        assert_eq!(good.weight(),&Weight::fraction(1,2));
        assert!(serde_json::from_str::<Ballot>(r#"{"ranking":[["A"]],"weight":"-1"}"#).is_err());
    }
}
