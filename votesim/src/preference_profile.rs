// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! A collection of ballots over a declared set of candidates.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::ballot::{Ballot, DisplayRanking, RankPosition, Ranking, VoterId};
use crate::candidate::Candidate;
use crate::errors::ValidationError;
use crate::weight::Weight;

/// The maximum number of rows shown by Display.
pub const MAX_DISPLAY_ROWS : usize = 15;

/// Ballots in insertion order, plus an optional declared list of candidates.
///
/// The declared list is informational. It is not checked against the candidates
/// actually mentioned on ballots, as a candidate may legitimately get no votes.
/// Every transformation produces a new profile.
#[derive(Clone,Debug,PartialEq,Eq,Default,Serialize,Deserialize)]
#[serde(try_from = "UncheckedPreferenceProfile")]
pub struct PreferenceProfile {
    ballots : Vec<Ballot>,
    #[serde(skip_serializing_if = "Vec::is_empty",default)]
    candidates : Vec<Candidate>,
}

#[derive(Deserialize)]
struct UncheckedPreferenceProfile {
    ballots : Vec<Ballot>,
    #[serde(default)]
    candidates : Vec<Candidate>,
}

impl TryFrom<UncheckedPreferenceProfile> for PreferenceProfile {
    type Error = ValidationError;
    fn try_from(value: UncheckedPreferenceProfile) -> Result<Self, Self::Error> { PreferenceProfile::new(value.ballots,value.candidates) }
}

impl PreferenceProfile {
    /// Make a profile with a declared candidate list, which must not contain duplicates.
    /// ```
    /// use votesim::ballot::Ballot;
    /// use votesim::candidate::candidate_list;
    /// use votesim::preference_profile::PreferenceProfile;
    /// assert!(PreferenceProfile::new(vec![Ballot::linear(["A"])],candidate_list(["A","B","A"])).is_err());
    /// let profile = PreferenceProfile::new(vec![Ballot::linear(["A"])],candidate_list(["A","B"])).unwrap();
    /// assert_eq!(profile.get_candidates().len(),1);
    /// assert_eq!(profile.candidates().len(),2);
    /// ```
    pub fn new(ballots:Vec<Ballot>,candidates:Vec<Candidate>) -> Result<Self,ValidationError> {
        let mut seen = HashSet::new();
        for c in &candidates {
            if !seen.insert(c) { return Err(ValidationError::DuplicateCandidate(c.clone())); }
        }
        Ok(PreferenceProfile{ballots,candidates})
    }

    /// A profile with no declared candidate list.
    pub fn from_ballots(ballots:Vec<Ballot>) -> Self { PreferenceProfile{ballots,candidates:vec![]} }

    /// Different ballots, same declared candidates.
    pub fn with_ballots(&self,ballots:Vec<Ballot>) -> Self { PreferenceProfile{ballots,candidates:self.candidates.clone()} }

    pub fn get_ballots(&self) -> &[Ballot] { &self.ballots }
    pub fn into_ballots(self) -> Vec<Ballot> { self.ballots }
    pub fn len(&self) -> usize { self.ballots.len() }
    pub fn is_empty(&self) -> bool { self.ballots.is_empty() }

    /// The candidate list given at construction, possibly empty.
    pub fn declared_candidates(&self) -> &[Candidate] { &self.candidates }

    /// Candidates mentioned in at least one position on at least one ballot, sorted.
    pub fn get_candidates(&self) -> Vec<Candidate> {
        let set : BTreeSet<&Candidate> = self.ballots.iter().flat_map(|b|b.ranking().iter().flat_map(|p|p.iter())).collect();
        set.into_iter().cloned().collect()
    }

    /// The candidates standing: the declared list if there is one, otherwise those mentioned on ballots.
    pub fn candidates(&self) -> Vec<Candidate> {
        if self.candidates.is_empty() { self.get_candidates() } else { self.candidates.clone() }
    }

    /// Total weight of all ballots. Exact, and not necessarily an integer.
    pub fn num_ballots(&self) -> Weight { self.ballots.iter().map(|b|b.weight()).sum() }

    /// Merge ballots with identical rankings, summing their weights and pooling any voter ids.
    /// Groups are in order of first occurrence.
    /// ```
    /// use votesim::ballot::Ballot;
    /// use votesim::preference_profile::PreferenceProfile;
    /// let profile = PreferenceProfile::from_ballots(vec![Ballot::linear(["A","B"]),Ballot::linear(["B"]),Ballot::linear(["A","B"])]);
    /// let condensed = profile.condense();
    /// assert_eq!(condensed.len(),2);
    /// assert_eq!(condensed.get_ballots()[0],Ballot::linear(["A","B"]).scaled_by_integer(2));
    /// assert_eq!(condensed.num_ballots(),profile.num_ballots());
    /// ```
    pub fn condense(&self) -> Self {
        let mut index : HashMap<&[RankPosition],usize> = HashMap::new();
        let mut groups : Vec<(&[RankPosition],Weight,Option<BTreeSet<VoterId>>)> = vec![];
        for ballot in &self.ballots {
            let (ranking,weight) = (ballot.ranking(),ballot.weight());
            match index.get(&ranking) {
                Some(&i) => {
                    let group = &mut groups[i];
                    group.1+=weight;
                    if let Some(voters) = ballot.voters() { group.2.get_or_insert_with(BTreeSet::new).extend(voters.iter().cloned()); }
                }
                None => {
                    index.insert(ranking,groups.len());
                    groups.push((ranking,weight.clone(),ballot.voters().cloned()));
                }
            }
        }
        let ballots = groups.into_iter().map(|(ranking,weight,voters)|Ballot::new_unchecked(ranking.to_vec(),weight,voters)).collect();
        PreferenceProfile{ ballots, candidates: self.candidates.clone() }
    }

    /// Like [PreferenceProfile::condense] but with the heaviest groups first. Equal weights keep first-occurrence order.
    pub fn condense_sorted_by_weight(&self) -> Self {
        let mut res = self.condense();
        res.ballots.sort_by(|a,b|b.weight().cmp(a.weight()));
        res
    }

    /// The first n ballots, or all of them if there are fewer than n. If `sort_by_weight`, the n heaviest, heaviest first.
    pub fn head(&self,n:usize,sort_by_weight:bool) -> Self {
        let mut ballots = self.ballots.clone();
        if sort_by_weight { ballots.sort_by(|a,b|b.weight().cmp(a.weight())); }
        ballots.truncate(n);
        PreferenceProfile{ ballots, candidates: self.candidates.clone() }
    }

    /// The last n ballots, or all of them if there are fewer than n. If `sort_by_weight`, the n lightest, lightest first.
    pub fn tail(&self,n:usize,sort_by_weight:bool) -> Self {
        let ballots = if sort_by_weight {
            let mut ballots = self.ballots.clone();
            ballots.sort_by(|a,b|a.weight().cmp(b.weight()));
            ballots.truncate(n);
            ballots
        } else {
            self.ballots[self.ballots.len().saturating_sub(n)..].to_vec()
        };
        PreferenceProfile{ ballots, candidates: self.candidates.clone() }
    }

    /// Map from each distinct ranking to its total weight. If `standardize`, weights are fractions of the total weight;
    /// a profile of zero total weight then gives an empty map.
    pub fn to_dict(&self,standardize:bool) -> BTreeMap<Ranking,Weight> {
        let mut res : BTreeMap<Ranking,Weight> = BTreeMap::new();
        for ballot in &self.ballots {
            *res.entry(ballot.ranking().to_vec()).or_default()+=ballot.weight();
        }
        if standardize {
            let total = self.num_ballots();
            if total.is_zero() { return BTreeMap::new(); }
            for w in res.values_mut() { *w = &*w/&total; }
        }
        res
    }

    /// All the ballots of self followed by all the ballots of other. Declared candidates are merged, self's first.
    pub fn combined(&self,other:&PreferenceProfile) -> Self {
        let mut ballots = self.ballots.clone();
        ballots.extend(other.ballots.iter().cloned());
        let mut candidates = self.candidates.clone();
        for c in &other.candidates { if !candidates.contains(c) { candidates.push(c.clone()); } }
        PreferenceProfile{ballots,candidates}
    }

    /// Remove the given candidates from every ballot and from the declared list. Positions left empty are dropped,
    /// as are ballots that no longer mention anyone.
    pub fn with_candidates_removed(&self,removed:&BTreeSet<Candidate>) -> Self {
        let ballots = self.ballots.iter().map(|b|b.with_candidates_removed(removed)).filter(|b|!b.is_empty()).collect();
        let candidates = self.candidates.iter().filter(|c|!removed.contains(*c)).cloned().collect();
        PreferenceProfile{ballots,candidates}
    }

    /// The first preference weight of every candidate (zero for standing candidates with none).
    /// Leading undervotes are skipped; a ballot whose top position is a tie splits its weight exactly
    /// between the tied candidates.
    /// ```
    /// use votesim::ballot::Ballot;
    /// use votesim::weight::Weight;
    /// use votesim::preference_profile::PreferenceProfile;
    /// let profile = PreferenceProfile::from_ballots(vec![Ballot::new(vec![vec![],vec!["A","B"]]),Ballot::linear(["A","C"])]);
    /// let tallies = profile.first_place_tallies();
    /// assert_eq!(tallies["A"],Weight::fraction(3,2));
    /// assert_eq!(tallies["B"],Weight::fraction(1,2));
    /// assert_eq!(tallies["C"],Weight::zero());
    /// ```
    pub fn first_place_tallies(&self) -> BTreeMap<Candidate,Weight> {
        let mut res : BTreeMap<Candidate,Weight> = self.candidates().into_iter().map(|c|(c,Weight::zero())).collect();
        for ballot in &self.ballots {
            if let Some(top) = ballot.first_preferences() {
                let share = ballot.weight().split(top.len());
                for c in top { *res.entry(c.clone()).or_default()+=&share; }
            }
        }
        res
    }
}

impl Display for PreferenceProfile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let shown = &self.ballots[..self.ballots.len().min(MAX_DISPLAY_ROWS)];
        let rows : Vec<(String,String)> = shown.iter().map(|b|(DisplayRanking(b.ranking()).to_string(),b.weight().to_string())).collect();
        let ranking_width = rows.iter().map(|(r,_)|r.chars().count()).max().unwrap_or(0).max("Ranking".len());
        let weight_width = rows.iter().map(|(_,w)|w.len()).max().unwrap_or(0).max("Weight".len());
        writeln!(f,"{:<rw$}  {:>ww$}","Ranking","Weight",rw=ranking_width,ww=weight_width)?;
        for (ranking,weight) in &rows {
            writeln!(f,"{:<rw$}  {:>ww$}",ranking,weight,rw=ranking_width,ww=weight_width)?;
        }
        if self.ballots.len()>MAX_DISPLAY_ROWS {
            writeln!(f,"PreferenceProfile too long, only showing {} out of {} rows.",MAX_DISPLAY_ROWS,self.ballots.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::candidate_list;

    fn sample() -> PreferenceProfile {
        PreferenceProfile::from_ballots(vec![
            Ballot::linear(["A","B"]),
            Ballot::linear(["B","A"]).scaled_by_integer(5),
            Ballot::linear(["C"]).scaled_by_integer(2),
            Ballot::linear(["A","B"]).scaled_by_integer(3),
        ])
    }

    #[test]
    fn test_head_tail() {
        let p = sample();
        assert_eq!(p.head(2,false).get_ballots(),&p.get_ballots()[..2]);
        assert_eq!(p.tail(1,false).get_ballots(),&p.get_ballots()[3..]);
        assert_eq!(p.head(100,false),p);
        assert_eq!(p.tail(100,false),p);
        assert_eq!(p.head(1,true).get_ballots()[0].weight(),&Weight::from_integer(5));
        let lightest = p.tail(2,true);
        assert_eq!(lightest.get_ballots()[0].weight(),&Weight::one());
        assert_eq!(lightest.get_ballots()[1].weight(),&Weight::from_integer(2));
    }

    #[test]
    fn test_condense_sorted() {
        let condensed = sample().condense_sorted_by_weight();
        assert_eq!(condensed.len(),3);
        assert_eq!(condensed.get_ballots()[0],Ballot::linear(["B","A"]).scaled_by_integer(5));
        assert_eq!(condensed.get_ballots()[1],Ballot::linear(["A","B"]).scaled_by_integer(4));
        assert_eq!(condensed.get_ballots()[2],Ballot::linear(["C"]).scaled_by_integer(2));
    }

    #[test]
    fn test_condense_pools_voters() {
        let profile = PreferenceProfile::from_ballots(vec![
            Ballot::linear(["A"]).with_voters(["don"]),
            Ballot::linear(["B"]),
            Ballot::linear(["A"]).with_voters(["carrie"]),
            Ballot::linear(["A"]),
        ]);
        let condensed = profile.condense();
        assert_eq!(condensed.len(),2);
        let a = &condensed.get_ballots()[0];
        assert_eq!(a.weight(),&Weight::from_integer(3));
        assert_eq!(a.voters(),Some(&BTreeSet::from(["carrie".to_string(),"don".to_string()])));
        assert_eq!(condensed.get_ballots()[1].voters(),None);
    }

    #[test]
    fn test_to_dict() {
        let p = sample();
        let d = p.to_dict(false);
        assert_eq!(d.len(),3);
        let standardized = p.to_dict(true);
        assert_eq!(standardized.values().sum::<Weight>(),Weight::one());
        let zero = PreferenceProfile::from_ballots(vec![Ballot::with_weight([["A"]],Weight::zero()).unwrap()]);
        assert!(zero.to_dict(true).is_empty());
        assert_eq!(zero.to_dict(false).len(),1);
    }

    #[test]
    fn test_remove_candidates() {
        let p = PreferenceProfile::new(sample().into_ballots(),candidate_list(["A","B","C"])).unwrap();
        let removed : BTreeSet<Candidate> = [Candidate::from("C")].into_iter().collect();
        let r = p.with_candidates_removed(&removed);
        assert_eq!(r.len(),3);
        assert_eq!(r.declared_candidates(),&candidate_list(["A","B"])[..]);
        assert_eq!(r.num_ballots(),Weight::from_integer(9));
    }

    #[test]
    fn test_display_truncates() {
        let ballots = (0..20).map(|i|Ballot::linear([format!("C{}",i)])).collect();
        let text = PreferenceProfile::from_ballots(ballots).to_string();
        assert_eq!(text.lines().count(),1+MAX_DISPLAY_ROWS+1);
        assert!(text.ends_with("PreferenceProfile too long, only showing 15 out of 20 rows.\n"));
        let short = sample().to_string();
        assert_eq!(short.lines().count(),5);
        assert!(!short.contains("too long"));
    }

    #[test]
    fn test_serde_checks_duplicates() {
        let json = r#"{"ballots":[{"ranking":[["A"]],"weight":"2"}],"candidates":["A","A"]}"#;
        assert!(serde_json::from_str::<PreferenceProfile>(json).is_err());
        let p = PreferenceProfile::new(vec![Ballot::linear(["A"])],candidate_list(["A","B"])).unwrap();
        let back : PreferenceProfile = serde_json::from_str(&serde_json::to_string(&p).unwrap()).unwrap();
        assert_eq!(back,p);
    }
}
