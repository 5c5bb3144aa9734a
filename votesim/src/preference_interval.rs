// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! A preference interval is the relative strength of support for a set of candidates,
//! normalized to sum to 1. It is the sampling distribution used to generate ballots.
//!
//! There is a distinction between a candidate that is *absent* from an interval, which can
//! never be sampled, and a candidate that is *present with zero support*, which is still
//! listed, just after everyone with non-zero support.

use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::candidate::Candidate;
use crate::errors::{ArithmeticError, ValidationError};
use crate::random_util::{choose_weighted_index, dirichlet_weights};

#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
#[serde(try_from = "BTreeMap<Candidate,f64>")]
#[serde(into = "BTreeMap<Candidate,f64>")]
pub struct PreferenceInterval {
    /// normalized support, summing to 1.
    interval : BTreeMap<Candidate,f64>,
}

impl PreferenceInterval {
    /// Make from a list of (candidate,support). Support need not be normalized but must be
    /// finite and non-negative, with at least one candidate having positive support.
    /// ```
    /// use votesim::preference_interval::PreferenceInterval;
    /// let interval = PreferenceInterval::new([("A",3.0),("B",1.0),("C",0.0)]).unwrap();
    /// assert_eq!(interval.probability("A"),0.75);
    /// assert_eq!(interval.zero_candidates().len(),1);
    /// assert_eq!(interval.probability("D"),0.0); // absent, not zero
    /// assert!(!interval.contains("D"));
    /// ```
    pub fn new<I:IntoIterator<Item=(C,f64)>,C:Into<Candidate>>(support:I) -> Result<Self,ValidationError> {
        let mut interval = BTreeMap::new();
        for (candidate,value) in support {
            let candidate : Candidate = candidate.into();
            if !value.is_finite() || value<0.0 { return Err(ValidationError::InvalidSupport(candidate,value)); }
            if interval.insert(candidate.clone(),value).is_some() { return Err(ValidationError::DuplicateCandidate(candidate)); }
        }
        Self::normalized(interval)
    }

    fn normalized(mut interval:BTreeMap<Candidate,f64>) -> Result<Self,ValidationError> {
        if interval.is_empty() { return Err(ValidationError::EmptyInterval); }
        let total : f64 = interval.values().sum();
        if total<=0.0 { return Err(ArithmeticError::DegenerateNormalization.into()); }
        for value in interval.values_mut() { *value/=total; }
        Ok(PreferenceInterval{interval})
    }

    /// All candidates in the interval, including those with zero support.
    pub fn candidates(&self) -> impl Iterator<Item=&Candidate> { self.interval.keys() }
    pub fn len(&self) -> usize { self.interval.len() }
    pub fn contains(&self,candidate:&str) -> bool { self.interval.contains_key(candidate) }
    /// The normalized support for a candidate; 0 if zero support or absent.
    pub fn probability(&self,candidate:&str) -> f64 { self.interval.get(candidate).copied().unwrap_or(0.0) }
    pub fn non_zero_candidates(&self) -> Vec<&Candidate> { self.interval.iter().filter(|(_,p)|**p>0.0).map(|(c,_)|c).collect() }
    pub fn zero_candidates(&self) -> Vec<&Candidate> { self.interval.iter().filter(|(_,p)|**p==0.0).map(|(c,_)|c).collect() }
    pub fn iter(&self) -> impl Iterator<Item=(&Candidate,f64)> { self.interval.iter().map(|(c,p)|(c,*p)) }

    /// Add any of the given candidates that are absent, with zero support.
    /// The result has the same distribution but lists more candidates.
    pub fn zero_pad<'a,I:IntoIterator<Item=&'a Candidate>>(&self,candidates:I) -> Self {
        let mut interval = self.interval.clone();
        for c in candidates { interval.entry(c.clone()).or_insert(0.0); }
        PreferenceInterval{interval}
    }

    /// The conditional distribution given that the choice is one of the given candidates.
    /// Candidates not in this interval are ignored. Zero candidates stay zero.
    pub fn restricted_to<'a,I:IntoIterator<Item=&'a Candidate>>(&self,candidates:I) -> Result<Self,ValidationError> {
        let interval : BTreeMap<Candidate,f64> = candidates.into_iter().filter_map(|c|self.interval.get(c).map(|p|(c.clone(),*p))).collect();
        Self::normalized(interval)
    }

    /// Weighted mixture of intervals over possibly different candidate sets.
    /// Each interval is zero padded to the union of candidates first, so a candidate
    /// present in any part is present in the result.
    /// ```
    /// use votesim::preference_interval::PreferenceInterval;
    /// let w = PreferenceInterval::new([("W1",0.5),("W2",0.5)]).unwrap();
    /// let c = PreferenceInterval::new([("C1",1.0),("C2",0.0)]).unwrap();
    /// let combined = PreferenceInterval::combine(&[(&w,0.8),(&c,0.2)]).unwrap();
    /// assert!((combined.probability("W1")-0.4).abs()<1e-12);
    /// assert!((combined.probability("C1")-0.2).abs()<1e-12);
    /// assert!(combined.contains("C2"));
    /// ```
    pub fn combine(parts:&[(&PreferenceInterval,f64)]) -> Result<Self,ValidationError> {
        let mut interval : BTreeMap<Candidate,f64> = BTreeMap::new();
        for (part,weight) in parts {
            if !weight.is_finite() || *weight<0.0 { return Err(ValidationError::NegativeParameter("interval mixture weight".to_string(),*weight)); }
            for (c,p) in &part.interval {
                *interval.entry(c.clone()).or_insert(0.0)+=p*weight;
            }
        }
        Self::normalized(interval)
    }

    /// A random interval drawn from a symmetric Dirichlet distribution with parameter alpha.
    /// Small alpha gives intervals dominated by one candidate, large alpha nearly uniform ones.
    pub fn from_dirichlet<R:Rng+?Sized>(candidates:&[Candidate],alpha:f64,rng:&mut R) -> Result<Self,ValidationError> {
        if candidates.is_empty() { return Err(ValidationError::EmptyInterval); }
        if alpha.is_nan() || alpha<=0.0 { return Err(ValidationError::NonPositiveAlpha(alpha)); }
        let mut interval : BTreeMap<Candidate,f64> = BTreeMap::new();
        for (c,draw) in candidates.iter().zip(dirichlet_weights(candidates.len(),alpha,rng)?) {
            if interval.insert(c.clone(),draw).is_some() { return Err(ValidationError::DuplicateCandidate(c.clone())); }
        }
        Self::normalized(interval)
    }

    /// Choose one of the `remaining` candidates, with probability proportional to support.
    /// Candidates not in this interval are never chosen. If all remaining candidates in the interval
    /// have zero support, choose uniformly between them. None if no remaining candidate is in the interval.
    pub fn sample_from<'a,R:Rng+?Sized>(&self,remaining:&[&'a Candidate],rng:&mut R) -> Option<&'a Candidate> {
        let eligible : Vec<&'a Candidate> = remaining.iter().copied().filter(|c|self.interval.contains_key(*c)).collect();
        let weights : Vec<f64> = eligible.iter().map(|c|self.interval[*c]).collect();
        choose_weighted_index(&weights,rng).map(|i|eligible[i])
    }

    /// A full Plackett–Luce ordering of every candidate in the interval.
    pub fn sample_ordering<R:Rng+?Sized>(&self,rng:&mut R) -> Vec<Candidate> {
        let mut remaining : Vec<&Candidate> = self.interval.keys().collect();
        let mut res = Vec::with_capacity(remaining.len());
        while let Some(chosen) = self.sample_from(&remaining,rng) {
            remaining.retain(|c|*c!=chosen);
            res.push(chosen.clone());
        }
        res
    }
}

impl TryFrom<BTreeMap<Candidate,f64>> for PreferenceInterval {
    type Error = ValidationError;
    fn try_from(value: BTreeMap<Candidate, f64>) -> Result<Self, Self::Error> { PreferenceInterval::new(value) }
}

impl From<PreferenceInterval> for BTreeMap<Candidate,f64> {
    fn from(value: PreferenceInterval) -> Self { value.interval }
}

impl Display for PreferenceInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{{{}}}",self.interval.iter().map(|(c,p)|format!("{}: {:.3}",c,p)).collect::<Vec<_>>().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::candidate_list;
    use crate::random_util::rng_from_seed;

    #[test]
    fn test_invalid_intervals() {
        assert_eq!(PreferenceInterval::new(Vec::<(&str,f64)>::new()),Err(ValidationError::EmptyInterval));
        assert_eq!(PreferenceInterval::new([("A",0.5),("B",-0.1)]),Err(ValidationError::InvalidSupport("B".into(),-0.1)));
        assert_eq!(PreferenceInterval::new([("A",0.0),("B",0.0)]),Err(ValidationError::Arithmetic(ArithmeticError::DegenerateNormalization)));
        assert_eq!(PreferenceInterval::new([("A",0.5),("A",0.5)]),Err(ValidationError::DuplicateCandidate("A".into())));
    }

    #[test]
    fn test_zero_pad_keeps_distribution() {
        let interval = PreferenceInterval::new([("A",1.0),("B",3.0)]).unwrap();
        let padded = interval.zero_pad(&candidate_list(["A","C"]));
        assert_eq!(padded.len(),3);
        assert_eq!(padded.probability("B"),0.75);
        assert_eq!(padded.zero_candidates(),vec![&Candidate::from("C")]);
    }

    #[test]
    fn test_restriction() {
        let interval = PreferenceInterval::new([("A",0.5),("B",0.25),("C",0.25)]).unwrap();
        let restricted = interval.restricted_to(&candidate_list(["B","C","Z"])).unwrap();
        assert_eq!(restricted.len(),2);
        assert_eq!(restricted.probability("B"),0.5);
        let zeros = PreferenceInterval::new([("A",1.0),("B",0.0)]).unwrap();
        assert!(zeros.restricted_to(&candidate_list(["B"])).is_err());
    }

    #[test]
    fn test_zero_candidates_come_last() {
        let interval = PreferenceInterval::new([("A",0.7),("B",0.3),("C",0.0),("D",0.0)]).unwrap();
        let mut rng = rng_from_seed(Some(5));
        for _ in 0..200 {
            let order = interval.sample_ordering(&mut rng);
            assert_eq!(order.len(),4);
            assert!(order[2..].contains(&"C".into()));
            assert!(order[2..].contains(&"D".into()));
        }
    }

    #[test]
    fn test_dirichlet() {
        let candidates = candidate_list(["A","B","C"]);
        let mut rng = rng_from_seed(Some(9));
        let interval = PreferenceInterval::from_dirichlet(&candidates,1.0,&mut rng).unwrap();
        assert_eq!(interval.len(),3);
        assert!((interval.iter().map(|(_,p)|p).sum::<f64>()-1.0).abs()<1e-9);
        assert!(PreferenceInterval::from_dirichlet(&candidates,0.0,&mut rng).is_err());
        assert!(PreferenceInterval::from_dirichlet(&candidates,-1.0,&mut rng).is_err());
    }

    #[test]
    fn test_serde_round_trip_checks() {
        let interval : PreferenceInterval = serde_json::from_str(r#"{"A":2.0,"B":2.0}"#).unwrap();
        assert_eq!(interval.probability("A"),0.5);
        assert!(serde_json::from_str::<PreferenceInterval>(r#"{}"#).is_err());
    }
}
