// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! The parameters describing a population of voters: blocs of voters, slates of candidates,
//! how each bloc feels about the candidates on each slate, and how cohesively each bloc votes.
//!
//! The on-disk form is [BlocModelConfig], a set of nested maps. It is validated once,
//! by conversion into a [BlocModel], which is keyed by (bloc,slate).

use std::collections::{BTreeMap, HashMap};
use std::convert::TryFrom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::candidate::{BlocName, Candidate, SlateName};
use crate::errors::ValidationError;
use crate::preference_interval::PreferenceInterval;
use crate::random_util::choose_weighted_index;

/// How far from 1 the bloc proportions may sum before being rejected.
pub const PROPORTION_TOLERANCE : f64 = 1e-6;

/// The serialized form of a bloc model, typically read from a JSON file.
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct BlocModelConfig {
    /// bloc → fraction of voters in that bloc.
    pub bloc_voter_prop : BTreeMap<BlocName,f64>,
    /// slate → the candidates on that slate.
    pub slate_to_candidates : BTreeMap<SlateName,Vec<Candidate>>,
    /// bloc → slate → that bloc's preference interval over the slate's candidates.
    pub pref_intervals : BTreeMap<BlocName,BTreeMap<SlateName,PreferenceInterval>>,
    /// bloc → slate → relative propensity to fill the next position from that slate.
    pub cohesion : BTreeMap<BlocName,BTreeMap<SlateName,f64>>,
    /// bloc → other slate → probability of a voter crossing over to that slate. Only used by some generators.
    #[serde(skip_serializing_if = "BTreeMap::is_empty",default)]
    pub crossover : BTreeMap<BlocName,BTreeMap<SlateName,f64>>,
}

/// A validated set of bloc parameters.
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(try_from = "BlocModelConfig")]
#[serde(into = "BlocModelConfig")]
pub struct BlocModel {
    blocs : Vec<(BlocName,f64)>,
    slates : Vec<(SlateName,Vec<Candidate>)>,
    intervals : BTreeMap<(BlocName,SlateName),PreferenceInterval>,
    /// normalized to sum to 1 for each bloc.
    cohesion : BTreeMap<(BlocName,SlateName),f64>,
    crossover : BTreeMap<(BlocName,SlateName),f64>,
}

fn check_non_negative(what:impl FnOnce()->String,value:f64) -> Result<(),ValidationError> {
    if value.is_finite() && value>=0.0 { Ok(()) } else { Err(ValidationError::NegativeParameter(what(),value)) }
}

impl TryFrom<BlocModelConfig> for BlocModel {
    type Error = ValidationError;

    fn try_from(config: BlocModelConfig) -> Result<Self, Self::Error> {
        // blocs
        let mut total = 0.0;
        for (bloc,prop) in &config.bloc_voter_prop {
            check_non_negative(||format!("proportion of bloc {}",bloc),*prop)?;
            total+=prop;
        }
        if (total-1.0).abs()>PROPORTION_TOLERANCE { return Err(ValidationError::ProportionsDoNotSumToOne(total)); }
        let blocs : Vec<(BlocName,f64)> = config.bloc_voter_prop.into_iter().collect();
        let is_bloc = |bloc:&BlocName| blocs.iter().any(|(b,_)|b==bloc);
        // slates
        let mut slate_of : HashMap<&Candidate,&SlateName> = HashMap::new();
        for (slate,candidates) in &config.slate_to_candidates {
            for c in candidates {
                if let Some(previous) = slate_of.insert(c,slate) {
                    return Err(if previous==slate { ValidationError::DuplicateCandidate(c.clone()) } else { ValidationError::CandidateOnMultipleSlates(c.clone()) });
                }
            }
        }
        // intervals
        let mut intervals = BTreeMap::new();
        for (bloc,by_slate) in config.pref_intervals {
            if !is_bloc(&bloc) { return Err(ValidationError::UnknownBloc(bloc)); }
            for (slate,interval) in by_slate {
                if !config.slate_to_candidates.contains_key(&slate) { return Err(ValidationError::UnknownSlate{bloc,slate}); }
                if let Some(c) = interval.candidates().find(|c|slate_of.get(c).map(|s|*s!=&slate).unwrap_or(true)) {
                    return Err(ValidationError::CandidateNotOnSlate{bloc,slate,candidate:c.clone()});
                }
                intervals.insert((bloc.clone(),slate),interval);
            }
        }
        // cohesion
        let mut cohesion = BTreeMap::new();
        for (bloc,by_slate) in &config.cohesion {
            if !is_bloc(bloc) { return Err(ValidationError::UnknownBloc(bloc.clone())); }
            let mut bloc_total = 0.0;
            for (slate,value) in by_slate {
                if !config.slate_to_candidates.contains_key(slate) { return Err(ValidationError::UnknownSlate{bloc:bloc.clone(),slate:slate.clone()}); }
                check_non_negative(||format!("cohesion of bloc {} toward slate {}",bloc,slate),*value)?;
                if *value>0.0 && !intervals.contains_key(&(bloc.clone(),slate.clone())) {
                    return Err(ValidationError::MissingInterval{bloc:bloc.clone(),slate:slate.clone()});
                }
                bloc_total+=value;
            }
            if bloc_total<=0.0 { return Err(ValidationError::NoCohesion(bloc.clone())); }
            for (slate,value) in by_slate { cohesion.insert((bloc.clone(),slate.clone()),value/bloc_total); }
        }
        if let Some((bloc,_)) = blocs.iter().find(|(b,_)|!config.cohesion.contains_key(b)) { return Err(ValidationError::NoCohesion(bloc.clone())); }
        // crossover
        let mut crossover = BTreeMap::new();
        for (bloc,by_slate) in config.crossover {
            if !is_bloc(&bloc) { return Err(ValidationError::UnknownBloc(bloc)); }
            let mut bloc_total = 0.0;
            for (slate,rate) in by_slate {
                if !config.slate_to_candidates.contains_key(&slate) { return Err(ValidationError::UnknownSlate{bloc,slate}); }
                check_non_negative(||format!("crossover of bloc {} toward slate {}",bloc,slate),rate)?;
                bloc_total+=rate;
                crossover.insert((bloc.clone(),slate),rate);
            }
            if bloc_total>1.0+PROPORTION_TOLERANCE { return Err(ValidationError::CrossoverTooLarge(bloc,bloc_total)); }
        }
        Ok(BlocModel{ blocs, slates: config.slate_to_candidates.into_iter().collect(), intervals, cohesion, crossover })
    }
}

impl From<BlocModel> for BlocModelConfig {
    fn from(model: BlocModel) -> Self {
        let mut pref_intervals : BTreeMap<BlocName,BTreeMap<SlateName,PreferenceInterval>> = BTreeMap::new();
        for ((bloc,slate),interval) in model.intervals { pref_intervals.entry(bloc).or_default().insert(slate,interval); }
        let mut cohesion : BTreeMap<BlocName,BTreeMap<SlateName,f64>> = BTreeMap::new();
        for ((bloc,slate),value) in model.cohesion { cohesion.entry(bloc).or_default().insert(slate,value); }
        let mut crossover : BTreeMap<BlocName,BTreeMap<SlateName,f64>> = BTreeMap::new();
        for ((bloc,slate),value) in model.crossover { crossover.entry(bloc).or_default().insert(slate,value); }
        BlocModelConfig{
            bloc_voter_prop: model.blocs.into_iter().collect(),
            slate_to_candidates: model.slates.into_iter().collect(),
            pref_intervals,
            cohesion,
            crossover,
        }
    }
}

impl BlocModel {
    /// Build a model in which every bloc has a slate of the same name. Each bloc gives cohesion `cohesion[bloc]`
    /// to its own slate and splits the rest evenly between the other slates. The preference interval of each bloc
    /// for each slate is drawn from a symmetric Dirichlet distribution with parameter `alphas[bloc][slate]`.
    pub fn from_params<R:Rng+?Sized>(bloc_voter_prop:BTreeMap<BlocName,f64>,slate_to_candidates:BTreeMap<SlateName,Vec<Candidate>>,cohesion:&BTreeMap<BlocName,f64>,alphas:&BTreeMap<BlocName,BTreeMap<SlateName,f64>>,rng:&mut R) -> Result<Self,ValidationError> {
        let num_slates = slate_to_candidates.len();
        let mut cohesion_config = BTreeMap::new();
        let mut pref_intervals = BTreeMap::new();
        if let Some(bloc) = bloc_voter_prop.keys().find(|b|!slate_to_candidates.contains_key(*b)) { return Err(ValidationError::NoSlateForBloc(bloc.clone())); }
        for bloc in bloc_voter_prop.keys() {
            let own = *cohesion.get(bloc).ok_or_else(||ValidationError::NoCohesion(bloc.clone()))?;
            if !(0.0..=1.0).contains(&own) { return Err(ValidationError::NegativeParameter(format!("cohesion of bloc {}",bloc),own)); }
            let others = if num_slates>1 { (1.0-own)/(num_slates-1) as f64 } else { 0.0 };
            let mut bloc_cohesion = BTreeMap::new();
            let mut bloc_intervals = BTreeMap::new();
            for (slate,candidates) in &slate_to_candidates {
                let alpha = *alphas.get(bloc).and_then(|a|a.get(slate)).ok_or_else(||ValidationError::MissingInterval{bloc:bloc.clone(),slate:slate.clone()})?;
                bloc_intervals.insert(slate.clone(),PreferenceInterval::from_dirichlet(candidates,alpha,rng)?);
                bloc_cohesion.insert(slate.clone(),if slate==bloc { own } else { others });
            }
            cohesion_config.insert(bloc.clone(),bloc_cohesion);
            pref_intervals.insert(bloc.clone(),bloc_intervals);
        }
        BlocModel::try_from(BlocModelConfig{ bloc_voter_prop, slate_to_candidates, pref_intervals, cohesion: cohesion_config, crossover: BTreeMap::new() })
    }

    /// Parse and validate from JSON.
    pub fn from_json(json:&str) -> anyhow::Result<Self> {
        let config : BlocModelConfig = serde_json::from_str(json)?;
        Ok(BlocModel::try_from(config)?)
    }

    /// (bloc name, proportion of voters) for each bloc, in name order.
    pub fn blocs(&self) -> &[(BlocName,f64)] { &self.blocs }
    /// (slate name, candidates) for each slate, in name order.
    pub fn slates(&self) -> &[(SlateName,Vec<Candidate>)] { &self.slates }
    pub fn slate_candidates(&self,slate:&str) -> Option<&[Candidate]> { self.slates.iter().find(|(s,_)|s==slate).map(|(_,c)|&c[..]) }

    /// Every candidate on any slate, slate by slate.
    pub fn all_candidates(&self) -> Vec<Candidate> { self.slates.iter().flat_map(|(_,c)|c.iter().cloned()).collect() }

    pub fn interval(&self,bloc:&str,slate:&str) -> Option<&PreferenceInterval> { self.intervals.get(&(bloc.to_string(),slate.to_string())) }
    /// Normalized cohesion of a bloc toward a slate; 0 if not given.
    pub fn cohesion(&self,bloc:&str,slate:&str) -> f64 { self.cohesion.get(&(bloc.to_string(),slate.to_string())).copied().unwrap_or(0.0) }
    /// Probability of a voter in the bloc crossing over to the slate; 0 if not given.
    pub fn crossover(&self,bloc:&str,slate:&str) -> f64 { self.crossover.get(&(bloc.to_string(),slate.to_string())).copied().unwrap_or(0.0) }

    /// The bloc's (slate, cohesion, interval) for each slate it has an interval for, in slate order.
    pub fn bloc_slates(&self,bloc:&str) -> Vec<(&SlateName,f64,&PreferenceInterval)> {
        self.slates.iter().filter_map(|(slate,_)|self.interval(bloc,slate).map(|interval|(slate,self.cohesion(bloc,slate),interval))).collect()
    }

    /// A single interval over all the candidates the bloc has an opinion on: each slate interval weighted by the bloc's cohesion to that slate.
    pub fn combined_interval(&self,bloc:&str) -> Result<PreferenceInterval,ValidationError> {
        let parts : Vec<(&PreferenceInterval,f64)> = self.bloc_slates(bloc).into_iter().map(|(_,cohesion,interval)|(interval,cohesion)).collect();
        if parts.is_empty() { return Err(ValidationError::UnknownBloc(bloc.to_string())); }
        PreferenceInterval::combine(&parts)
    }

    /// Choose a bloc with probability equal to its proportion of voters.
    pub fn sample_bloc<R:Rng+?Sized>(&self,rng:&mut R) -> Option<&BlocName> {
        let weights : Vec<f64> = self.blocs.iter().map(|(_,p)|*p).collect();
        choose_weighted_index(&weights,rng).map(|i|&self.blocs[i].0)
    }
}
