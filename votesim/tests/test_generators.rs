// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.


//! Statistical checks of the ballot generators, using fixed seeds.

use std::collections::BTreeMap;
use votesim::ballot_generator::alternating_crossover::AlternatingCrossover;
use votesim::ballot_generator::ballot_simplex::BallotSimplex;
use votesim::ballot_generator::bradley_terry::BradleyTerry;
use votesim::ballot_generator::impartial_culture::ImpartialCulture;
use votesim::ballot_generator::one_dim_spatial::OneDimSpatial;
use votesim::ballot_generator::plackett_luce::PlackettLuce;
use votesim::ballot_generator::slate_plackett_luce::SlatePlackettLuce;
use votesim::ballot_generator::truncated::Truncated;
use votesim::ballot_generator::BallotGenerator;
use votesim::bloc_model::BlocModel;
use votesim::candidate::candidate_list;
use votesim::election::Election;
use votesim::election_rules::stv::STV;
use votesim::random_util::rng_from_seed;
use votesim::weight::Weight;

fn single_bloc(interval:&str) -> BlocModel {
    let json = format!(r#"{{
        "bloc_voter_prop": {{"V": 1.0}},
        "slate_to_candidates": {{"V": ["A","B","C"]}},
        "pref_intervals": {{"V": {{"V": {}}}}},
        "cohesion": {{"V": {{"V": 1.0}}}}
    }}"#,interval);
    BlocModel::from_json(&json).unwrap()
}

const TWO_BLOCS : &str = r#"{
    "bloc_voter_prop": {"W": 0.6, "C": 0.4},
    "slate_to_candidates": {"W": ["W1","W2"], "C": ["C1","C2"]},
    "pref_intervals": {
        "W": {"W": {"W1": 0.5, "W2": 0.5}, "C": {"C1": 0.5, "C2": 0.5}},
        "C": {"W": {"W1": 0.5, "W2": 0.5}, "C": {"C1": 0.8, "C2": 0.2}}
    },
    "cohesion": {"W": {"W": 0.8, "C": 0.2}, "C": {"C": 0.9, "W": 0.1}},
    "crossover": {"W": {"C": 0.2}, "C": {"W": 0.1}}
}"#;

#[test]
fn test_first_place_shares_follow_interval() {
    let generator = SlatePlackettLuce::new(single_bloc(r#"{"A":0.8,"B":0.15,"C":0.05}"#));
    let profile = generator.generate_profile(100000,&mut rng_from_seed(Some(2026))).unwrap();
    assert_eq!(profile.num_ballots(),Weight::from_integer(100000));
    let tallies = profile.first_place_tallies();
    let share = |c:&str| tallies[c].to_f64()/100000.0;
    assert!((share("A")-0.8).abs()<0.01);
    assert!((share("B")-0.15).abs()<0.01);
    assert!((share("C")-0.05).abs()<0.01);
    assert!(share("A")>share("B"));
    assert!(share("B")>share("C"));
}

#[test]
fn test_zero_support_candidates_come_last() {
    let generator = PlackettLuce::new(single_bloc(r#"{"A":0.5,"B":0.5,"C":0.0}"#)).unwrap();
    let profile = generator.generate_profile(500,&mut rng_from_seed(Some(1))).unwrap();
    for ballot in profile.get_ballots() {
        assert_eq!(ballot.ranking().len(),3);
        assert_eq!(ballot.position_of("C"),Some(2));
    }
}

#[test]
fn test_candidates_outside_interval_never_appear() {
    let model = BlocModel::from_json(r#"{
        "bloc_voter_prop": {"V": 1.0},
        "slate_to_candidates": {"V": ["A","B"]},
        "pref_intervals": {"V": {"V": {"A": 0.3, "B": 0.7}}},
        "cohesion": {"V": {"V": 1.0}}
    }"#).unwrap();
    let profile = SlatePlackettLuce::new(model).generate_profile(200,&mut rng_from_seed(Some(5))).unwrap();
    assert!(profile.get_ballots().iter().all(|b|b.position_of("C").is_none()));
    assert_eq!(profile.get_candidates(),candidate_list(["A","B"]));
}

#[test]
fn test_every_generator_is_reproducible() {
    let model = BlocModel::from_json(TWO_BLOCS).unwrap();
    let generators : Vec<Box<dyn BallotGenerator>> = vec![
        Box::new(SlatePlackettLuce::new(model.clone())),
        Box::new(PlackettLuce::new(model.clone()).unwrap()),
        Box::new(BradleyTerry::new(model.clone()).unwrap()),
        Box::new(AlternatingCrossover::new(model.clone()).unwrap()),
        Box::new(ImpartialCulture::new(model.clone())),
        Box::new(BallotSimplex::impartial_anonymous_culture(model.clone(),None).unwrap()),
        Box::new(BallotSimplex::from_alpha(model.clone(),0.5,Some(3)).unwrap()),
        Box::new(OneDimSpatial::new(model.clone())),
        Box::new(Truncated::new(SlatePlackettLuce::new(model),2)),
    ];
    for generator in &generators {
        let a = generator.generate_profile(300,&mut rng_from_seed(Some(11))).unwrap();
        let b = generator.generate_profile(300,&mut rng_from_seed(Some(11))).unwrap();
        assert_eq!(a,b,"{} with the same seed",generator.name());
        assert_eq!(a.num_ballots(),Weight::from_integer(300));
        assert_eq!(a.declared_candidates(),&candidate_list(["C1","C2","W1","W2"])[..]);
    }
}

#[test]
fn test_bloc_profiles_add_up() {
    let generator = SlatePlackettLuce::new(BlocModel::from_json(TWO_BLOCS).unwrap());
    let (all,by_bloc) = generator.generate_profile_by_bloc(1000,&mut rng_from_seed(Some(3))).unwrap();
    assert_eq!(by_bloc.len(),2);
    let sum : Weight = by_bloc.values().map(|p|p.num_ballots()).sum();
    assert_eq!(sum,all.num_ballots());
    let w = by_bloc["W"].num_ballots().to_f64();
    assert!((w/1000.0-0.6).abs()<0.06);
    // cohesive C voters mostly put a C candidate first.
    let c_tallies = by_bloc["C"].first_place_tallies();
    let c_first = c_tallies["C1"].to_f64()+c_tallies["C2"].to_f64();
    assert!(c_first/by_bloc["C"].num_ballots().to_f64()>0.8);
}

#[test]
fn test_from_params_then_count() {
    let mut rng = rng_from_seed(Some(8));
    let props = BTreeMap::from([("W".to_string(),0.7),("C".to_string(),0.3)]);
    let slates = BTreeMap::from([("W".to_string(),candidate_list(["W1","W2"])),("C".to_string(),candidate_list(["C1","C2"]))]);
    let cohesion = BTreeMap::from([("W".to_string(),0.9),("C".to_string(),0.9)]);
    let alphas : BTreeMap<String,BTreeMap<String,f64>> = ["W","C"].iter().map(|b|(b.to_string(),BTreeMap::from([("W".to_string(),1.0),("C".to_string(),1.0)]))).collect();
    let model = BlocModel::from_params(props,slates,&cohesion,&alphas,&mut rng).unwrap();
    let profile = SlatePlackettLuce::new(model).generate_profile(1000,&mut rng).unwrap();
    let election = Election::new(profile,2,STV,Some(8)).unwrap();
    let winners = election.run_election().unwrap().get_all_winners();
    assert_eq!(winners.len(),2);
    // 70% W voters, 90% cohesive, always elect at least one W candidate.
    assert!(winners.iter().any(|c|c.name().starts_with('W')));
}
