// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.


//! Complete counts on small profiles whose outcomes can be worked out by hand.

use std::sync::Arc;
use votesim::ballot::Ballot;
use votesim::candidate::{candidate_list, Candidate};
use votesim::election::{Election, ElectionStatus};
use votesim::election_rules::borda::Borda;
use votesim::election_rules::plurality::Plurality;
use votesim::election_rules::stv::STV;
use votesim::election_state::ElectionReason;
use votesim::errors::ValidationError;
use votesim::preference_profile::PreferenceProfile;
use votesim::weight::Weight;

fn plurality_profile() -> PreferenceProfile {
    PreferenceProfile::from_ballots(vec![
        Ballot::linear(["A","B","C"]).scaled_by_integer(18),
        Ballot::linear(["B","A","C"]).scaled_by_integer(12),
        Ballot::linear(["C","B","A"]).scaled_by_integer(6),
    ])
}

#[test]
fn test_plurality_single_round() {
    let election = Election::new(plurality_profile(),1,Plurality,Some(7)).unwrap();
    let outcome = election.run_election().unwrap();
    assert_eq!(outcome.num_rounds(),1);
    assert_eq!(outcome.get_all_winners(),candidate_list(["A"]));
    let eliminated = outcome.get_all_eliminated();
    assert_eq!(eliminated.len(),2);
    assert!(eliminated.contains(&Candidate::from("B")));
    assert!(eliminated.contains(&Candidate::from("C")));
    let round = outcome.get_round_outcome(1).unwrap();
    assert_eq!(round.tallies["A"],Weight::from_integer(18));
    assert_eq!(round.elected_because,Some(ElectionReason::HighestTally));
    assert!(outcome.get_round_outcome(2).is_err());
}

#[test]
fn test_plurality_with_undervotes_and_ties_at_top() {
    // the first ballot splits its vote between A and B. Leading undervotes are skipped.
    let profile = PreferenceProfile::from_ballots(vec![
        Ballot::new(vec![vec!["A","B"]]).scaled_by_integer(4),
        Ballot::new(vec![vec![],vec!["C"]]).scaled_by_integer(2),
        Ballot::linear(["B"]),
    ]);
    let outcome = Election::new(profile,1,Plurality,Some(1)).unwrap().run_election().unwrap().clone();
    let round = outcome.get_round_outcome(1).unwrap();
    assert_eq!(round.tallies["A"],Weight::from_integer(2));
    assert_eq!(round.tallies["B"],Weight::from_integer(3));
    assert_eq!(round.tallies["C"],Weight::from_integer(2));
    assert_eq!(outcome.get_all_winners(),candidate_list(["B"]));
}

#[test]
fn test_stv_exact_transfers() {
    let profile = PreferenceProfile::from_ballots(vec![
        Ballot::linear(["A","B"]).scaled_by_integer(50),
        Ballot::linear(["A","C"]).scaled_by_integer(10),
        Ballot::linear(["C"]).scaled_by_integer(25),
        Ballot::linear(["D"]).scaled_by_integer(15),
    ]);
    let election = Election::new(profile,2,STV,Some(1)).unwrap();
    let outcome = election.run_election().unwrap();
    // quota 34. A has 60, transfer value 26/60.
    let first = outcome.get_round_outcome(1).unwrap();
    assert_eq!(first.elected,candidate_list(["A"]));
    assert_eq!(first.elected_because,Some(ElectionReason::ReachedQuota));
    let second = outcome.get_round_outcome(2).unwrap();
    assert_eq!(second.tallies["C"],Weight::fraction(88,3));
    assert_eq!(second.tallies["B"],Weight::fraction(65,3));
    assert_eq!(second.eliminated,candidate_list(["D"]));
    let third = outcome.get_round_outcome(3).unwrap();
    assert_eq!(third.eliminated,candidate_list(["B"]));
    let last = outcome.get_round_outcome(4).unwrap();
    assert_eq!(last.elected_because,Some(ElectionReason::AllRemainingMustBeElected));
    assert_eq!(outcome.get_all_winners(),candidate_list(["A","C"]));
    assert_eq!(outcome.num_rounds(),4);
    let changed = outcome.changed_rankings(2).unwrap();
    assert!(!changed.is_empty());
}

#[test]
fn test_borda() {
    let profile = PreferenceProfile::from_ballots(vec![
        Ballot::linear(["A","B","C"]).scaled_by_integer(3),
        Ballot::linear(["B","C","A"]).scaled_by_integer(2),
    ]);
    // A 3*3+2*1=11, B 3*2+2*3=12, C 3*1+2*2=7.
    let outcome = Election::new(profile,2,Borda,None).unwrap().run_election().unwrap().clone();
    assert_eq!(outcome.get_all_winners(),candidate_list(["B","A"]));
    assert_eq!(outcome.get_all_eliminated(),candidate_list(["C"]));
    assert_eq!(outcome.get_rankings(),candidate_list(["B","A","C"]));
}

#[test]
fn test_run_twice_is_identical() {
    let tied = PreferenceProfile::from_ballots(vec![Ballot::linear(["A"]),Ballot::linear(["B"]),Ballot::linear(["C"]),Ballot::linear(["D"])]);
    let election = Election::new(tied,2,STV,Some(42)).unwrap();
    let first = election.run_election().unwrap().clone();
    let second = election.run_election().unwrap();
    assert_eq!(&first,second);
    assert_eq!(election.status(),ElectionStatus::Complete);
    assert!(first.rounds.iter().any(|r|!r.tie_resolutions.is_empty()));
}

#[test]
fn test_same_seed_same_tie_resolution() {
    let tied = || PreferenceProfile::from_ballots((0..10).map(|i|Ballot::linear([format!("C{}",i)])).collect());
    let a = Election::new(tied(),3,Plurality,Some(9)).unwrap().run_election().unwrap().get_all_winners();
    let b = Election::new(tied(),3,Plurality,Some(9)).unwrap().run_election().unwrap().get_all_winners();
    assert_eq!(a,b);
}

#[test]
fn test_shared_between_threads() {
    let election = Arc::new(Election::new(plurality_profile(),1,Plurality,Some(3)).unwrap());
    let handles : Vec<_> = (0..4).map(|_|{
        let election = election.clone();
        std::thread::spawn(move||election.run_election().unwrap().get_all_winners())
    }).collect();
    for h in handles { assert_eq!(h.join().unwrap(),candidate_list(["A"])); }
}

#[test]
fn test_votes_pass_over_candidates_not_standing() {
    // X appears on ballots but is not declared, so those ballots count for A.
    let profile = || PreferenceProfile::new(vec![
        Ballot::linear(["X","A"]).scaled_by_integer(10),
        Ballot::linear(["B"]).scaled_by_integer(5),
    ],candidate_list(["A","B"])).unwrap();
    let plurality = Election::new(profile(),1,Plurality,Some(2)).unwrap().run_election().unwrap().clone();
    assert_eq!(plurality.get_all_winners(),candidate_list(["A"]));
    let round = plurality.get_round_outcome(1).unwrap();
    assert_eq!(round.tallies["A"],Weight::from_integer(10));
    assert_eq!(round.tallies["B"],Weight::from_integer(5));
    assert!(!round.tallies.contains_key("X"));
    let stv = Election::new(profile(),1,STV,Some(2)).unwrap().run_election().unwrap().clone();
    assert_eq!(stv.get_all_winners(),candidate_list(["A"]));
    assert_eq!(stv.get_round_outcome(1).unwrap().tallies["A"],Weight::from_integer(10));
}

#[test]
fn test_bad_elections() {
    assert_eq!(Election::new(plurality_profile(),4,Plurality,None).err(),Some(ValidationError::InvalidSeats{seats:4,candidates:3}));
    assert!(PreferenceProfile::new(vec![],candidate_list(["A","A"])).is_err());
}
