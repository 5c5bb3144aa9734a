// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.


//! Properties of profile manipulation that should hold for any set of ballots.

use proptest::prelude::*;
use votesim::ballot::Ballot;
use votesim::candidate::candidate_list;
use votesim::cleaning::{deduplicate_profile, remove_noncands};
use votesim::election::Election;
use votesim::election_rules::stv::STV;
use votesim::preference_profile::PreferenceProfile;
use votesim::weight::Weight;

const NAMES : [&str;5] = ["A","B","C","D","E"];

/// A ballot over some of A..E, with possible ties and undervotes, and a small integer weight.
fn arb_ballot() -> impl Strategy<Value=Ballot> {
    (prop::collection::vec(prop::collection::btree_set(0..NAMES.len(),0..3),0..4),1..5usize).prop_map(|(positions,weight)|{
        let mut used = std::collections::BTreeSet::new();
        let ranking : Vec<Vec<&str>> = positions.into_iter().map(|p|p.into_iter().filter(|i|used.insert(*i)).map(|i|NAMES[i]).collect()).collect();
        Ballot::new(ranking).scaled_by_integer(weight)
    })
}

fn arb_profile() -> impl Strategy<Value=PreferenceProfile> {
    prop::collection::vec(arb_ballot(),0..30).prop_map(PreferenceProfile::from_ballots)
}

proptest! {
    #[test]
    fn condense_keeps_weight_and_is_idempotent(profile in arb_profile()) {
        let condensed = profile.condense();
        prop_assert_eq!(condensed.num_ballots(),profile.num_ballots());
        prop_assert!(condensed.len()<=profile.len());
        prop_assert_eq!(condensed.condense(),condensed.clone());
        prop_assert_eq!(condensed.to_dict(false),profile.to_dict(false));
    }

    #[test]
    fn first_place_tallies_add_up(profile in arb_profile()) {
        let total : Weight = profile.first_place_tallies().into_values().sum();
        let non_empty : Weight = profile.get_ballots().iter().filter(|b|!b.is_empty()).map(|b|b.weight()).sum();
        prop_assert_eq!(total,non_empty);
    }

    #[test]
    fn deduplicate_leaves_candidates_once(profile in arb_profile()) {
        let cleaned = deduplicate_profile(&profile);
        prop_assert_eq!(cleaned.num_ballots(),profile.num_ballots());
        for ballot in cleaned.get_ballots() {
            let mentioned : usize = ballot.ranking().iter().map(|p|p.len()).sum();
            prop_assert_eq!(mentioned,ballot.candidates().len());
        }
    }

    #[test]
    fn removing_candidates_keeps_weight(profile in arb_profile()) {
        let cleaned = remove_noncands(&profile,&candidate_list(["A","C"]));
        prop_assert_eq!(cleaned.num_ballots(),profile.num_ballots());
        prop_assert!(cleaned.get_ballots().iter().all(|b|b.position_of("A").is_none() && b.position_of("C").is_none()));
    }

    #[test]
    fn stv_fills_every_seat(profile in arb_profile(), seats in 1..3usize) {
        prop_assume!(profile.candidates().len()>=seats && !profile.num_ballots().is_zero());
        let election = Election::new(profile,seats,STV,Some(1)).unwrap();
        let outcome = election.run_election().unwrap();
        prop_assert_eq!(outcome.get_all_winners().len(),seats);
        prop_assert_eq!(outcome.get_rankings().len(),outcome.candidates.len());
    }
}
