// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! Ballot cleaning. The Ballot type accepts malformed rankings (a candidate in two
//! positions, candidates not standing, nothing ranked at all); these functions apply
//! a policy to them. Each returns a new profile.

use std::collections::{BTreeSet, HashSet};
use crate::ballot::{Ballot, RankPosition, Ranking};
use crate::candidate::Candidate;
use crate::preference_profile::PreferenceProfile;

/// Apply a function to every ballot, then condense.
pub fn clean_profile<F:Fn(&Ballot)->Ballot>(profile:&PreferenceProfile,clean:F) -> PreferenceProfile {
    profile.with_ballots(profile.get_ballots().iter().map(clean).collect()).condense()
}

/// Remove ballots that rank no candidate.
pub fn remove_empty_ballots(profile:&PreferenceProfile) -> PreferenceProfile {
    profile.with_ballots(profile.get_ballots().iter().filter(|b|!b.is_empty()).cloned().collect())
}

/// Remove the given non-candidates from every ballot, dropping positions that become empty.
/// Unlike [PreferenceProfile::with_candidates_removed], ballots left empty are kept (as exhausted votes),
/// and the declared candidate list is unchanged.
pub fn remove_noncands(profile:&PreferenceProfile,non_candidates:&[Candidate]) -> PreferenceProfile {
    let removed : BTreeSet<Candidate> = non_candidates.iter().cloned().collect();
    clean_profile(profile,|b|{
        let ranking : Ranking = b.ranking().iter().map(|p|p.iter().filter(|c|!removed.contains(*c)).cloned().collect::<RankPosition>()).filter(|p|!p.is_empty()).collect();
        Ballot::new_unchecked(ranking,b.weight().clone(),b.voters().cloned())
    })
}

/// Only keep the first (highest ranked) appearance of each candidate on a ballot.
/// ```
/// use votesim::ballot::Ballot;
/// use votesim::cleaning::deduplicate_profile;
/// use votesim::preference_profile::PreferenceProfile;
/// let profile = PreferenceProfile::from_ballots(vec![Ballot::new(vec![vec!["A"],vec!["A","B"],vec!["A"],vec!["C"]])]);
/// let cleaned = deduplicate_profile(&profile);
/// assert_eq!(cleaned.get_ballots()[0],Ballot::linear(["A","B","C"]));
/// ```
pub fn deduplicate_profile(profile:&PreferenceProfile) -> PreferenceProfile {
    clean_profile(profile,|b|{
        let mut seen : HashSet<&Candidate> = HashSet::new();
        let mut ranking : Ranking = vec![];
        for position in b.ranking() {
            let was_empty = position.is_empty();
            let fresh : RankPosition = position.iter().filter(|c|seen.insert(*c)).cloned().collect();
            if was_empty || !fresh.is_empty() { ranking.push(fresh); }
        }
        Ballot::new_unchecked(ranking,b.weight().clone(),b.voters().cloned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::candidate_list;
    use crate::weight::Weight;

    #[test]
    fn test_remove_empty() {
        let profile = PreferenceProfile::new(vec![Ballot::linear(["A"]),Ballot::new(vec![Vec::<&str>::new()]),Ballot::linear(Vec::<&str>::new())],candidate_list(["A","B"])).unwrap();
        let cleaned = remove_empty_ballots(&profile);
        assert_eq!(cleaned.len(),1);
        assert_eq!(cleaned.declared_candidates().len(),2);
    }

    #[test]
    fn test_remove_noncands_keeps_exhausted() {
        let profile = PreferenceProfile::from_ballots(vec![Ballot::linear(["X"]),Ballot::linear(["A","X","B"]),Ballot::linear(["A","B"])]);
        let cleaned = remove_noncands(&profile,&candidate_list(["X"]));
        assert_eq!(cleaned.len(),2);
        assert_eq!(cleaned.num_ballots(),Weight::from_integer(3));
        assert_eq!(cleaned.get_ballots()[1],Ballot::linear(["A","B"]).scaled_by_integer(2));
    }

    #[test]
    fn test_deduplicate_keeps_undervotes() {
        let profile = PreferenceProfile::from_ballots(vec![Ballot::new(vec![vec!["A"],vec![],vec!["A"],vec!["B"]])]);
        let cleaned = deduplicate_profile(&profile);
        assert_eq!(cleaned.get_ballots()[0],Ballot::new(vec![vec!["A"],vec![],vec!["B"]]));
    }
}
