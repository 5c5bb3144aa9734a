// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! Identifiers for candidates, blocs and slates.

use serde::{Serialize,Deserialize};
use std::borrow::Borrow;
use std::fmt;

/// a candidate, referred to by name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(pub String);

impl Candidate {
    pub fn name(&self) -> &str { &self.0 }
}

// type alias really, don't want long display
impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
// type alias really, don't want long display
impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{:?}", self.0) }
}

impl From<&str> for Candidate {
    fn from(s: &str) -> Self { Candidate(s.to_string()) }
}
impl From<String> for Candidate {
    fn from(s: String) -> Self { Candidate(s) }
}
impl From<&Candidate> for Candidate {
    fn from(c: &Candidate) -> Self { c.clone() }
}

/// Allows lookup in sets and maps of candidates by &str. Ordering and hashing agree with String.
impl Borrow<str> for Candidate {
    fn borrow(&self) -> &str { &self.0 }
}

/// The name of a group of voters with similar preferences.
pub type BlocName = String;
/// The name of a group of candidates, typically associated with a bloc.
pub type SlateName = String;

/// Make a list of candidates from anything that looks like a list of names.
/// ```
/// use votesim::candidate::{candidate_list, Candidate};
/// assert_eq!(candidate_list(["A","B"]),vec![Candidate::from("A"),Candidate::from("B")]);
/// ```
pub fn candidate_list<I:IntoIterator<Item=S>,S:Into<Candidate>>(names:I) -> Vec<Candidate> {
    names.into_iter().map(|s|s.into()).collect()
}
