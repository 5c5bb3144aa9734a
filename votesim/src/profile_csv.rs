// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! Read and write profiles as CSV.
//!
//! Each row is a condensed ranking: the exact weight (e.g. `3/2`), then one field per
//! position, with tied candidates separated by `|` and an empty field for an undervote.
//! If the profile has a declared candidate list, it is written first as a row starting with `candidates`.

use std::io::{Read, Write};
use std::path::Path;
use anyhow::{anyhow, Context};
use crate::ballot::{Ballot, RankPosition, Ranking};
use crate::candidate::Candidate;
use crate::preference_profile::PreferenceProfile;
use crate::weight::Weight;

const TIE_SEPARATOR : &str = "|";
const CANDIDATES_ROW : &str = "candidates";

impl PreferenceProfile {
    /// Write the condensed profile.
    pub fn to_csv<W:Write>(&self,writer:W) -> anyhow::Result<()> {
        let mut writer = csv::WriterBuilder::new().flexible(true).has_headers(false).from_writer(writer);
        if !self.declared_candidates().is_empty() {
            let mut row = vec![CANDIDATES_ROW.to_string()];
            row.extend(self.declared_candidates().iter().map(|c|c.name().to_string()));
            writer.write_record(&row)?;
        }
        for ballot in self.condense().get_ballots() {
            let mut row = vec![ballot.weight().to_string()];
            for position in ballot.ranking() {
                if let Some(c) = position.iter().find(|c|c.name().contains(TIE_SEPARATOR)) {
                    return Err(anyhow!("Candidate name {} contains {} so can not be written to CSV",c,TIE_SEPARATOR));
                }
                if position.iter().any(|c|c.name().is_empty()) {
                    return Err(anyhow!("An empty candidate name can not be written to CSV as it would read back as an undervote"));
                }
                row.push(position.iter().map(|c|c.name()).collect::<Vec<_>>().join(TIE_SEPARATOR));
            }
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_csv_path(&self,path:impl AsRef<Path>) -> anyhow::Result<()> {
        let file = std::fs::File::create(path.as_ref()).with_context(||format!("Could not create {}",path.as_ref().to_string_lossy()))?;
        self.to_csv(file)
    }

    /// Read a profile written by [PreferenceProfile::to_csv].
    pub fn from_csv<R:Read>(reader:R) -> anyhow::Result<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).has_headers(false).from_reader(reader);
        let mut ballots = vec![];
        let mut candidates = vec![];
        for (line,record) in reader.records().enumerate() {
            let record = record?;
            let Some(first) = record.get(0) else { continue };
            if first==CANDIDATES_ROW {
                candidates = record.iter().skip(1).map(Candidate::from).collect();
                continue;
            }
            let weight : Weight = first.parse().map_err(|e|anyhow!("Could not parse weight {} on line {} : {}",first,line+1,e))?;
            let ranking : Ranking = record.iter().skip(1).map(|field|{
                if field.is_empty() { RankPosition::new() } else { field.split(TIE_SEPARATOR).map(Candidate::from).collect() }
            }).collect();
            ballots.push(Ballot::from_ranking(ranking,weight).with_context(||format!("line {}",line+1))?);
        }
        Ok(PreferenceProfile::new(ballots,candidates)?)
    }

    pub fn from_csv_path(path:impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path.as_ref()).with_context(||format!("Could not open {}",path.as_ref().to_string_lossy()))?;
        Self::from_csv(file)
    }
}

#[cfg(test)]
mod tests {
    use crate::ballot::Ballot;
    use crate::candidate::candidate_list;
    use crate::preference_profile::PreferenceProfile;
    use crate::weight::Weight;

    #[test]
    fn test_csv_format() {
        let profile = PreferenceProfile::new(vec![
            Ballot::with_weight(vec![vec!["A","B"],vec![],vec!["C"]],Weight::fraction(3,2)).unwrap(),
            Ballot::linear(["C"]),
        ],candidate_list(["A","B","C","D"])).unwrap();
        let mut out = vec![];
        profile.to_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text,"candidates,A,B,C,D\n3/2,A|B,,C\n1,C\n");
        let back = PreferenceProfile::from_csv(text.as_bytes()).unwrap();
        assert_eq!(back,profile);
    }

    #[test]
    fn test_csv_errors() {
        assert!(PreferenceProfile::from_csv("fish,A\n".as_bytes()).is_err());
        assert!(PreferenceProfile::from_csv("-1,A\n".as_bytes()).is_err());
        assert!(PreferenceProfile::from_csv("candidates,A,A\n".as_bytes()).is_err());
        let bad = PreferenceProfile::from_ballots(vec![Ballot::linear(["A|B"])]);
        assert!(bad.to_csv(vec![]).is_err());
        let unnamed = PreferenceProfile::from_ballots(vec![Ballot::linear([""]),Ballot::linear(["A"])]);
        assert!(unnamed.to_csv(vec![]).is_err());
    }
}
