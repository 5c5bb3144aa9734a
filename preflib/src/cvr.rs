// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.


//! Parse a cast vote record: a CSV file with a header row, then one row per voter.
//! Each column other than the optional voter id and weight columns is a rank position, holding
//! one candidate name, or nothing for an undervote. Identical rows are grouped into one ballot
//! whose voters are the ids of the rows.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use anyhow::{anyhow, Context};
use votesim::ballot::{Ballot, RankPosition, Ranking};
use votesim::candidate::Candidate;
use votesim::preference_profile::PreferenceProfile;
use votesim::weight::Weight;

/// Which columns (counting from 0) are not rank positions.
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq)]
pub struct CvrColumns {
    /// Holds a unique id for each voter.
    pub id_col : Option<usize>,
    /// Holds the weight of each row. Otherwise each row has weight 1.
    pub weight_col : Option<usize>,
}

pub fn parse_reader<R:Read>(reader:R,columns:CvrColumns) -> anyhow::Result<PreferenceProfile> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let num_columns = reader.headers()?.len();
    if num_columns==0 { return Err(anyhow!("Cast vote record is empty")); }
    for col in [columns.id_col,columns.weight_col].into_iter().flatten() {
        if col>=num_columns { return Err(anyhow!("Column {} does not exist; there are only {} columns",col,num_columns)); }
    }
    let mut seen_ids : HashSet<String> = HashSet::new();
    let mut ballots = vec![];
    for (row,record) in reader.records().enumerate() {
        let record = record?;
        let line = row+2; // after the header, counting from 1.
        let mut ranking : Ranking = vec![];
        for (col,field) in record.iter().enumerate() {
            if Some(col)==columns.id_col || Some(col)==columns.weight_col { continue; }
            ranking.push(if field.is_empty() { RankPosition::new() } else { RankPosition::from([Candidate::from(field)]) });
        }
        let weight = match columns.weight_col {
            Some(col) => {
                let field = &record[col];
                field.parse::<Weight>().map_err(|e|anyhow!("Could not parse weight {} on line {} : {}",field,line,e))?
            }
            None => Weight::one(),
        };
        let mut ballot = Ballot::from_ranking(ranking,weight).with_context(||format!("line {}",line))?;
        if let Some(col) = columns.id_col {
            let id = record[col].trim();
            if id.is_empty() { return Err(anyhow!("Missing voter id on line {}",line)); }
            if !seen_ids.insert(id.to_string()) { return Err(anyhow!("Duplicate voter id {} on line {}",id,line)); }
            ballot = ballot.with_voters([id]);
        }
        ballots.push(ballot);
    }
    if ballots.is_empty() { return Err(anyhow!("Cast vote record has no votes")); }
    log::debug!("Read {} votes from cast vote record",ballots.len());
    Ok(PreferenceProfile::from_ballots(ballots).condense())
}

pub fn parse<P:AsRef<Path>>(path:P,columns:CvrColumns) -> anyhow::Result<PreferenceProfile> {
    let file = File::open(path.as_ref()).with_context(||format!("Could not open {}",path.as_ref().to_string_lossy()))?;
    parse_reader(file,columns)
}
