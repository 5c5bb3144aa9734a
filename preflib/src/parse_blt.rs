// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.


//! Parse the  .blt format.
//! This is a text file.
//! The first line contains two integers separated by whitespace; the first is the number of candidates, the second the number of seats.
//! An optional next line lists withdrawn candidates as negative indices.
//! The next many lines represent votes, starting with the weight, then a list of candidate indices (starting at 1) separated by whitespace and ending with 0.
//! Candidates sharing a position are joined by `=`, e.g. `2=3`.
//! The last of these lines just contains "0"
//! Subsequent lines list the "candidate name", one per line, optionally followed by a quoted party which is ignored.
//! A final quoted line, if present, is the title.


use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufRead;
use std::path::Path;
use anyhow::{anyhow, Context};
use votesim::ballot::{Ballot, RankPosition, Ranking};
use votesim::candidate::Candidate;
use votesim::preference_profile::PreferenceProfile;
use votesim::weight::Weight;

fn get_line(s:Option<std::io::Result<String>>) -> anyhow::Result<String> { Ok(s.ok_or_else(||anyhow!("Unexpected end of file"))??) }

/// Get the next line that is not blank.
fn get_non_blank_line<I:Iterator<Item=std::io::Result<String>>>(lines:&mut I) -> anyhow::Result<String> {
    loop {
        let line = get_line(lines.next())?;
        if !line.trim().is_empty() { return Ok(line) }
    }
}

fn parse_index(s:&str,num_candidates:usize) -> anyhow::Result<usize> {
    let index : usize = s.parse().with_context(||format!("Could not parse candidate index {}",s))?;
    if index<1 || index>num_candidates { return Err(anyhow!("Expecting candidate index between 1 and {}, got {}",num_candidates,index)) }
    Ok(index-1)
}

/// The contents of the first pair of double quotes, if any.
fn quoted(line:&str) -> Option<&str> {
    let fields : Vec<&str> = line.split('"').collect();
    if fields.len()>=3 { Some(fields[1]) } else { None }
}

/// Parse a .blt file, returning the profile and the number of seats. Withdrawn candidates are removed
/// from the ballots and from the declared candidates.
pub fn parse_reader<R:BufRead>(reader:R) -> anyhow::Result<(PreferenceProfile,usize)> {
    let mut lines = reader.lines();
    let firstline = get_non_blank_line(&mut lines).context("No lines in file")?;
    let header : Vec<usize> = firstline.split_whitespace().map(|s|s.parse::<usize>()).collect::<Result<_,_>>().with_context(||format!("Could not parse first line {}",firstline))?;
    if header.len()!=2 { return Err(anyhow!("Expecting the first line to have two fields")); }
    let num_candidates = header[0];
    let seats = header[1];
    let mut withdrawn : Vec<usize> = vec![];
    let mut votes : Vec<(Weight,Vec<Vec<usize>>)> = vec![];
    loop {
        let line = get_non_blank_line(&mut lines)?;
        let fields : Vec<&str> = line.split_whitespace().collect();
        if fields[0].starts_with('-') { // withdraw candidates
            if !votes.is_empty() { return Err(anyhow!("Withdrawn candidates must come before the votes")); }
            for c in fields {
                let index = c.strip_prefix('-').ok_or_else(||anyhow!("Mixture of withdrawn candidates and votes on line {}",line))?;
                withdrawn.push(parse_index(index,num_candidates)?);
            }
        } else {
            if fields.last().copied()!=Some("0") { return Err(anyhow!("Found preference line not ending in 0 : {}",line)); }
            if fields.len()==1 { break; }
            let weight : Weight = fields[0].parse().map_err(|e|anyhow!("Could not parse weight {} : {}",fields[0],e))?;
            let mut positions = vec![];
            for position in &fields[1..fields.len()-1] {
                positions.push(position.split('=').map(|c|parse_index(c,num_candidates)).collect::<anyhow::Result<Vec<usize>>>()?);
            }
            votes.push((weight,positions));
        }
    }
    let mut candidates : Vec<Candidate> = vec![];
    for _ in 0..num_candidates {
        let candidate_name_line = get_non_blank_line(&mut lines).with_context(||format!("Expecting {} candidate names, found {}",num_candidates,candidates.len()))?;
        let name = quoted(&candidate_name_line).ok_or_else(||anyhow!("Expecting candidate name in quotes, got {}",candidate_name_line))?;
        candidates.push(Candidate::from(name));
    }
    for line in lines {
        let line = line?;
        if !line.trim().is_empty() && quoted(&line).is_none() { return Err(anyhow!("Unexpected text after the candidate names : {}",line)); }
    }
    let mut ballots = vec![];
    for (weight,positions) in votes {
        let ranking : Ranking = positions.into_iter().map(|p|p.into_iter().map(|i|candidates[i].clone()).collect::<RankPosition>()).collect();
        ballots.push(Ballot::from_ranking(ranking,weight)?);
    }
    let profile = PreferenceProfile::new(ballots,candidates.clone())?;
    let withdrawn : BTreeSet<Candidate> = withdrawn.into_iter().map(|i|candidates[i].clone()).collect();
    let profile = if withdrawn.is_empty() { profile } else { profile.with_candidates_removed(&withdrawn) };
    Ok((profile,seats))
}

pub fn parse<P:AsRef<Path>>(path:P) -> anyhow::Result<(PreferenceProfile,usize)> {
    let file = File::open(path.as_ref()).with_context(||format!("Could not open {}",path.as_ref().to_string_lossy()))?;
    parse_reader(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use votesim::candidate::candidate_list;

    const EXAMPLE : &str = "4 2
-4
3 1 2 0
2 2=3 1 0
1 4 3 0
0
\"Alice\"
\"Bob\" \"Blue\"
\"Carol\"
\"Dan\"
\"Example election\"
";

    #[test]
    fn test_parse_blt() {
        let (profile,seats) = parse_reader(EXAMPLE.as_bytes()).unwrap();
        assert_eq!(seats,2);
        assert_eq!(profile.declared_candidates(),&candidate_list(["Alice","Bob","Carol"])[..]);
        assert_eq!(profile.num_ballots(),Weight::from_integer(6));
        let ballots = profile.get_ballots();
        assert_eq!(ballots[0].to_string(),"Alice > Bob");
        assert_eq!(ballots[1].to_string(),"{Bob,Carol} > Alice");
        assert_eq!(ballots[1].weight(),&Weight::from_integer(2));
        // Dan was withdrawn.
        assert_eq!(ballots[2].to_string(),"Carol");
    }

    #[test]
    fn test_bad_blt() {
        assert!(parse_reader("".as_bytes()).is_err());
        assert!(parse_reader("2 1\n1 1 2\n0\n\"A\"\n\"B\"\n".as_bytes()).is_err()); // no terminating 0
        assert!(parse_reader("2 1\n1 1 3 0\n0\n\"A\"\n\"B\"\n".as_bytes()).is_err()); // no candidate 3
        assert!(parse_reader("2 1\n1 1 2 0\n0\n\"A\"\n".as_bytes()).is_err()); // missing name
        assert!(parse_reader("2 1 7\n0\n\"A\"\n\"B\"\n".as_bytes()).is_err());
        assert!(parse_reader("2 1\n1 1 2 0\n0\nA\nB\n".as_bytes()).is_err());
    }
}
