// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.


//! Parsing preference data from https://www.preflib.org/ and other ballot file formats.

pub mod parse_blt;
pub mod cvr;

use std::fs::File;
use std::io::BufRead;
use std::path::Path;
use anyhow::{anyhow, Context};
use votesim::ballot::{Ballot, RankPosition, Ranking};
use votesim::candidate::Candidate;
use votesim::preference_profile::PreferenceProfile;
use votesim::weight::Weight;

/// Split a preference list like `1,{2,3},4` into positions.
fn parse_preference_list(prefs:&str,num_candidates:usize) -> anyhow::Result<Vec<Vec<usize>>> {
    let mut res = vec![];
    let mut rest = prefs.trim();
    while !rest.is_empty() {
        let (position,remaining) = if let Some(tied) = rest.strip_prefix('{') {
            let (inside,after) = tied.split_once('}').ok_or_else(||anyhow!("Unmatched {{ in {}",prefs))?;
            (inside,after.trim_start().strip_prefix(',').unwrap_or(after))
        } else {
            rest.split_once(',').unwrap_or((rest,""))
        };
        let mut candidates = vec![];
        for candidate in position.split(',') {
            let candidate : usize = candidate.trim().parse().with_context(||format!("Could not parse candidate {} in {}",candidate,prefs))?;
            if candidate<1 || candidate>num_candidates { return Err(anyhow!("Expecting candidate index between 1 and {}, got {}",num_candidates,candidate)) }
            candidates.push(candidate-1);
        }
        res.push(candidates);
        rest = remaining.trim();
    }
    Ok(res)
}

/// Parse a PrefLib .soc (complete orders) or .soi (incomplete orders) file.
/// Alternatives without a name are named by their index.
pub fn parse_reader<R:BufRead>(reader:R) -> anyhow::Result<PreferenceProfile> {
    let mut names : Vec<Option<String>> = vec![];
    let mut votes : Vec<(usize,Vec<Vec<usize>>)> = vec![];
    for line in reader.lines() {
        let line = line?;
        if let Some(metadata) = line.strip_prefix('#') { // metadata
            if let Some((metadata_name,metadata_value)) = metadata.split_once(':') {
                let metadata_value = metadata_value.trim();
                match metadata_name.trim() {
                    "TITLE" => { log::debug!("Reading {}",metadata_value); }
                    "DATA TYPE" => {
                        if metadata_value=="soc" || metadata_value=="soi" {} else {
                            return Err(anyhow!("Can only handle formats soc or soi, got {}",metadata_value));
                        }
                    }
                    "NUMBER ALTERNATIVES" => {
                        let n : usize = metadata_value.parse()?;
                        if names.len()<n { names.resize(n,None) }
                    }
                    s if s.starts_with("ALTERNATIVE NAME") => { // #ALTERNATIVE NAME n : name
                        let n : usize = s.trim_start_matches("ALTERNATIVE NAME").trim_start().parse()?;
                        if n==0 { return Err(anyhow!("ALTERNATIVE NAME 0 is not understood"))}
                        if names.len()<n { names.resize(n,None)}
                        names[n-1]=Some(metadata_value.to_string());
                    }
                    _ => {}
                }
            } else {
                return Err(anyhow!("Metadata line without colon : {}",line));
            }
        } else if line.trim().is_empty() {}
        else { // preferences line
            if let Some((n,prefs)) = line.split_once(':') {
                let n : usize = n.trim().parse()?;
                votes.push((n,parse_preference_list(prefs,names.len())?));
            } else {
                return Err(anyhow!("Expecting line of the form n : <preference list> got {}",line))
            }
        }
    }
    let candidates : Vec<Candidate> = names.into_iter().enumerate().map(|(i,name)|Candidate::from(name.unwrap_or_else(||(i+1).to_string()))).collect();
    let mut ballots = vec![];
    for (n,positions) in votes {
        let ranking : Ranking = positions.into_iter().map(|p|p.into_iter().map(|i|candidates[i].clone()).collect::<RankPosition>()).collect();
        ballots.push(Ballot::from_ranking(ranking,Weight::from_integer(n))?);
    }
    Ok(PreferenceProfile::new(ballots,candidates)?)
}

pub fn parse<P:AsRef<Path>>(path:P) -> anyhow::Result<PreferenceProfile> {
    let file = File::open(path.as_ref()).with_context(||format!("Could not open {}",path.as_ref().to_string_lossy()))?;
    parse_reader(std::io::BufReader::new(file))
}

/// Load a profile from a file, with the format determined by the extension: `.csv`, `.blt`, `.soc` or `.soi`.
/// Returns the number of seats too, if the format records it.
pub fn load_profile<P:AsRef<Path>>(path:P) -> anyhow::Result<(PreferenceProfile,Option<usize>)> {
    let path = path.as_ref();
    let extension = path.extension().and_then(|e|e.to_str()).map(|e|e.to_ascii_lowercase()).unwrap_or_default();
    match extension.as_str() {
        "csv" => Ok((PreferenceProfile::from_csv_path(path)?,None)),
        "blt" => { let (profile,seats) = parse_blt::parse(path)?; Ok((profile,Some(seats))) }
        "soc" | "soi" => Ok((parse(path)?,None)),
        _ => Err(anyhow!("Do not know how to read {}, expecting .csv, .blt, .soc or .soi",path.to_string_lossy())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use votesim::candidate::candidate_list;

    const SOI : &str = "# FILE NAME: 00001-00000001.soi
# TITLE: Example
# DATA TYPE: soi
# NUMBER ALTERNATIVES: 3
# ALTERNATIVE NAME 1: Alice
# ALTERNATIVE NAME 3: Carol
12: 1,3,2
5: {2,3},1
1: 3
";

    #[test]
    fn test_parse_soi() {
        let profile = parse_reader(SOI.as_bytes()).unwrap();
        assert_eq!(profile.declared_candidates(),&candidate_list(["Alice","2","Carol"])[..]);
        assert_eq!(profile.num_ballots(),Weight::from_integer(18));
        let ballots = profile.get_ballots();
        assert_eq!(ballots[0].to_string(),"Alice > Carol > 2");
        assert_eq!(ballots[1].to_string(),"{2,Carol} > Alice");
        assert_eq!(ballots[2].to_string(),"Carol");
    }

    #[test]
    fn test_names_before_count() {
        let soc = "# ALTERNATIVE NAME 1: Alice\n# ALTERNATIVE NAME 2: Bob\n# NUMBER ALTERNATIVES: 2\n4: 2,1\n";
        let profile = parse_reader(soc.as_bytes()).unwrap();
        assert_eq!(profile.declared_candidates(),&candidate_list(["Alice","Bob"])[..]);
        assert_eq!(profile.get_ballots()[0].to_string(),"Bob > Alice");
    }

    #[test]
    fn test_preference_list() {
        assert_eq!(parse_preference_list(" {1,2} , 3,{4}",4).unwrap(),vec![vec![0,1],vec![2],vec![3]]);
        assert!(parse_preference_list("1,5",4).is_err());
        assert!(parse_preference_list("{1,2",4).is_err());
    }

    #[test]
    fn test_bad_soi() {
        assert!(parse_reader("# DATA TYPE: toc\n".as_bytes()).is_err());
        assert!(parse_reader("# NUMBER ALTERNATIVES: 2\n3 1,2\n".as_bytes()).is_err());
        assert!(parse_reader("# NUMBER ALTERNATIVES: 2\n# ALTERNATIVE NAME 1: A\n# ALTERNATIVE NAME 2: A\n1: 1\n".as_bytes()).is_err());
        assert!(load_profile("votes.txt").is_err());
    }
}
