// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(version = "0.1", author = "Andrew Conway", name="preflib_to_csv")]
/// Convert a .soi, .soc or .blt file to the VoteSim .csv profile format. See https://www.preflib.org/.
/// The number of seats in a .blt file is printed, as the .csv format does not record it.
struct Opts {
    /// The name of the .soi, .soc or .blt file to convert
    #[clap(value_parser)]
    file : PathBuf,

    /// An optional output file. If not specified, the input file name is used with the extension changed to .csv
    #[clap(short, long,value_parser)]
    out : Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let opt : Opts = Opts::parse();
    let (profile,seats) = preflib::load_profile(&opt.file)?;
    let out_path = if let Some(path) = &opt.out { path.clone() } else {
        let mut path = PathBuf::from(opt.file.file_name().unwrap_or_default());
        path.set_extension("csv");
        path
    };
    profile.to_csv_path(&out_path)?;
    if let Some(seats) = seats { println!("{} seats",seats); }
    println!("Wrote {} distinct rankings to {}",profile.condense().len(),out_path.to_string_lossy());
    Ok(())
}
