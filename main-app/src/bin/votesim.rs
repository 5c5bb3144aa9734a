// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.


use clap::{Parser, Subcommand, Args};
use std::path::{Path, PathBuf};
use std::fs::File;
use anyhow::anyhow;
use main_app::generators::{GeneratorOptions, Generators};
use main_app::read_bloc_model;
use main_app::rules::Rules;
use preflib::cvr::CvrColumns;
use votesim::ballot_generator::BallotGenerator;
use votesim::preference_profile::PreferenceProfile;
use votesim::random_util::rng_from_seed;

#[derive(Parser)]
#[clap(version = "0.2", author = "Andrew Conway", name="votesim")]
/// Generate synthetic ranked choice ballots from a bloc model, and count them with a variety of rules.
struct Opts {
    /// Print the progress of generation and counting to stderr.
    #[clap(long,global=true)]
    verbose: bool,

    #[clap(subcommand)]
    command : Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a profile from a JSON bloc model.
    Generate(GenerateOpts),
    /// Count an existing profile.
    Tabulate(TabulateOpts),
    /// Generate a profile and count it.
    Simulate(SimulateOpts),
}

#[derive(Args)]
struct GenerationArgs {
    /// The JSON file describing the blocs, slates, preference intervals and cohesion.
    #[clap(long)]
    model : PathBuf,

    /// The number of ballots to generate.
    #[clap(long)]
    ballots : usize,

    /// The ballot generator to use: slate-pl, pl, bt, ac, ic, iac, 1d or simplex.
    #[clap(long,default_value_t=Generators::SlatePlackettLuce)]
    generator : Generators,

    /// The Dirichlet parameter for the simplex generator. 0 puts every voter on one ranking.
    #[clap(long,default_value_t=1.0)]
    alpha : f64,

    /// If given, ballots rank at most this many candidates.
    #[clap(long)]
    ballot_length : Option<usize>,
}

impl GenerationArgs {
    fn build(&self) -> anyhow::Result<Box<dyn BallotGenerator>> {
        let model = read_bloc_model(&self.model)?;
        let options = GeneratorOptions{ alpha: self.alpha, ballot_length: self.ballot_length };
        Ok(self.generator.build(model,&options)?)
    }
}

#[derive(Args)]
struct CountArgs {
    /// The counting rules to use: plurality, stv or borda.
    #[clap(long)]
    rule : Rules,

    /// The number of people to elect. If used, overrides the value in a .blt file. Otherwise 1.
    #[clap(long)]
    seats : Option<usize>,

    /// An optional JSON file to store the full round by round outcome in.
    #[clap(long)]
    transcript : Option<PathBuf>,
}

#[derive(Args)]
struct GenerateOpts {
    #[clap(flatten)]
    generation : GenerationArgs,

    /// Seed for the random number generator, for reproducible profiles.
    #[clap(long)]
    seed : Option<u64>,

    /// The .csv file to write the profile to. If not specified, the profile is printed.
    #[clap(long)]
    out : Option<PathBuf>,

    /// Also write the profile of each bloc, to files named after the bloc.
    #[clap(long)]
    by_bloc : bool,
}

#[derive(Args)]
struct TabulateOpts {
    /// The profile to count, a .csv, .blt, .soc or .soi file.
    #[clap(long)]
    profile : PathBuf,

    #[clap(flatten)]
    count : CountArgs,

    /// Seed for tie resolution.
    #[clap(long)]
    seed : Option<u64>,

    /// Read the profile as a cast vote record, one row per voter after a header row, rather than by extension.
    #[clap(long)]
    cvr : bool,

    /// For a cast vote record, the column (from 0) holding voter ids.
    #[clap(long,requires="cvr")]
    id_col : Option<usize>,

    /// For a cast vote record, the column (from 0) holding the weight of each row.
    #[clap(long,requires="cvr")]
    weight_col : Option<usize>,
}

#[derive(Args)]
struct SimulateOpts {
    #[clap(flatten)]
    generation : GenerationArgs,

    #[clap(flatten)]
    count : CountArgs,

    /// Seed for both generation and tie resolution.
    #[clap(long)]
    seed : Option<u64>,

    /// An optional .csv file to also write the generated profile to.
    #[clap(long)]
    out : Option<PathBuf>,
}

/// `path` with `_suffix` added to the file stem.
fn with_stem_suffix(path:&Path,suffix:&str) -> PathBuf {
    let stem = path.file_stem().map(|s|s.to_string_lossy().to_string()).unwrap_or_default();
    let extension = path.extension().map(|s|s.to_string_lossy().to_string()).unwrap_or_else(||"csv".to_string());
    path.with_file_name(format!("{}_{}.{}",stem,suffix,extension))
}

fn write_or_print(profile:&PreferenceProfile,out:Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() { if !parent.as_os_str().is_empty() { std::fs::create_dir_all(parent)? } }
            profile.to_csv_path(path)?;
            log::info!("Wrote {} rankings to {}",profile.len(),path.to_string_lossy());
        }
        None => println!("{}",profile),
    }
    Ok(())
}

fn generate(args:&GenerationArgs,seed:Option<u64>,out:Option<&Path>,by_bloc:bool) -> anyhow::Result<()> {
    let generator = args.build()?;
    let mut rng = rng_from_seed(seed);
    let (profile,blocs) = generator.generate_profile_by_bloc(args.ballots,&mut rng)?;
    write_or_print(&profile,out)?;
    if by_bloc {
        for (bloc,bloc_profile) in &blocs {
            match out {
                Some(path) => write_or_print(bloc_profile,Some(&with_stem_suffix(path,bloc)))?,
                None => { println!("Bloc {}",bloc); write_or_print(bloc_profile,None)? }
            }
        }
    }
    Ok(())
}

fn count(args:&CountArgs,profile:PreferenceProfile,seats_in_file:Option<usize>,seed:Option<u64>) -> anyhow::Result<()> {
    let seats = args.seats.or(seats_in_file).unwrap_or(1);
    let outcome = args.rule.count(profile,seats,seed)?;
    println!("{}",outcome);
    if let Some(transcript) = &args.transcript {
        if let Some(parent) = transcript.parent() { if !parent.as_os_str().is_empty() { std::fs::create_dir_all(parent)? } }
        serde_json::to_writer(File::create(transcript)?,&outcome)?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let opt : Opts = Opts::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(if opt.verbose { "debug" } else { "warn" })).init();
    match &opt.command {
        Command::Generate(generate_opts) => {
            generate(&generate_opts.generation,generate_opts.seed,generate_opts.out.as_deref(),generate_opts.by_bloc)?;
        }
        Command::Tabulate(tabulate_opts) => {
            let (profile,seats) = if tabulate_opts.cvr {
                let columns = CvrColumns{ id_col: tabulate_opts.id_col, weight_col: tabulate_opts.weight_col };
                (preflib::cvr::parse(&tabulate_opts.profile,columns)?,None)
            } else { preflib::load_profile(&tabulate_opts.profile)? };
            count(&tabulate_opts.count,profile,seats,tabulate_opts.seed)?;
        }
        Command::Simulate(simulate_opts) => {
            let generator = simulate_opts.generation.build()?;
            let profile = generator.generate_profile(simulate_opts.generation.ballots,&mut rng_from_seed(simulate_opts.seed))?;
            if let Some(out) = &simulate_opts.out { write_or_print(&profile,Some(out))?; }
            if profile.num_ballots().is_zero() { return Err(anyhow!("No ballots were generated")); }
            count(&simulate_opts.count,profile,None,simulate_opts.seed)?;
        }
    }
    Ok(())
}
