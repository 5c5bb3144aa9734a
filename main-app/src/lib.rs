// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! This crate provides a unified API to choose generators and counting rules by name.
//! It also contains the main binary.

use std::path::Path;
use anyhow::Context;
use votesim::bloc_model::BlocModel;

pub mod rules;
pub mod generators;

/// Read and validate a JSON bloc model.
pub fn read_bloc_model<P:AsRef<Path>>(path:P) -> anyhow::Result<BlocModel> {
    let json = std::fs::read_to_string(path.as_ref()).with_context(||format!("Could not read {}",path.as_ref().to_string_lossy()))?;
    BlocModel::from_json(&json).with_context(||format!("Invalid bloc model in {}",path.as_ref().to_string_lossy()))
}
