// RovSim: AS-level routing simulator with Route Origin Validation
// Copyright (C) 2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use clap::Parser;
use log::{error, info};

use rovsim::{io, prelude::*};

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

/// Simulate valley-free inter-domain routing with Route Origin Validation.
///
/// Builds the AS graph from a CAIDA serial-2 relationship file, seeds the
/// given origin announcements, propagates them in one UP / ACROSS / DOWN
/// sweep, and writes every resulting RIB entry to `ribs.csv` in the working
/// directory.
#[derive(Debug, Parser)]
struct Cli {
    /// CAIDA serial-2 AS relationship file (optionally bzip2-compressed).
    #[clap(long)]
    relationships: PathBuf,
    /// CSV file of origin announcements (`seed_asn,prefix,rov_invalid`).
    #[clap(long)]
    announcements: PathBuf,
    /// File listing one ROV-adopting ASN per line.
    #[clap(long = "rov-asns")]
    rov_asns: PathBuf,
}

fn main() -> ExitCode {
    pretty_env_logger::init_timed();

    let args = match Cli::try_parse() {
        Ok(args) => args,
        // help and version requests are not argument errors and exit 0
        Err(e)
            if matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> Result<(), SimError> {
    let mut net = AsGraph::new();
    io::read_relationships(&args.relationships, &mut net)?;

    for asn in io::read_rov_asns(&args.rov_asns)? {
        net.set_policy(asn, PolicyKind::Rov);
    }

    io::read_seeds(&args.announcements, &mut net)?;

    propagate(&mut net)?;

    io::write_ribs(Path::new("ribs.csv"), &net)?;
    info!("simulation complete");
    Ok(())
}
