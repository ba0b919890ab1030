//          Copyright Nick G 2023.
// Distributed under the Boost Software License, Version 1.0.
//    (See accompanying file LICENSE or copy at
//          https://www.boost.org/LICENSE_1_0.txt)

//! Runs every patch in a directory through the patch tool

use crate::cmd::Cmd;
use crate::error::Error;
use crate::patch_dir::{Order, PatchDir};
use crate::patcher::{Mode, Patcher};
use crate::report::{Reporter, Summary};
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

/// Apply or reverse every patch in `dir`, one at a time
///
/// A patch the tool rejects is reported and the run carries on with the next one, the returned
/// [`Summary`] says how many failed. Not being able to list `dir`, or not being able to start
/// the tool, ends the run with an error.
pub fn run<C: Cmd, W: Write>(
    patcher: &mut Patcher<C>,
    mode: Mode,
    dir: &PatchDir,
    order: Order,
    mut reporter: Reporter<W>,
) -> Result<Summary> {
    let patches: Box<dyn Iterator<Item = Result<PathBuf, Error>> + '_> = match order {
        Order::Listing => {
            let entries = dir.entries()?;
            tracing::info!("listing patches in {}", dir.path().display());
            Box::new(entries)
        }
        Order::Name => {
            let patches = dir.patches(order)?;
            tracing::info!("found {} patches in {}", patches.len(), dir.path().display());
            Box::new(patches.into_iter().map(Ok))
        }
    };

    for patch in patches {
        let invocation = patcher.invoke(patch?, mode)?;
        reporter.report(&invocation)?;
    }

    let summary = reporter.finish()?;
    tracing::info!(
        "{} of {} patches failed in {}",
        summary.failed,
        summary.total(),
        dir.path().display()
    );
    Ok(summary)
}
