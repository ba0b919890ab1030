//          Copyright Nick G 2023.
// Distributed under the Boost Software License, Version 1.0.
//    (See accompanying file LICENSE or copy at
//          https://www.boost.org/LICENSE_1_0.txt)

//! Console reporting of each patch run

use crate::patcher::{Invocation, Mode};
use std::io::{self, Write};

/// Tally of how the patches went
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub failed: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// True when nothing failed, an empty run counts as a success
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

#[derive(Debug)]
pub struct Reporter<W> {
    out: W,
    mode: Mode,
    summary: Summary,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, mode: Mode) -> Self {
        Self {
            out,
            mode,
            summary: Summary::default(),
        }
    }

    #[cfg(test)]
    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Write out everything about one invocation and record how it went
    pub fn report(&mut self, invocation: &Invocation) -> io::Result<()> {
        let patch = invocation.patch.display();
        writeln!(self.out, "{} {}...", self.mode.progressive(), patch)?;
        write_stream(&mut self.out, &invocation.stdout)?;
        write_stream(&mut self.out, &invocation.stderr)?;

        if invocation.success() {
            self.summary.succeeded += 1;
            writeln!(self.out, "{} {}", self.mode.past(), patch)
        } else {
            self.summary.failed += 1;
            writeln!(self.out, "{}", self.mode.failure(&invocation.patch))
        }
    }

    /// Final line for the whole run, hands back the tally
    pub fn finish(mut self) -> io::Result<Summary> {
        writeln!(
            self.out,
            "{} {} of {} patches",
            self.mode.past(),
            self.summary.succeeded,
            self.summary.total()
        )?;
        self.out.flush()?;
        Ok(self.summary)
    }
}

fn write_stream(out: &mut impl Write, text: &str) -> io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}
