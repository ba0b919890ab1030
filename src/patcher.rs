//          Copyright Nick G 2023.
// Distributed under the Boost Software License, Version 1.0.
//    (See accompanying file LICENSE or copy at
//          https://www.boost.org/LICENSE_1_0.txt)

//! Runs the external `patch` tool for one patch file at a time

use crate::cmd::{Cmd, SystemCmd};
use crate::error::Error;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

pub const DEFAULT_TOOL: &str = "patch";

/// Which direction to run a patch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Apply,
    Reverse,
}

impl Mode {
    fn flags(&self) -> &'static [&'static str] {
        match self {
            Mode::Apply => &["-p0", "-f"],
            Mode::Reverse => &["-p0", "-R"],
        }
    }

    pub fn progressive(&self) -> &'static str {
        match self {
            Mode::Apply => "Applying",
            Mode::Reverse => "Reversing",
        }
    }

    pub fn past(&self) -> &'static str {
        match self {
            Mode::Apply => "Applied",
            Mode::Reverse => "Reversed",
        }
    }

    pub fn failure(&self, patch: &Path) -> String {
        match self {
            Mode::Apply => format!("Patch {} failed!", patch.display()),
            Mode::Reverse => format!("Failed to reverse patch {}!", patch.display()),
        }
    }
}

/// The result of running the tool on one patch file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub patch: PathBuf,
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Invocation {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

#[derive(Debug)]
pub struct Patcher<C> {
    command: C,
    program: OsString,
    dry_run: bool,
}

impl Patcher<SystemCmd> {
    /// A patcher running `tool` as a real process, optionally from within `current_dir`
    ///
    /// `tool` isn't looked up until the first patch is run.
    pub fn system(tool: impl AsRef<OsStr>, current_dir: Option<PathBuf>) -> Self {
        Self::new(SystemCmd::new(current_dir), tool.as_ref())
    }
}

impl<C: Cmd> Patcher<C> {
    pub fn new(command: C, program: impl Into<OsString>) -> Self {
        Self {
            command,
            program: program.into(),
            dry_run: false,
        }
    }

    /// Only report what the tool would do, leave the files alone
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn args(&self, patch: &Path, mode: Mode) -> Vec<OsString> {
        let mut args: Vec<OsString> = mode.flags().iter().map(OsString::from).collect();
        if self.dry_run {
            args.push("--dry-run".into());
        }
        args.push("-i".into());
        args.push(patch.as_os_str().to_owned());
        args
    }

    /// Run the tool on `patch` and wait for it to finish
    ///
    /// A patch the tool rejects still comes back as an `Ok` [`Invocation`], check its status.
    ///
    /// # Error
    /// If the tool could not be started at all
    pub fn invoke(&mut self, patch: impl AsRef<Path>, mode: Mode) -> Result<Invocation, Error> {
        let patch = patch.as_ref();
        let args = self.args(patch, mode);
        tracing::debug!(
            "running {} {}",
            self.program.to_string_lossy(),
            args.iter().map(|a| a.to_string_lossy()).collect::<Vec<_>>().join(" ")
        );

        let program = self.program.to_string_lossy().to_string();
        let output = self.command.output(&self.program, &args).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::ToolNotFound(program.clone())
            } else {
                Error::Spawn(program.clone(), e)
            }
        })?;

        Ok(Invocation {
            patch: patch.to_path_buf(),
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
