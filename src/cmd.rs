//          Copyright Nick G 2023.
// Distributed under the Boost Software License, Version 1.0.
//    (See accompanying file LICENSE or copy at
//          https://www.boost.org/LICENSE_1_0.txt)

//! A common command trait to make it possible to mock running the patch tool

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
pub trait Cmd {
    /// Run `program` with `args` to completion, capturing both output streams
    fn output(&mut self, program: &OsStr, args: &[OsString]) -> io::Result<Output>;
}

/// Runs programs as real child processes
#[derive(Debug, Default)]
pub struct SystemCmd {
    current_dir: Option<PathBuf>,
}

impl SystemCmd {
    pub fn new(current_dir: Option<PathBuf>) -> Self {
        Self { current_dir }
    }
}

impl Cmd for SystemCmd {
    fn output(&mut self, program: &OsStr, args: &[OsString]) -> io::Result<Output> {
        let program = which::which(program)
            .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e.to_string()))?;
        tracing::debug!("resolved {}", program.display());
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        // Nothing should ever be prompting, a closed stdin keeps a confused tool from
        // waiting on the terminal.
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command.output()
    }
}
