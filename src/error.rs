//          Copyright Nick G 2023.
// Distributed under the Boost Software License, Version 1.0.
//    (See accompanying file LICENSE or copy at
//          https://www.boost.org/LICENSE_1_0.txt)

use std::io;
use std::path::PathBuf;

/// Errors that stop a run outright
///
/// A patch the tool rejects is *not* one of these, that's reported and the run moves on.
#[derive(Debug, displaydoc::Display)]
pub enum Error {
    /// Unable to read patch directory {0:?}: {1}
    ReadDir(PathBuf, io::Error),
    /// Patch tool "{0}" was not found
    ToolNotFound(String),
    /// Failed to run patch tool "{0}": {1}
    Spawn(String, io::Error),
}

impl std::error::Error for Error {}
