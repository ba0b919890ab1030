//          Copyright Nick G 2023.
// Distributed under the Boost Software License, Version 1.0.
//    (See accompanying file LICENSE or copy at
//          https://www.boost.org/LICENSE_1_0.txt)

//! Finds the patch files to run

use crate::error::Error;
use clap::ValueEnum;
use itertools::Itertools;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DIR: &str = "patches";
pub const DEFAULT_EXTENSION: &str = "diff";

/// The order patches are handed out in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Order {
    /// Lexicographic by file name
    #[default]
    Name,
    /// Whatever order the directory listing gives, no guarantees
    Listing,
}

/// A directory of patch files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchDir {
    path: PathBuf,
    suffix: String,
}

impl PatchDir {
    pub fn new(path: impl Into<PathBuf>, extension: impl AsRef<str>) -> Self {
        let extension = extension.as_ref().trim_start_matches('.');
        Self {
            path: path.into(),
            suffix: format!(".{extension}"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lazily walk the directory for patch files
    ///
    /// Only regular files whose name ends with the extension are yielded. Sub directories are
    /// skipped even when their name would match.
    ///
    /// # Error
    /// If the directory can't be read, or an entry fails to be read part way through
    pub fn entries(&self) -> Result<impl Iterator<Item = Result<PathBuf, Error>> + '_, Error> {
        let read_dir =
            fs::read_dir(&self.path).map_err(|e| Error::ReadDir(self.path.clone(), e))?;
        Ok(read_dir.filter_map(move |entry| match entry {
            Ok(entry) => {
                let path = entry.path();
                (self.matches(&entry.file_name()) && path.is_file()).then_some(Ok(path))
            }
            Err(e) => Some(Err(Error::ReadDir(self.path.clone(), e))),
        }))
    }

    /// All the patch files in `order`
    pub fn patches(&self, order: Order) -> Result<Vec<PathBuf>, Error> {
        let entries = self.entries()?;
        match order {
            Order::Listing => entries.collect(),
            Order::Name => Ok(entries
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .sorted_by(|a, b| a.file_name().cmp(&b.file_name()))
                .collect()),
        }
    }

    fn matches(&self, name: &OsStr) -> bool {
        name.as_encoded_bytes().ends_with(self.suffix.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use temp_testdir::TempDir;
    use yare::parameterized;

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), "").unwrap();
        }
    }

    fn names(patches: &[PathBuf]) -> Vec<String> {
        patches
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn keeps_the_dir_path() {
        let dir = PatchDir::new(DEFAULT_DIR, DEFAULT_EXTENSION);
        assert_eq!(dir, PatchDir::new("patches", "diff"));
        assert_eq!(dir.path(), Path::new("patches"));
    }

    #[test]
    fn leading_dot_in_extension_is_ignored() {
        assert_eq!(PatchDir::new("a", ".diff"), PatchDir::new("a", "diff"));
    }

    #[parameterized(
    none = { 0, 0 },
    only_patches = { 3, 0 },
    only_others = { 0, 4 },
    mixed = { 2, 5 },
    )]
    fn only_matching_files_found(patches: usize, others: usize) {
        let temp = TempDir::default().permanent();
        for i in 0..patches {
            touch(&temp, &[&format!("{i}.diff")]);
        }
        for i in 0..others {
            touch(&temp, &[&format!("{i}.txt")]);
        }

        let dir = PatchDir::new(temp.to_path_buf(), "diff");
        assert_eq!(dir.patches(Order::Listing).unwrap().len(), patches);
    }

    #[test]
    fn sorted_by_name() {
        let temp = TempDir::default().permanent();
        touch(&temp, &["c.diff", "a.diff", "b.diff", "10.diff"]);

        let dir = PatchDir::new(temp.to_path_buf(), "diff");
        assert_eq!(
            names(&dir.patches(Order::Name).unwrap()),
            vec!["10.diff", "a.diff", "b.diff", "c.diff"]
        );
    }

    #[test]
    fn paths_are_joined_to_the_dir() {
        let temp = TempDir::default().permanent();
        touch(&temp, &["one.diff"]);

        let dir = PatchDir::new(temp.to_path_buf(), "diff");
        assert_eq!(dir.patches(Order::Name).unwrap(), vec![temp.join("one.diff")]);
    }

    #[test]
    fn directories_are_skipped() {
        let temp = TempDir::default().permanent();
        fs::create_dir(temp.join("nested.diff")).unwrap();
        touch(&temp, &["real.diff"]);

        let dir = PatchDir::new(temp.to_path_buf(), "diff");
        assert_eq!(names(&dir.patches(Order::Name).unwrap()), vec!["real.diff"]);
    }

    #[test]
    fn suffix_must_be_at_the_end() {
        let temp = TempDir::default().permanent();
        touch(&temp, &["a.diff.orig", "b.diffs", "c.patch", ".diff", "d.diff"]);

        let dir = PatchDir::new(temp.to_path_buf(), "diff");
        assert_eq!(
            names(&dir.patches(Order::Name).unwrap()),
            vec![".diff", "d.diff"]
        );
    }

    #[test]
    fn other_extension() {
        let temp = TempDir::default().permanent();
        touch(&temp, &["a.diff", "b.patch"]);

        let dir = PatchDir::new(temp.to_path_buf(), "patch");
        assert_eq!(names(&dir.patches(Order::Name).unwrap()), vec!["b.patch"]);
    }

    #[test]
    fn entries_are_lazy_over_listing() {
        let temp = TempDir::default().permanent();
        touch(&temp, &["a.diff", "b.diff", "c.txt"]);

        let dir = PatchDir::new(temp.to_path_buf(), "diff");
        let mut entries = dir.entries().unwrap();
        assert!(entries.next().unwrap().is_ok());
        assert!(entries.next().unwrap().is_ok());
        assert!(entries.next().is_none());
    }

    #[test]
    fn missing_dir_errors() {
        let temp = TempDir::default().permanent();
        let missing = temp.join("not_here");

        let dir = PatchDir::new(&missing, "diff");
        let error = dir.patches(Order::Name).unwrap_err();
        assert!(matches!(error, Error::ReadDir(path, _) if path == missing));
    }
}
