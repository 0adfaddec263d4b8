//! Executable lookup on the search path

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// One candidate command line: a program plus fixed leading arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(|s| s.into()));
        self
    }
}

impl From<&str> for CommandSpec {
    fn from(program: &str) -> Self {
        Self::new(program)
    }
}

/// A command whose program was found on this system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Resolve the first candidate whose program exists on `PATH`.
pub fn which(candidates: &[CommandSpec]) -> Option<ResolvedCommand> {
    let path = std::env::var_os("PATH").unwrap_or_default();
    let dirs: Vec<PathBuf> = std::env::split_paths(&path).collect();
    which_in(candidates, &dirs, &executable_suffixes())
}

pub(crate) fn which_in(
    candidates: &[CommandSpec],
    dirs: &[PathBuf],
    suffixes: &[OsString],
) -> Option<ResolvedCommand> {
    candidates.iter().find_map(|candidate| {
        find_executable(&candidate.program, dirs, suffixes).map(|program| ResolvedCommand {
            program,
            args: candidate.args.clone(),
        })
    })
}

fn find_executable(program: &str, dirs: &[PathBuf], suffixes: &[OsString]) -> Option<PathBuf> {
    let direct = Path::new(program);
    if direct.is_absolute() || program.contains(std::path::is_separator) {
        return with_suffixes(direct, suffixes).find(|p| is_executable(p));
    }

    dirs.iter()
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| with_suffixes(&dir.join(program), suffixes).collect::<Vec<_>>())
        .find(|p| is_executable(p))
}

fn with_suffixes<'a>(
    base: &'a Path,
    suffixes: &'a [OsString],
) -> impl Iterator<Item = PathBuf> + 'a {
    suffixes.iter().map(move |suffix| {
        let mut name = base.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    })
}

#[cfg(windows)]
fn executable_suffixes() -> Vec<OsString> {
    let pathext = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    std::iter::once(OsString::new())
        .chain(
            pathext
                .split(';')
                .filter(|ext| !ext.is_empty())
                .map(OsString::from),
        )
        .collect()
}

#[cfg(not(windows))]
fn executable_suffixes() -> Vec<OsString> {
    vec![OsString::new()]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
