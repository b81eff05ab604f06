// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

use std::{
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

pub fn command_exists(program: impl AsRef<OsStr>) -> bool {
    Command::new(program)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .arg("--version")
        .output()
        .map(|x| x.status.success())
        .unwrap_or_default()
}

/// Lists the entries of a directory, sorted by file name.
pub fn list_dir(dir: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .collect::<Vec<_>>();
    entries.sort();
    Ok(entries)
}

/// Lists a directory tree as paths relative to `root`, directories suffixed with `/`.
pub fn list_tree(root: impl AsRef<Path>) -> Vec<String> {
    let root = root.as_ref();
    let mut out = Vec::new();
    collect_tree(root, root, &mut out);
    out
}

fn collect_tree(root: &Path, dir: &Path, out: &mut Vec<String>) {
    let Ok(entries) = list_dir(dir) else {
        return;
    };
    for path in entries {
        let relative = path.strip_prefix(root).unwrap_or(&path).display();
        if path.is_dir() {
            out.push(format!("{relative}/"));
            collect_tree(root, &path, out);
        } else {
            out.push(relative.to_string());
        }
    }
}
