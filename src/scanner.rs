// SPDX-License-Identifier: MIT

use log::*;

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Walks the record store and collects every id that already has a record
/// file on disk.
///
/// Leaf files are named `<id>` or `<id>.<ext>`; directories group records and
/// carry no id information themselves, so they are descended into
/// unconditionally. The walk uses an explicit work stack rather than
/// recursion and never follows symlinks.
///
/// A missing root is not an error: the client may simply never have stored
/// anything. Leaves whose stem is not an integer are skipped with a warning,
/// as are unreadable entries; a partial scan result is always better than
/// aborting the startup.
pub fn scan(root: &Path) -> BTreeSet<u64> {
    let mut ids = BTreeSet::new();

    if !root.exists() {
        warn!("record store path not found: {}", root.display());
        return ids;
    }

    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("cannot read {}: {err}", dir.display());
                continue;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("cannot read entry in {}: {err}", dir.display());
                    continue;
                }
            };

            // file_type() does not follow symlinks, which is what we want:
            // a symlinked directory could cycle back into the tree.
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    warn!("cannot stat {}: {err}", entry.path().display());
                    continue;
                }
            };

            if file_type.is_symlink() {
                debug!("not following symlink {}", entry.path().display());
            } else if file_type.is_dir() {
                pending.push(entry.path());
            } else {
                let path = entry.path();
                match path.file_stem().and_then(|stem| stem.to_str()) {
                    Some(stem) => match stem.parse::<u64>() {
                        Ok(id) => {
                            ids.insert(id);
                        }
                        Err(_) => {
                            warn!("skipping non-numeric record name: {}", path.display());
                        }
                    },
                    None => warn!("skipping unnamed record: {}", path.display()),
                }
            }
        }
    }

    debug!("scan of {} found {} used ids", root.display(), ids.len());
    ids
}
