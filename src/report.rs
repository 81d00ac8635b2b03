// SPDX-License-Identifier: MIT

use log::*;

use std::fs;
use std::io;
use std::path::Path;

/// Prints how many record files each top-level grouping directory holds.
/// Purely diagnostic; only counts regular files directly inside each
/// subdirectory.
pub fn print_report(root: &Path) -> io::Result<()> {
    if !root.exists() {
        println!("record store path not found: {}", root.display());
        return Ok(());
    }

    println!("--- record store report ---");
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let count = count_records(&entry.path());
        println!("{:<12} : {count} records", entry.file_name().to_string_lossy());
    }
    Ok(())
}

fn count_records(dir: &Path) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("cannot read {}: {err}", dir.display());
            return 0;
        }
    };
    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::File;

    #[test]
    fn counts_files_per_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("topic-a")).unwrap();
        File::create(dir.path().join("topic-a/1.txt")).unwrap();
        File::create(dir.path().join("topic-a/2.txt")).unwrap();

        assert_eq!(count_records(&dir.path().join("topic-a")), 2);
        // Nested directories are not counted as records.
        fs::create_dir(dir.path().join("topic-a/nested")).unwrap();
        assert_eq!(count_records(&dir.path().join("topic-a")), 2);
    }

    #[test]
    fn missing_root_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(print_report(&dir.path().join("gone")).is_ok());
    }
}
