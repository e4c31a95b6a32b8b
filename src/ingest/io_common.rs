use std::fs;
use std::path::{Path, PathBuf};

use snafu::ResultExt;

use crate::ingest::{IngestResult, ScanningInputSnafu};

pub fn simplify_file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// The name of the table of a session.
pub fn table_file_name(session: &str) -> String {
    format!("{}_dataframe.csv", session)
}

/// All the `.json` files under `root`, recursively, in path order.
/// Hidden files and directories are skipped.
pub fn collect_event_files(root: &Path) -> IngestResult<Vec<PathBuf>> {
    let mut res: Vec<PathBuf> = Vec::new();
    collect_json_files(root, &mut res)?;
    res.sort();
    Ok(res)
}

fn collect_json_files(dir: &Path, out: &mut Vec<PathBuf>) -> IngestResult<()> {
    let entries = fs::read_dir(dir).context(ScanningInputSnafu { path: dir })?;
    for entry in entries {
        let entry = entry.context(ScanningInputSnafu { path: dir })?;
        let path = entry.path();
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        if path.is_dir() {
            collect_json_files(&path, out)?;
        } else if path.extension().and_then(|s| s.to_str()) == Some("json") {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }

    #[test]
    fn finds_nested_json_files() {
        let td = TempDir::new().unwrap();
        let root = td.path();
        touch(&root.join("votes/2014/s2/data.json"));
        touch(&root.join("votes/2013/h1/data.json"));
        touch(&root.join("votes/2013/h1/data.xml"));
        touch(&root.join(".cache/h3/data.json"));
        touch(&root.join("votes/2013/.h4.json"));
        let files = collect_event_files(root).unwrap();
        assert_eq!(
            files,
            vec![
                root.join("votes/2013/h1/data.json"),
                root.join("votes/2014/s2/data.json")
            ]
        );
    }

    #[test]
    fn missing_root() {
        let td = TempDir::new().unwrap();
        assert!(collect_event_files(&td.path().join("nope")).is_err());
    }

    #[test]
    fn names() {
        assert_eq!(table_file_name("113"), "113_dataframe.csv");
        assert_eq!(
            simplify_file_name(Path::new("/data/raw/113/h1/data.json")),
            "data.json"
        );
    }
}
