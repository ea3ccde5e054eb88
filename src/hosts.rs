//! Host List Loader
//!
//! Target hosts come either from a newline delimited file or from the host
//! flag. The file wins when both are given.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default BMC address when no host is given
pub const DEFAULT_HOST: &str = "192.168.123.123";

/// Produce the ordered list of target hosts.
///
/// File lines are stripped of surrounding whitespace; duplicates and blank
/// lines are passed through unchanged. The host flag is split on
/// whitespace so several hosts can be given in one value.
pub fn load_hosts(files: Option<&Path>, host: &str) -> Result<Vec<String>> {
    let hosts = match files {
        Some(path) => read_host_file(path)?,
        None => host.split_whitespace().map(str::to_string).collect(),
    };

    debug!(count = hosts.len(), from_file = files.is_some(), "Loaded host list");
    Ok(hosts)
}

fn read_host_file(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::HostFileNotFound {
            path: path.display().to_string(),
        });
    }

    let contents = fs::read_to_string(path)?;
    Ok(contents.lines().map(|line| line.trim().to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn host_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_hosts_trimmed_in_order() {
        let file = host_file("10.0.0.3\n  10.0.0.1 \r\n\t10.0.0.2\n");
        let hosts = load_hosts(Some(file.path()), DEFAULT_HOST).unwrap();
        assert_eq!(hosts, vec!["10.0.0.3", "10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn test_file_passes_duplicates_and_blanks() {
        let file = host_file("10.0.0.1\n\n10.0.0.1\n");
        let hosts = load_hosts(Some(file.path()), DEFAULT_HOST).unwrap();
        assert_eq!(hosts, vec!["10.0.0.1", "", "10.0.0.1"]);
    }

    #[test]
    fn test_file_takes_precedence() {
        let file = host_file("10.0.0.7\n");
        let hosts = load_hosts(Some(file.path()), "10.0.0.8").unwrap();
        assert_eq!(hosts, vec!["10.0.0.7"]);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("hosts.txt");
        assert_matches!(
            load_hosts(Some(&missing), DEFAULT_HOST),
            Err(Error::HostFileNotFound { .. })
        );
    }

    #[test]
    fn test_host_flag_split_on_whitespace() {
        assert_eq!(load_hosts(None, DEFAULT_HOST).unwrap(), vec![DEFAULT_HOST]);
        assert_eq!(
            load_hosts(None, "10.0.0.1  10.0.0.2\t10.0.0.3").unwrap(),
            vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]
        );
        assert!(load_hosts(None, "   ").unwrap().is_empty());
    }
}
