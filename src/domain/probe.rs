//! Installation probe
//!
//! Looks for an existing remote debugger in a list of known install
//! directories. The first directory holding the agent executable wins.

use std::path::{Path, PathBuf};

/// Result of probing the known install directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationProbe {
    /// Directories checked, in order
    pub candidates: Vec<PathBuf>,

    /// First directory holding the agent executable
    pub found: Option<PathBuf>,
}

impl InstallationProbe {
    /// Probe `candidates` for `<candidate>/<agent_subdir>/<agent_executable>`
    pub fn run(candidates: Vec<PathBuf>, agent_subdir: &str, agent_executable: &str) -> Self {
        let found = candidates
            .iter()
            .find(|dir| dir.join(agent_subdir).join(agent_executable).is_file())
            .cloned();

        Self { candidates, found }
    }

    pub fn is_found(&self) -> bool {
        self.found.is_some()
    }

    /// Directory the configuration steps use: the existing install, or
    /// `default_dir` where a fresh install lands
    pub fn install_dir(&self, default_dir: &Path) -> PathBuf {
        self.found
            .clone()
            .unwrap_or_else(|| default_dir.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::test_fixtures::{create_temp_dir, fake_install};

    #[test]
    fn test_nothing_installed() {
        let temp = create_temp_dir();
        let candidates = vec![temp.path().join("a"), temp.path().join("b")];

        let probe = InstallationProbe::run(candidates.clone(), "x64", "msvsmon.exe");

        assert!(!probe.is_found());
        assert_eq!(probe.candidates, candidates);
        assert_eq!(probe.install_dir(&candidates[0]), candidates[0]);
    }

    #[test]
    fn test_first_match_wins() {
        let temp = create_temp_dir();
        let candidates = vec![
            temp.path().join("missing"),
            temp.path().join("second"),
            temp.path().join("third"),
        ];
        fake_install(&candidates[1]);
        fake_install(&candidates[2]);

        let probe = InstallationProbe::run(candidates.clone(), "x64", "msvsmon.exe");

        assert_eq!(probe.found.as_ref(), Some(&candidates[1]));
        assert_eq!(probe.install_dir(&candidates[0]), candidates[1]);
    }

    #[test]
    fn test_directory_without_agent_is_not_an_install() {
        let temp = create_temp_dir();
        let dir = temp.path().join("partial");
        std::fs::create_dir_all(dir.join("x64")).unwrap();

        let probe = InstallationProbe::run(vec![dir], "x64", "msvsmon.exe");

        assert!(!probe.is_found());
    }

    #[test]
    fn test_agent_in_wrong_subdir_is_ignored() {
        let temp = create_temp_dir();
        let dir = temp.path().join("arm");
        fake_install(&dir);

        let probe = InstallationProbe::run(vec![dir], "arm64", "msvsmon.exe");

        assert!(!probe.is_found());
    }
}
