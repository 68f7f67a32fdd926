//! Installer download
//!
//! The body is streamed into a temporary file next to the destination and
//! only moved into place once complete, so an interrupted download never
//! leaves a truncated installer at the path the next run checks.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{ProvisionError, Result};
use crate::ui::{InteractiveProgressReporter, ProgressReporter, Reporter, SilentProgressReporter};

const USER_AGENT: &str = concat!("rdbg-provision/", env!("CARGO_PKG_VERSION"));
const BUFFER_SIZE: usize = 64 * 1024;

/// Capability to fetch a URL into a local file
pub trait Downloader {
    /// Download `url` to `destination`, returning the number of bytes written
    fn download(&self, url: &str, destination: &Path) -> Result<u64>;
}

/// HTTP(S) downloader
pub struct HttpDownloader {
    agent: ureq::Agent,
    show_progress: bool,
}

impl HttpDownloader {
    pub fn new(show_progress: bool) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build(),
            show_progress,
        }
    }

    fn fetch(
        &self,
        url: &str,
        destination: &Path,
        progress: &mut dyn ProgressReporter,
    ) -> std::result::Result<u64, String> {
        let response = self.agent.get(url).call().map_err(|e| e.to_string())?;
        let total = response
            .header("Content-Length")
            .and_then(|v| v.trim().parse::<u64>().ok());
        log::debug!(
            "{url} answered {} ({} bytes announced)",
            response.status(),
            total.map_or_else(|| "no length".to_string(), |t| t.to_string())
        );

        let dir = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| format!("cannot create {}: {e}", dir.display()))?;
        let mut partial = NamedTempFile::new_in(dir)
            .map_err(|e| format!("cannot create a file in {}: {e}", dir.display()))?;

        let label = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        progress.start(&label, total);

        let mut reader = response.into_reader();
        let mut buffer = vec![0u8; BUFFER_SIZE];
        let mut written: u64 = 0;
        loop {
            let n = reader
                .read(&mut buffer)
                .map_err(|e| format!("read failed after {written} bytes: {e}"))?;
            if n == 0 {
                break;
            }
            partial
                .write_all(&buffer[..n])
                .map_err(|e| format!("write failed: {e}"))?;
            written += n as u64;
            progress.advance(n as u64);
        }

        match total {
            Some(expected) if expected != written => {
                return Err(format!(
                    "connection closed after {written} of {expected} bytes"
                ));
            }
            _ => {}
        }

        partial
            .as_file()
            .sync_all()
            .map_err(|e| format!("flush failed: {e}"))?;
        partial
            .persist(destination)
            .map_err(|e| format!("cannot move download to {}: {}", destination.display(), e.error))?;

        Ok(written)
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        let mut progress: Box<dyn ProgressReporter> = if self.show_progress {
            Box::new(InteractiveProgressReporter::new())
        } else {
            Box::new(SilentProgressReporter)
        };

        match self.fetch(url, destination, progress.as_mut()) {
            Ok(size) => {
                progress.finish();
                Ok(size)
            }
            Err(reason) => {
                progress.abandon();
                Err(ProvisionError::DownloadFailed {
                    url: url.to_string(),
                    reason,
                })
            }
        }
    }
}

/// Downloader for dry runs: reports the download and writes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunDownloader {
    reporter: Reporter,
}

impl DryRunDownloader {
    pub fn new(reporter: Reporter) -> Self {
        Self { reporter }
    }
}

impl Downloader for DryRunDownloader {
    fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        self.reporter
            .would(&format!("download {url} to {}", destination.display()));
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::test_fixtures::{create_temp_dir, serve_once};

    #[test]
    fn test_download_writes_body() {
        let temp = create_temp_dir();
        let destination = temp.path().join("RemoteTools.amd64ret.enu.exe");
        let url = serve_once("200 OK", b"MZ installer bytes".to_vec());

        let size = HttpDownloader::new(false)
            .download(&url, &destination)
            .unwrap();

        assert_eq!(size, 18);
        assert_eq!(fs::read(&destination).unwrap(), b"MZ installer bytes");
    }

    #[test]
    fn test_download_creates_missing_directory() {
        let temp = create_temp_dir();
        let destination = temp.path().join("nested").join("setup.exe");
        let url = serve_once("200 OK", b"MZ".to_vec());

        HttpDownloader::new(false)
            .download(&url, &destination)
            .unwrap();

        assert!(destination.is_file());
    }

    #[test]
    fn test_http_error_is_download_failure() {
        let temp = create_temp_dir();
        let destination = temp.path().join("setup.exe");
        let url = serve_once("404 Not Found", b"missing".to_vec());

        let err = HttpDownloader::new(false)
            .download(&url, &destination)
            .unwrap_err();

        assert!(matches!(err, ProvisionError::DownloadFailed { .. }));
        assert!(!destination.exists());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_unreachable_host_is_download_failure() {
        let temp = create_temp_dir();
        let destination = temp.path().join("setup.exe");

        // Port 9 (discard) on loopback is closed on test machines
        let err = HttpDownloader::new(false)
            .download("http://127.0.0.1:9/setup.exe", &destination)
            .unwrap_err();

        match err {
            ProvisionError::DownloadFailed { url, .. } => {
                assert_eq!(url, "http://127.0.0.1:9/setup.exe");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!destination.exists());
    }

    #[test]
    fn test_dry_run_downloader_writes_nothing() {
        let temp = create_temp_dir();
        let destination = temp.path().join("setup.exe");

        let size = DryRunDownloader::new(Reporter::new(true))
            .download("https://aka.ms/vs/17/release/RemoteTools.x86ret.enu.exe", &destination)
            .unwrap();

        assert_eq!(size, 0);
        assert!(!destination.exists());
    }
}
