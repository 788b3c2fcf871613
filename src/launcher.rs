use std::sync::Arc;
use std::thread;

use tracing::{error, info};
use url::Url;

use crate::error::{LilError, Result};
use crate::menu::IssueLink;

pub trait UrlOpener: Send + Sync + 'static {
    fn open(&self, url: &Url) -> std::io::Result<()>;
}

/// Hands the URL to the OS default handler.
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &Url) -> std::io::Result<()> {
        open::that(url.as_str())
    }
}

pub struct Launcher {
    opener: Arc<dyn UrlOpener>,
}

impl Launcher {
    pub fn new(opener: impl UrlOpener) -> Self {
        Self {
            opener: Arc::new(opener),
        }
    }

    /// Open an issue without blocking the caller. Failures are only logged.
    pub fn activate(&self, link: &IssueLink) {
        info!(issue = %link.identifier, id = %link.issue_id, "clicked issue");

        let url = match parse_issue_url(&link.url) {
            Ok(url) => url,
            Err(err) => {
                error!(issue = %link.identifier, %err, "could not open issue");
                return;
            }
        };

        let opener = Arc::clone(&self.opener);
        let identifier = link.identifier.clone();
        let spawned = thread::Builder::new()
            .name("lil-open".to_string())
            .spawn(move || {
                if let Err(err) = opener.open(&url) {
                    error!(issue = %identifier, %url, %err, "failed to open URL");
                }
            });
        if let Err(err) = spawned {
            error!(%err, "failed to spawn URL opener");
        }
    }
}

pub fn parse_issue_url(raw: &str) -> Result<Url> {
    Url::parse(raw)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .ok_or_else(|| LilError::InvalidUrl(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::{self, Sender};
    use std::sync::Mutex;
    use std::time::Duration;

    use rstest::rstest;

    struct RecordingOpener {
        tx: Mutex<Sender<String>>,
    }

    impl UrlOpener for RecordingOpener {
        fn open(&self, url: &Url) -> std::io::Result<()> {
            if let Ok(tx) = self.tx.lock() {
                let _ = tx.send(url.to_string());
            }
            Ok(())
        }
    }

    fn link(url: &str) -> IssueLink {
        IssueLink {
            issue_id: "i1".to_string(),
            identifier: "ENG-1".to_string(),
            url: url.to_string(),
        }
    }

    #[rstest]
    #[case::https("https://linear.app/acme/issue/ENG-1", true)]
    #[case::http("http://localhost:3000/issue/ENG-1", true)]
    #[case::empty("", false)]
    #[case::relative("/issue/ENG-1", false)]
    #[case::file_scheme("file:///etc/passwd", false)]
    fn test_parse_issue_url(#[case] raw: &str, #[case] valid: bool) {
        assert_eq!(parse_issue_url(raw).is_ok(), valid);
    }

    #[test]
    fn test_activate_opens_off_thread() {
        let (tx, rx) = mpsc::channel();
        let launcher = Launcher::new(RecordingOpener { tx: Mutex::new(tx) });

        launcher.activate(&link("https://linear.app/acme/issue/ENG-1"));

        let opened = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(opened, "https://linear.app/acme/issue/ENG-1");
    }

    #[test]
    fn test_activate_skips_invalid_url() {
        let (tx, rx) = mpsc::channel();
        let launcher = Launcher::new(RecordingOpener { tx: Mutex::new(tx) });

        launcher.activate(&link("not a url"));

        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }
}
