use anyhow::Result;
use async_trait::async_trait;
use magpie_browser::Session;
use magpie_core::{store, VisitedLedger};
use rand::Rng;
use std::path::Path;
use std::time::Duration;

/// Per-profile browser actions for the connect loop.
///
/// Split from the loop so it can run against fake profiles in tests.
#[async_trait]
pub trait ProfileSession {
    /// Navigate to a profile page.
    async fn open_profile(&self, url: &str) -> Result<()>;

    /// Try to send a connection request on the currently open profile.
    /// Returns whether an invite button was found and clicked.
    async fn send_invite(&self) -> Result<bool>;
}

#[async_trait]
impl ProfileSession for Session {
    async fn open_profile(&self, url: &str) -> Result<()> {
        Ok(self.goto(url).await?)
    }

    async fn send_invite(&self) -> Result<bool> {
        Ok(self.click_first_button_containing("connect").await?)
    }
}

/// Courtesy delay between profile visits.
pub struct Pacing {
    min_secs: u64,
    max_secs: u64,
}

impl Pacing {
    /// The 1-2 second rate-limiting pause used against the live site.
    pub fn courtesy() -> Self {
        Self {
            min_secs: 1,
            max_secs: 2,
        }
    }

    /// No delay at all; for tests.
    pub fn none() -> Self {
        Self {
            min_secs: 0,
            max_secs: 0,
        }
    }

    async fn wait(&self) {
        if self.max_secs == 0 {
            return;
        }
        let secs = rand::thread_rng().gen_range(self.min_secs..=self.max_secs);
        tokio::time::sleep(Duration::from_secs(secs)).await;
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::courtesy()
    }
}

/// Walk the candidate list and send connection requests.
///
/// Profiles already in the ledger are skipped without a visit. Everyone else
/// is marked visited before the invite attempt, so a profile with a broken
/// invite button is never retried on a later run. Invite failures are logged
/// and the loop moves on; navigation failures abort the run. Returns the
/// number of profiles that got an invitation.
pub async fn execute<S>(
    session: &S,
    candidates_file: &Path,
    ledger: &VisitedLedger,
    pacing: Pacing,
) -> Result<usize>
where
    S: ProfileSession + Sync,
{
    let candidates = store::read_url_lines(candidates_file)?;
    let total = candidates.len();
    let mut connected = 0;

    for (index, url) in candidates.iter().enumerate() {
        pacing.wait().await;
        println!("[{}/{}] Connecting with {url}", index + 1, total);

        if ledger.is_visited(url)? {
            println!("{url} has been already visited.");
            continue;
        }

        session.open_profile(url).await?;
        ledger.mark_visited(url)?;

        match session.send_invite().await {
            Ok(true) => {
                println!("The invitation has been sent");
                connected += 1;
            }
            Ok(false) => {
                tracing::debug!("No invite button on {url}");
            }
            Err(e) => {
                println!("Couldn't send the invitation: {e}");
            }
        }
    }

    println!("The crawler has successfully connected with {connected} out of {total} persons");
    Ok(connected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    struct FakeProfiles {
        connectable: HashSet<String>,
        broken: HashSet<String>,
        opened: Mutex<Vec<String>>,
        current: Mutex<Option<String>>,
    }

    impl FakeProfiles {
        fn new(connectable: &[&str]) -> Self {
            Self {
                connectable: connectable.iter().map(|s| s.to_string()).collect(),
                broken: HashSet::new(),
                opened: Mutex::new(Vec::new()),
                current: Mutex::new(None),
            }
        }

        fn with_broken(mut self, broken: &[&str]) -> Self {
            self.broken = broken.iter().map(|s| s.to_string()).collect();
            self
        }

        fn opened(&self) -> Vec<String> {
            self.opened.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProfileSession for FakeProfiles {
        async fn open_profile(&self, url: &str) -> Result<()> {
            self.opened.lock().unwrap().push(url.to_string());
            *self.current.lock().unwrap() = Some(url.to_string());
            Ok(())
        }

        async fn send_invite(&self) -> Result<bool> {
            let current = self.current.lock().unwrap().clone().unwrap();
            if self.broken.contains(&current) {
                anyhow::bail!("node is detached from document");
            }
            Ok(self.connectable.contains(&current))
        }
    }

    fn candidates_file(dir: &tempfile::TempDir, urls: &[&str]) -> std::path::PathBuf {
        let path = dir.path().join("people.txt");
        std::fs::write(&path, urls.join("\n")).unwrap();
        path
    }

    #[tokio::test]
    async fn test_connects_where_a_button_exists_and_marks_everyone_visited() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = candidates_file(
            &dir,
            &[
                "https://site/in/alice",
                "https://site/in/bob",
                "https://site/in/carol",
            ],
        );
        let ledger = VisitedLedger::new(dir.path().join("visited.txt"));

        let session =
            FakeProfiles::new(&["https://site/in/alice", "https://site/in/carol"]);

        let connected = execute(&session, &candidates, &ledger, Pacing::none())
            .await
            .unwrap();

        assert_eq!(connected, 2);
        assert!(ledger.is_visited("https://site/in/alice").unwrap());
        assert!(ledger.is_visited("https://site/in/bob").unwrap());
        assert!(ledger.is_visited("https://site/in/carol").unwrap());
    }

    #[tokio::test]
    async fn test_visited_profiles_are_skipped_without_a_visit() {
        let dir = tempfile::tempdir().unwrap();
        let candidates =
            candidates_file(&dir, &["https://site/in/alice", "https://site/in/bob"]);

        let ledger = VisitedLedger::new(dir.path().join("visited.txt"));
        ledger.mark_visited("https://site/in/alice").unwrap();

        let session = FakeProfiles::new(&["https://site/in/alice", "https://site/in/bob"]);

        let connected = execute(&session, &candidates, &ledger, Pacing::none())
            .await
            .unwrap();

        assert_eq!(connected, 1);
        assert_eq!(session.opened(), vec!["https://site/in/bob"]);
    }

    #[tokio::test]
    async fn test_invite_failure_is_contained_to_that_profile() {
        let dir = tempfile::tempdir().unwrap();
        let candidates =
            candidates_file(&dir, &["https://site/in/alice", "https://site/in/bob"]);
        let ledger = VisitedLedger::new(dir.path().join("visited.txt"));

        let session = FakeProfiles::new(&["https://site/in/bob"])
            .with_broken(&["https://site/in/alice"]);

        let connected = execute(&session, &candidates, &ledger, Pacing::none())
            .await
            .unwrap();

        // The broken profile still counts as visited, and the loop went on.
        assert_eq!(connected, 1);
        assert!(ledger.is_visited("https://site/in/alice").unwrap());
        assert_eq!(
            session.opened(),
            vec!["https://site/in/alice", "https://site/in/bob"]
        );
    }

    #[tokio::test]
    async fn test_empty_candidate_list_reports_zero() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = candidates_file(&dir, &[]);
        let ledger = VisitedLedger::new(dir.path().join("visited.txt"));

        let session = FakeProfiles::new(&[]);

        let connected = execute(&session, &candidates, &ledger, Pacing::none())
            .await
            .unwrap();

        assert_eq!(connected, 0);
    }
}
