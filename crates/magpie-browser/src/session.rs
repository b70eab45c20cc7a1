use crate::{chrome, Error, Result, ScratchProfile};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;

/// How long lazy-loaded results get to render after the scroll nudge.
const RENDER_SETTLE: Duration = Duration::from_millis(1500);

const LOGIN_URL: &str = "https://www.linkedin.com/login";

/// Options controlling how the Chrome session is launched.
pub struct LaunchOptions {
    /// Explicit Chrome binary; discovered automatically when absent.
    pub chrome_path: Option<PathBuf>,
    /// Run without a visible window. Headful is the default.
    pub headless: bool,
}

/// A live browser session: the Chrome process, its CDP handler task, and the
/// single page all navigation goes through.
///
/// The session is the one shared resource in the program and is owned
/// exclusively by the crawl and connect flows for the process lifetime.
pub struct Session {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    _profile: ScratchProfile,
}

impl Session {
    /// Launch Chrome on a scratch profile and open a blank page.
    pub async fn launch(options: LaunchOptions) -> Result<Self> {
        let chrome_binary = chrome::find_chrome(options.chrome_path.as_deref())?;
        tracing::debug!("Using Chrome at {}", chrome_binary.display());

        let profile = ScratchProfile::create()?;

        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome_binary)
            .user_data_dir(profile.path())
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-blink-features=AutomationControlled");
        if !options.headless {
            builder = builder.with_head();
        }
        let config = builder
            .build()
            .map_err(|e| Error::Browser(format!("Failed to configure Chrome: {e}")))?;

        let (browser, mut handler) = Browser::launch(config).await?;

        // The handler loop must keep draining CDP messages or every page
        // command would stall.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {e}");
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        tracing::debug!("Chrome session ready");

        Ok(Self {
            browser,
            page,
            handler_task,
            _profile: profile,
        })
    }

    /// Navigate the session's page and wait for the navigation to finish.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    /// Scroll to the bottom of the page to trigger lazy-loaded content, then
    /// give the page a moment to render it.
    pub async fn scroll_to_bottom(&self) -> Result<()> {
        let result = self
            .page
            .evaluate("window.scrollTo(0, 1000000); document.body.scrollHeight")
            .await?;
        let height: i64 = result.into_value().unwrap_or_default();
        tracing::debug!("Scrolled to page bottom (height {height})");

        tokio::time::sleep(RENDER_SETTLE).await;
        Ok(())
    }

    /// Snapshot of the rendered HTML.
    pub async fn rendered_html(&self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    /// Sign in through the site's login form.
    ///
    /// Types the credentials into the form fields, submits, and waits for the
    /// post-login navigation. Any failure is fatal to the run.
    pub async fn login(&self, login: &str, password: &str) -> Result<()> {
        self.goto(LOGIN_URL).await?;

        let username_field = self.page.find_element("input#username").await?;
        username_field.click().await?;
        username_field.type_str(login).await?;

        let password_field = self.page.find_element("input#password").await?;
        password_field.click().await?;
        password_field.type_str(password).await?;

        self.page
            .find_element("button[type='submit']")
            .await?
            .click()
            .await?;
        self.page.wait_for_navigation().await?;

        tracing::debug!("Login form submitted as {login}");
        Ok(())
    }

    /// Click the first button on the page whose visible text contains
    /// `needle`, case-insensitively. Returns whether a button was clicked.
    pub async fn click_first_button_containing(&self, needle: &str) -> Result<bool> {
        let needle = needle.to_lowercase();

        let buttons = self.page.find_elements("button").await?;
        for button in buttons {
            let text = button.inner_text().await?.unwrap_or_default();
            if text.to_lowercase().contains(&needle) {
                button.click().await?;
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Shut down Chrome and the CDP handler task.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!("Browser close failed: {e}");
        }
        let _ = self.browser.wait().await;
        self.handler_task.abort();
    }
}

// Note: session behavior requires a running Chrome instance and is exercised
// through the crawl and connect flows; chrome discovery and the scratch
// profile carry the unit coverage for this crate.
