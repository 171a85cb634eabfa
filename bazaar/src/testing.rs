use crate::commands::{parse_line, Console, Response};
use crate::display;
use crate::testers::Outcome;
use bazaar_api::{Client, CredentialKey, CredentialStore, MemoryCredentialStore};
use std::sync::Arc;

/// Console wired to an in-memory credential store, for driving commands in
/// tests without touching the real session file.
pub struct TestConsole {
    console: Console,
    store: Arc<MemoryCredentialStore>,
}

impl TestConsole {
    /// Create a console talking to `base_url` with no stored session
    pub fn new(base_url: &str) -> Self {
        let store = Arc::new(MemoryCredentialStore::new());
        let client = Client::new(base_url, store.clone())
            .unwrap_or_else(|e| panic!("failed to build client: {}", e));

        Self {
            console: Console::new(Arc::new(client)),
            store,
        }
    }

    /// Create a console that is already signed in
    pub fn signed_in(base_url: &str, access: &str, refresh: &str, user_id: &str) -> Self {
        let console = Self::new(base_url);
        console.store.set(CredentialKey::AccessToken, access);
        console.store.set(CredentialKey::RefreshToken, refresh);
        console.store.set(CredentialKey::UserId, user_id);
        console
    }

    pub fn store(&self) -> &MemoryCredentialStore {
        &self.store
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    /// Parse and execute one line, panicking on parse errors
    pub async fn execute(&mut self, line: &str) -> Response {
        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => panic!("line '{}' contains no command", line),
            Err(e) => panic!("failed to parse '{}': {}", line, e),
        };
        self.console.execute(command).await
    }

    /// Execute a line that must produce an outcome
    pub async fn outcome(&mut self, line: &str) -> Outcome {
        match self.execute(line).await {
            Response::Outcome(outcome) => outcome,
            other => panic!("expected an outcome from '{}', got {:?}", line, other),
        }
    }

    /// Execute a line and render it as the console would print it
    pub async fn render(&mut self, line: &str) -> String {
        let response = self.execute(line).await;
        display::render(&response)
    }

    /// Assert the notification title of an outcome
    pub fn assert_notified(outcome: &Outcome, title: &str) {
        let actual = outcome.notification.as_ref().map(|n| n.title.as_str());
        assert_eq!(
            actual,
            Some(title),
            "Expected notification '{}', got {:?}",
            title,
            outcome.notification
        );
    }
}
