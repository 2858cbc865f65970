use std::sync::Arc;
use std::time::Duration;

use crate::command::DatabaseCommand;
use crate::command::Observers;
use crate::connection::Connection;
use crate::connection::Database;
use crate::connection::Transaction;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOptions {
    /// Timeout given to every command created by the client
    pub default_timeout: Option<Duration>,
}

impl ClientOptions {
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }
}

/// Entry point that hands out commands sharing one database and one set of observers
///
/// ```ignore
/// let database = Builder::in_memory().build().await?;
/// let client = Client::new(database);
/// client.observers().on_post_execute(|command| println!("{:?}", command.text()));
///
/// let mut command = client.command_with_text("SELECT COUNT(*) FROM Customer");
/// let count: i64 = command.execute_scalar_as(false).await?;
/// ```
#[derive(Clone)]
pub struct Client {
    database:  Database,
    observers: Arc<Observers>,
    options:   ClientOptions,
}

impl Client {
    pub fn new(database: Database) -> Self {
        Self::with_options(database, ClientOptions::default())
    }

    pub fn with_options(database: Database, options: ClientOptions) -> Self {
        Self { database, observers: Arc::new(Observers::new()), options }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn observers(&self) -> &Observers {
        &self.observers
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// A command that connects on first execution
    pub fn command(&self) -> DatabaseCommand {
        let mut command = DatabaseCommand::with_observers(self.database.clone(), self.observers.clone());
        if let Some(timeout) = self.options.default_timeout {
            command.set_timeout(timeout);
        }
        command
    }

    pub fn command_with_text(&self, text: impl Into<String>) -> DatabaseCommand {
        let mut command = self.command();
        command.set_text(text);
        command
    }

    pub fn connect(&self) -> Result<Connection> {
        Ok(self.database.clone().connect()?)
    }

    /// Opens a new connection and starts a transaction on it
    pub async fn begin(&self) -> Result<Transaction> {
        Ok(self.connect()?.begin().await?)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("path", &self.database.path())
            .field("observers", &self.observers)
            .field("options", &self.options)
            .finish()
    }
}
