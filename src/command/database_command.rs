use std::fmt;
use std::ops::Deref;
use std::ops::DerefMut;
use std::sync::Arc;
use std::time::Duration;

use super::Command;
use super::CommandType;
use super::Observers;
use super::script;
use super::script::Statement;
use crate::connection::Connection;
use crate::connection::Database;
use crate::connection::Transaction;
use crate::dynamic::DynamicRow;
use crate::entity::FromRecord;
use crate::error::Error;
use crate::error::Result;
use crate::record::Record;
use crate::value::FromValue;
use crate::value::Value;

enum ConnectionState {
    Pending(Database),
    Open(Connection),
    Released,
}

impl ConnectionState {
    fn describe(&self) -> &'static str {
        match self {
            ConnectionState::Pending(_) => "closed",
            ConnectionState::Open(_) => "open",
            ConnectionState::Released => "released",
        }
    }
}

/// Snapshot of a command logged when execution fails
#[derive(Clone, Debug, PartialEq)]
pub struct CommandDebugInfo {
    pub data_source:      String,
    pub connection_state: &'static str,
    pub timeout:          Option<Duration>,
    pub parameter_count:  usize,
    pub annotated_text:   Option<String>,
}

impl fmt::Display for CommandDebugInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Data source: {}", self.data_source)?;
        writeln!(f, "Connection state: {}", self.connection_state)?;
        match self.timeout {
            Some(timeout) => writeln!(f, "Timeout: {}ms", timeout.as_millis())?,
            None => writeln!(f, "Timeout: none")?,
        }
        writeln!(f, "Parameters: {}", self.parameter_count)?;
        write!(f, "{}", self.annotated_text.as_deref().unwrap_or_default())
    }
}

/// A [`Command`] bound to a connection
///
/// The connection is opened on first execution. Unless an execute call is
/// given `keep_alive = true`, the connection is released and the command
/// cleared afterwards; any later execution fails with
/// [`Error::CommandReleased`].
///
/// ```ignore
/// let mut command = client.command();
/// command.set_text("SELECT * FROM Customer WHERE LastName = @LastName").add_parameter("@LastName", "Kent");
/// let customers: Vec<Customer> = command.execute_to_list(false).await?;
/// ```
pub struct DatabaseCommand {
    command:   Command,
    state:     ConnectionState,
    observers: Arc<Observers>,
}

impl DatabaseCommand {
    /// Connects lazily to `database` on first execution
    pub fn new(database: Database) -> Self {
        Self::with_observers(database, Arc::new(Observers::new()))
    }

    pub fn with_observers(database: Database, observers: Arc<Observers>) -> Self {
        Self { command: Command::new(), state: ConnectionState::Pending(database), observers }
    }

    /// Runs on an already open connection
    pub fn from_connection(connection: Connection) -> Self {
        Self { command: Command::new(), state: ConnectionState::Open(connection), observers: Arc::new(Observers::new()) }
    }

    pub fn observers(&self) -> &Arc<Observers> {
        &self.observers
    }

    /// Runs subsequent executions inside `transaction`
    pub fn set_transaction(&mut self, transaction: &Transaction) -> &mut Self {
        self.state = ConnectionState::Open(transaction.connection().clone());
        self
    }

    pub fn is_released(&self) -> bool {
        matches!(self.state, ConnectionState::Released)
    }

    pub fn debug_info(&self) -> CommandDebugInfo {
        let data_source = match &self.state {
            ConnectionState::Pending(database) => database.path().to_string(),
            ConnectionState::Open(connection) => connection.path().to_string(),
            ConnectionState::Released => String::new(),
        };
        CommandDebugInfo {
            data_source,
            connection_state: self.state.describe(),
            timeout: self.command.timeout(),
            parameter_count: self.command.parameters().len(),
            annotated_text: self.command.annotated_text(),
        }
    }

    /// Runs every statement and returns the total number of affected rows
    ///
    /// Rows echoed by `INSERT ... RETURNING` and friends count as affected.
    pub async fn execute_non_query(&mut self, keep_alive: bool) -> Result<u64> {
        self.run(keep_alive, |_| Ok(true)).await
    }

    /// First column of the first row; database null becomes `None`
    pub async fn execute_scalar(&mut self, keep_alive: bool) -> Result<Option<Value>> {
        let mut scalar: Option<Value> = None;
        let mut seen = false;
        self.run(keep_alive, |record| {
            if !seen {
                seen = true;
                scalar = record.value(0).filter(|v| !matches!(v, Value::Null)).cloned();
            }
            Ok(true)
        })
        .await?;
        Ok(scalar)
    }

    pub async fn execute_scalar_as<T: FromValue>(&mut self, keep_alive: bool) -> Result<T> {
        T::from_value(self.execute_scalar(keep_alive).await?.unwrap_or(Value::Null))
    }

    /// Calls `on_record` for every row of every statement until it returns `false`
    ///
    /// Every statement still runs to completion after a stop.
    pub async fn execute_reader<F>(&mut self, keep_alive: bool, mut on_record: F) -> Result<()>
    where F: FnMut(&Record) -> bool {
        self.run(keep_alive, |record| Ok(on_record(&record))).await.map(|_| ())
    }

    /// Calls `on_record` for the first row only; returns whether a row was read
    pub async fn execute_reader_single<F>(&mut self, keep_alive: bool, mut on_record: F) -> Result<bool>
    where F: FnMut(&Record) {
        let mut found = false;
        self.run(keep_alive, |record| {
            on_record(&record);
            found = true;
            Ok(false)
        })
        .await?;
        Ok(found)
    }

    /// Maps every row into `T`; the first mapping error is returned
    pub async fn execute_to_list<T: FromRecord>(&mut self, keep_alive: bool) -> Result<Vec<T>> {
        let mut items = Vec::new();
        self.run(keep_alive, |record| {
            items.push(T::from_record(&record)?);
            Ok(true)
        })
        .await?;
        Ok(items)
    }

    pub async fn execute_to_object<T: FromRecord>(&mut self, keep_alive: bool) -> Result<Option<T>> {
        let mut item = None;
        self.run(keep_alive, |record| {
            item = Some(T::from_record(&record)?);
            Ok(false)
        })
        .await?;
        Ok(item)
    }

    pub async fn execute_to_dynamic_list(&mut self, keep_alive: bool) -> Result<Vec<DynamicRow>> {
        self.execute_to_list(keep_alive).await
    }

    pub async fn execute_to_dynamic(&mut self, keep_alive: bool) -> Result<Option<DynamicRow>> {
        self.execute_to_object(keep_alive).await
    }

    /// Column names of the first statement that returns rows, without reading any
    pub async fn column_names(&mut self, keep_alive: bool) -> Result<Vec<String>> {
        let outcome = self.column_names_inner().await;
        self.finish(outcome, keep_alive)
    }

    async fn column_names_inner(&mut self) -> Result<Vec<String>> {
        let (connection, statements) = self.begin()?;
        for statement in statements {
            let prepared = connection.prepare(&statement.sql).await?;
            let columns = prepared.columns();
            if !columns.is_empty() {
                return Ok(columns.iter().map(|column| column.name().to_string()).collect());
            }
        }
        Ok(Vec::new())
    }

    async fn run<F>(&mut self, keep_alive: bool, on_record: F) -> Result<u64>
    where F: FnMut(Record) -> Result<bool> {
        let outcome = self.run_inner(on_record).await;
        self.finish(outcome, keep_alive)
    }

    async fn run_inner<F>(&mut self, mut on_record: F) -> Result<u64>
    where F: FnMut(Record) -> Result<bool> {
        let (connection, statements) = self.begin()?;
        let mut affected = 0u64;
        let mut reading = true;

        for statement in statements {
            tracing::debug!("Executing SQL: {}", statement.sql);
            tracing::trace!("Parameters: {:?}", statement.values);

            let mut prepared = connection.prepare(&statement.sql).await?;
            let columns: Arc<[String]> = prepared.columns().iter().map(|column| column.name().to_string()).collect();

            if columns.is_empty() {
                affected += prepared.execute(statement.values).await?;
                continue;
            }

            // rows are drained after a stop so the statement completes
            let writes = statement.writes();
            let mut rows = prepared.query(statement.values).await?;
            let mut drained = 0u64;
            while let Some(row) = rows.next().await? {
                drained += 1;
                if reading && !on_record(Record::from_row(&columns, &row)?)? {
                    reading = false;
                }
            }
            if writes {
                affected += drained;
            }
        }

        Ok(affected)
    }

    /// Validates the command, opens the connection and notifies pre-execute observers
    fn begin(&mut self) -> Result<(Connection, Vec<Statement>)> {
        if self.is_released() {
            tracing::warn!("Execute called on a released command");
            return Err(Error::CommandReleased);
        }
        if self.command.command_type() == CommandType::StoredProcedure {
            return Err(Error::Unsupported("stored procedures are not supported by this engine".to_string()));
        }
        let text = self.command.text().ok_or_else(|| Error::Query("command text has not been set".to_string()))?;
        let statements = script::split(text, self.command.parameters())?;

        let connection = self.open()?;
        self.observers.notify_pre_execute(&self.command);
        Ok((connection, statements))
    }

    fn open(&mut self) -> Result<Connection> {
        let connection = match &self.state {
            ConnectionState::Open(connection) => connection.clone(),
            ConnectionState::Pending(database) => {
                let connection = database.clone().connect()?;
                self.state = ConnectionState::Open(connection.clone());
                connection
            }
            ConnectionState::Released => return Err(Error::CommandReleased),
        };
        if let Some(timeout) = self.command.timeout() {
            connection.busy_timeout(timeout)?;
        }
        Ok(connection)
    }

    fn finish<R>(&mut self, outcome: Result<R>, keep_alive: bool) -> Result<R> {
        match &outcome {
            Ok(_) => self.observers.notify_post_execute(&self.command),
            Err(error) => {
                tracing::error!("Command failed: {}\n{}", error, self.debug_info());
                self.observers.notify_unhandled(error, &self.command);
            }
        }
        if !keep_alive {
            self.release();
        }
        outcome
    }

    fn release(&mut self) {
        if !self.is_released() {
            tracing::debug!("Releasing command connection");
        }
        self.state = ConnectionState::Released;
        self.command = Command::new();
    }
}

impl Deref for DatabaseCommand {
    type Target = Command;

    fn deref(&self) -> &Command {
        &self.command
    }
}

impl DerefMut for DatabaseCommand {
    fn deref_mut(&mut self) -> &mut Command {
        &mut self.command
    }
}

impl fmt::Debug for DatabaseCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseCommand")
            .field("command", &self.command)
            .field("state", &self.state.describe())
            .field("observers", &self.observers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_info_display() {
        let info = CommandDebugInfo {
            data_source:      ":memory:".to_string(),
            connection_state: "open",
            timeout:          Some(Duration::from_millis(1500)),
            parameter_count:  1,
            annotated_text:   Some("SELECT /*@Id=*/'1'".to_string()),
        };
        let display = info.to_string();
        assert!(display.contains("Data source: :memory:"));
        assert!(display.contains("Timeout: 1500ms"));
        assert!(display.contains("Parameters: 1"));
        assert!(display.ends_with("SELECT /*@Id=*/'1'"));
    }
}
