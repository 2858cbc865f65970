//! Thin wrappers over the turso database, connections and transactions

pub(crate) mod builder;
pub(crate) mod database;
pub(crate) mod opts;
pub(crate) mod transaction;

use std::time::Duration;

pub use builder::Builder;
pub use database::Database;
pub use transaction::Transaction;

pub(self) type ConnectionResult<T> = std::result::Result<T, turso::Error>;

#[derive(Debug, Clone)]
pub struct Connection {
    inner: turso::Connection,
    opts:  opts::DatabaseOpts,
}

impl Connection {
    fn new(inner: turso::Connection, opts: opts::DatabaseOpts) -> Self {
        Self { inner, opts }
    }

    pub fn is_mvcc_enabled(&self) -> bool {
        self.opts.enable_mvcc
    }

    pub fn is_encryption_enabled(&self) -> bool {
        self.opts.enable_encryption
    }

    pub fn path(&self) -> &str {
        self.opts.path.as_str()
    }

    pub async fn query(&self, sql: &str, params: impl turso::IntoParams) -> ConnectionResult<turso::Rows> {
        self.inner.query(sql, params).await
    }

    pub async fn execute(&self, sql: &str, params: impl turso::IntoParams) -> ConnectionResult<u64> {
        self.inner.execute(sql, params).await
    }

    pub async fn execute_batch(&self, sql: &str) -> ConnectionResult<()> {
        self.inner.execute_batch(sql).await
    }

    pub async fn prepare(&self, sql: &str) -> ConnectionResult<turso::Statement> {
        self.inner.prepare(sql).await
    }

    pub fn last_insert_rowid(&self) -> i64 {
        self.inner.last_insert_rowid()
    }

    pub fn is_autocommit(&self) -> ConnectionResult<bool> {
        self.inner.is_autocommit()
    }

    pub fn busy_timeout(&self, duration: Duration) -> ConnectionResult<()> {
        self.inner.busy_timeout(duration)
    }

    /// Starts an explicit transaction on this connection
    pub async fn begin(&self) -> ConnectionResult<Transaction> {
        Transaction::begin(self.clone()).await
    }
}
