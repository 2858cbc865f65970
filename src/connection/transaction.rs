use super::Connection;
use super::ConnectionResult;

/// An explicit `BEGIN` .. `COMMIT` scope on one connection
///
/// Commands join it through [`DatabaseCommand::set_transaction`](crate::DatabaseCommand::set_transaction).
/// Dropping an unfinished transaction leaves it open on the connection.
#[derive(Debug)]
pub struct Transaction {
    connection: Connection,
    finished:   bool,
}

impl Transaction {
    pub(super) async fn begin(connection: Connection) -> ConnectionResult<Self> {
        connection.execute_batch("BEGIN").await?;
        tracing::debug!(path = connection.path(), "Transaction started");
        Ok(Self { connection, finished: false })
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub async fn commit(mut self) -> ConnectionResult<()> {
        self.finished = true;
        self.connection.execute_batch("COMMIT").await?;
        tracing::debug!("Transaction committed");
        Ok(())
    }

    pub async fn rollback(mut self) -> ConnectionResult<()> {
        self.finished = true;
        self.connection.execute_batch("ROLLBACK").await?;
        tracing::debug!("Transaction rolled back");
        Ok(())
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!(path = self.connection.path(), "Transaction dropped without commit or rollback");
        }
    }
}
