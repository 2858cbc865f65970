#[derive(Clone)]
pub struct Database {
    db:   turso::Database,
    opts: super::opts::DatabaseOpts,
}

impl Database {
    pub(super) fn new(db: turso::Database, opts: super::opts::DatabaseOpts) -> Self {
        Self { db, opts }
    }

    pub fn path(&self) -> &str {
        self.opts.path.as_str()
    }

    pub fn connect(self) -> super::ConnectionResult<super::Connection> {
        let conn = self.db.connect()?;
        if let Some(timeout) = self.opts.busy_timeout {
            conn.busy_timeout(timeout)?;
        }
        Ok(super::Connection::new(conn, self.opts))
    }
}
