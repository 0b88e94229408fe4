use empire_core::{Error, Result};

/// SQL for nested transactions. The outermost level uses `BEGIN`, inner
/// levels use savepoints.
///
/// The SQL is produced first and the depth only moves once the statement
/// succeeded, through [`started`](Self::started) and [`ended`](Self::ended).
#[derive(Debug, Default)]
pub(crate) struct TransactionManager {
    depth: usize,
}

impl TransactionManager {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `BEGIN` or `SAVEPOINT sp_N`.
    pub(crate) fn start_sql(&self) -> String {
        match self.depth {
            0 => "BEGIN".to_string(),
            depth => format!("SAVEPOINT sp_{depth}"),
        }
    }

    pub(crate) fn commit_sql(&self) -> Result<String> {
        Ok(match self.innermost()? {
            0 => "COMMIT".to_string(),
            depth => format!("RELEASE SAVEPOINT sp_{depth}"),
        })
    }

    pub(crate) fn rollback_sql(&self) -> Result<String> {
        Ok(match self.innermost()? {
            0 => "ROLLBACK".to_string(),
            depth => format!("ROLLBACK TO SAVEPOINT sp_{depth}"),
        })
    }

    pub(crate) fn started(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn ended(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Forgets all levels, after the database ended the transaction on
    /// its own.
    pub(crate) fn reset(&mut self) {
        self.depth = 0;
    }

    fn innermost(&self) -> Result<usize> {
        match self.depth {
            0 => Err(Error::object_not_valid("no transaction is active")),
            depth => Ok(depth - 1),
        }
    }
}
