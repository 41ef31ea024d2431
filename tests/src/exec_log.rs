use crate::logging_driver::DriverOp;
use std::sync::{Arc, Mutex};
use weft_core::driver::{Operation, Transaction};

/// A wrapper around the operations log that provides a clean API for tests
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    /// Get the number of logged operations
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// SQL text of every logged statement, oldest first
    pub fn sql(&self) -> Vec<String> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter_map(|op| op.operation.as_query_sql())
            .map(|op| op.sql.clone())
            .collect()
    }

    /// SQL text of the most recent statement
    pub fn last_sql(&self) -> String {
        self.sql().pop().expect("no SQL was executed")
    }

    /// Number of statements whose SQL starts with `prefix`
    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.sql()
            .iter()
            .filter(|sql| sql.starts_with(prefix))
            .count()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter_map(|op| match op.operation {
                Operation::Transaction(op) => Some(op),
                _ => None,
            })
            .collect()
    }

    /// Clear the log
    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }
}
