use super::Db;

use weft_core::{driver::Transaction, Result};

impl Db {
    pub async fn begin(&mut self) -> Result<()> {
        self.transaction(Transaction::Start).await
    }

    pub async fn commit(&mut self) -> Result<()> {
        self.transaction(Transaction::Commit).await
    }

    pub async fn rollback(&mut self) -> Result<()> {
        self.transaction(Transaction::Rollback).await
    }

    async fn transaction(&mut self, op: Transaction) -> Result<()> {
        tracing::debug!(?op, "transaction");
        self.connection.exec(op.into()).await?;
        Ok(())
    }
}
