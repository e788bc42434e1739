mod row_db;

pub use row_db::*;

use crate::transaction::Transaction;
use tracing::info;

pub type TransactionsDb = RowFileDb<Transaction>;

impl TransactionsDb {
    pub fn new_transactions_db() -> Result<Self, Box<dyn std::error::Error>> {
        let path =
            dotenv::var("TRANSACTIONS_DB_PATH").unwrap_or_else(|_| "db/transactions.json".to_string());
        let res = RowFileDb::<Transaction>::new(path);
        info!("Transactions DB initialized.");
        res
    }
}
