use crate::advisor::Advisor;
use crate::db::TransactionsDb;
use crate::taxonomy::Taxonomy;
use crate::telegram::TelegramApi;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub transaction_db: TransactionsDb,
    pub telegram_api: TelegramApi,
    pub advisor: Advisor,
    pub taxonomy: Arc<Taxonomy>,
}
