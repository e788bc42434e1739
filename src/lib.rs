pub mod advisor;
pub mod app_state;
pub mod command;
pub mod db;
pub mod fmt;
pub mod handlers;
pub mod parser;
pub mod report;
pub mod taxonomy;
pub mod telegram;
pub mod transaction;
