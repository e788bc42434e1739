mod webhook_handlers;

pub use self::webhook_handlers::*;
