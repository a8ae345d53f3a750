mod limits;
mod nullability;
mod records;
mod simple;
mod user;

use crate::{
    limits::limits,
    nullability::nullability,
    records::records,
    simple::simple,
    user::users,
};
use keel::Connection;
use log::LevelFilter;
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Run the whole end to end suite against a freshly opened connection.
pub async fn execute_tests<C: Connection>(mut connection: C) {
    simple(&mut connection).await;
    nullability(&mut connection).await;
    limits(&mut connection).await;
    users(&mut connection).await;
    records(&mut connection).await;
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
