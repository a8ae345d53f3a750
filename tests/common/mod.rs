#![allow(dead_code)]

use keel::{
    Error, Executor, Query, QueryResult, Record, Result, RowsAffected,
    stream::{self, Stream},
};
use std::collections::VecDeque;

/// Executor double: records every query it receives and replays scripted results in order.
///
/// A query without a scripted response produces an empty result.
#[derive(Default)]
pub struct MockExecutor {
    pub queries: Vec<Query>,
    responses: VecDeque<Result<Vec<QueryResult>>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_rows(&mut self, rows: impl IntoIterator<Item = Record>) -> &mut Self {
        self.responses
            .push_back(Ok(rows.into_iter().map(QueryResult::Row).collect()));
        self
    }

    pub fn expect_affected(&mut self, rows_affected: u64, last_affected_id: Option<i64>) -> &mut Self {
        self.responses
            .push_back(Ok(vec![QueryResult::Affected(RowsAffected {
                rows_affected,
                last_affected_id,
            })]));
        self
    }

    pub fn expect_error(&mut self, message: &'static str) -> &mut Self {
        self.responses.push_back(Err(Error::msg(message)));
        self
    }

    pub fn sql(&self) -> Vec<&str> {
        self.queries.iter().map(|v| v.sql.as_str()).collect()
    }
}

impl Executor for MockExecutor {
    fn run(&mut self, query: Query) -> impl Stream<Item = Result<QueryResult>> + Send {
        self.queries.push(query);
        let items = match self.responses.pop_front().unwrap_or_else(|| Ok(Vec::new())) {
            Ok(v) => v.into_iter().map(Ok).collect(),
            Err(e) => vec![Err(e)],
        };
        stream::iter(items)
    }
}
