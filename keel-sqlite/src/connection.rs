use crate::{
    Handle, error_message_from_ptr,
    extract::{bind_value, extract_name, extract_value},
};
use async_stream::try_stream;
use keel_core::{
    Connection, Context, Error, Executor, Field, Query, QueryResult, Record, Result,
    RowsAffected, stream::Stream, truncate_long,
};
use libsqlite3_sys::{
    SQLITE_BUSY, SQLITE_DONE, SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE,
    SQLITE_OPEN_URI, SQLITE_ROW, sqlite3, sqlite3_changes64, sqlite3_close, sqlite3_column_count,
    sqlite3_errmsg, sqlite3_finalize, sqlite3_last_insert_rowid, sqlite3_open_v2,
    sqlite3_prepare_v2, sqlite3_step, sqlite3_stmt,
};
use std::{
    ffi::{CString, c_char, c_int},
    ptr,
    sync::{Arc, Mutex},
};
use tokio::task::spawn_blocking;

/// A single SQLite database handle.
///
/// Statements run on the blocking thread pool, one at a time.
pub struct SqliteConnection {
    pub(crate) connection: Arc<Mutex<Handle<sqlite3>>>,
}

impl SqliteConnection {
    pub const PREFIX: &'static str = "sqlite://";
}

fn connection_error(connection: *mut sqlite3) -> Error {
    unsafe { Error::msg(error_message_from_ptr(sqlite3_errmsg(connection)).to_string()) }
}

unsafe fn finalize(statement: *mut sqlite3_stmt) {
    unsafe { sqlite3_finalize(statement) };
}

unsafe fn close(connection: *mut sqlite3) {
    unsafe { sqlite3_close(connection) };
}

/// Prepare, bind and step one statement to completion.
unsafe fn run_statement(connection: *mut sqlite3, query: &Query) -> Result<Vec<QueryResult>> {
    let sql = query.sql.as_str();
    let context = || format!("While running the query:\n{}", truncate_long(sql));
    unsafe {
        let mut statement = Handle::<sqlite3_stmt>::empty(finalize);
        let start = sql.as_ptr() as *const c_char;
        let mut tail = ptr::null();
        let rc = sqlite3_prepare_v2(
            connection,
            start,
            sql.len() as c_int,
            statement.out_ptr(),
            &mut tail,
        );
        if rc != SQLITE_OK {
            return Err(connection_error(connection)).with_context(context);
        }
        let consumed = if tail.is_null() {
            sql.len()
        } else {
            tail.offset_from(start) as usize
        };
        if !sql.get(consumed..).unwrap_or_default().trim().is_empty() {
            return Err(Error::msg("Cannot run more than one statement at a time"))
                .with_context(context);
        }
        if statement.is_null() {
            // Only whitespace or comments
            return Ok(Vec::new());
        }
        for (i, value) in query.params.iter().enumerate() {
            bind_value(statement.as_ptr(), i as c_int + 1, value)?;
        }
        let count = sqlite3_column_count(statement.as_ptr());
        let labels = (0..count)
            .map(|i| extract_name(statement.as_ptr(), i))
            .collect::<Result<Arc<[_]>>>()?;
        let mut result = Vec::new();
        loop {
            match sqlite3_step(statement.as_ptr()) {
                SQLITE_BUSY => continue,
                SQLITE_DONE => break,
                SQLITE_ROW => {
                    let fields = (0..count)
                        .map(|i| extract_value(statement.as_ptr(), i).map(Field::new))
                        .collect::<Result<Box<[_]>>>()?;
                    result.push(QueryResult::Row(Record::new(labels.clone(), fields)));
                }
                _ => return Err(connection_error(connection)).with_context(context),
            }
        }
        if count == 0 {
            let inserted = sql
                .trim_start()
                .get(..6)
                .is_some_and(|v| v.eq_ignore_ascii_case("insert"));
            result.push(QueryResult::Affected(RowsAffected {
                rows_affected: sqlite3_changes64(connection) as u64,
                last_affected_id: inserted.then(|| sqlite3_last_insert_rowid(connection)),
            }));
        }
        Ok(result)
    }
}

impl Executor for SqliteConnection {
    fn run(&mut self, query: Query) -> impl Stream<Item = Result<QueryResult>> + Send {
        let connection = self.connection.clone();
        try_stream! {
            log::debug!("{}", query);
            let result = spawn_blocking(move || {
                let connection = connection
                    .lock()
                    .map_err(|_| Error::msg("The sqlite connection is poisoned"))?;
                unsafe { run_statement(connection.as_ptr(), &query) }
            })
            .await?
            .inspect_err(|e| log::error!("{:#}", e))?;
            for item in result {
                yield item;
            }
        }
    }
}

impl Connection for SqliteConnection {
    /// Open `sqlite://<path>[?mode=..]`, `sqlite://:memory:` for a private in memory database.
    async fn connect(url: &str) -> Result<SqliteConnection> {
        let Some(location) = url.strip_prefix(Self::PREFIX) else {
            return Err(Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                Self::PREFIX
            )));
        };
        let context = || format!("Error while decoding connection URL: `{}`", url);
        let location = CString::new(format!("file:{}", location)).with_context(context)?;
        let mut connection = Handle::<sqlite3>::empty(close);
        let rc = unsafe {
            sqlite3_open_v2(
                location.as_ptr(),
                connection.out_ptr(),
                SQLITE_OPEN_URI | SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE,
                ptr::null(),
            )
        };
        if rc != SQLITE_OK {
            let error = connection_error(connection.as_ptr())
                .context(format!("Could not open the sqlite database `{}`", url));
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }
}
