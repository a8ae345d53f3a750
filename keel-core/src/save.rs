use crate::{
    Entity, Executor, GenericStatementWriter, Result, RowsAffected, StatementError,
    StatementWriter, Value,
};
use std::future::Future;

/// Persist `entity` with a single statement.
///
/// A zero `primary_key` (per its own type, typed NULL included) means the row
/// does not exist yet and an INSERT is issued, anything else issues an UPDATE
/// on that key. The untyped `Value::Null` carries no type to test and is
/// rejected. The statement is built before anything is sent, so a
/// configuration error never reaches the executor.
pub fn save<E: Entity, Exec: Executor>(
    executor: &mut Exec,
    entity: &E,
    primary_key: impl Into<Value>,
) -> impl Future<Output = Result<RowsAffected>> + Send {
    let statement = statement(entity, &primary_key.into());
    async move {
        let statement = statement.inspect_err(|e| log::error!("{e:#}"))?;
        log::debug!("{}", statement);
        executor.execute(statement.into()).await
    }
}

fn statement<E: Entity>(entity: &E, primary_key: &Value) -> Result<String> {
    if matches!(primary_key, Value::Null) {
        return Err(StatementError::InvalidPrimaryKey.into());
    }
    let mut out = String::with_capacity(128);
    let writer = GenericStatementWriter;
    if primary_key.is_zero() {
        writer.write_insert(&mut out, E::shape(), &entity.values())?;
    } else {
        writer.write_update(&mut out, E::shape(), &entity.values())?;
    }
    Ok(out)
}
