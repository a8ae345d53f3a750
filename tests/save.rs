mod common;

#[cfg(test)]
mod tests {
    use crate::common::MockExecutor;
    use keel::{Entity, RowsAffected, StatementError, Value, save};

    #[derive(Entity, Default, Debug, Clone, PartialEq)]
    struct User {
        #[db = "column=id primarykey=yes table=Users"]
        id: i64,
        #[db = "column=name"]
        name: String,
        #[db = "column=status"]
        status: i32,
    }

    fn user(id: i64) -> User {
        User {
            id,
            name: "Test".into(),
            status: 31,
        }
    }

    #[tokio::test]
    async fn zero_key_inserts() {
        let mut executor = MockExecutor::new();
        executor.expect_affected(1, Some(42));
        let result = user(0).save(&mut executor).await.unwrap();
        assert_eq!(
            result,
            RowsAffected {
                rows_affected: 1,
                last_affected_id: Some(42),
            }
        );
        assert_eq!(
            executor.sql(),
            ["INSERT INTO Users(name,status) VALUES (X'54657374',31);"]
        );
        assert!(executor.queries[0].params.is_empty());
    }

    #[tokio::test]
    async fn non_zero_key_updates() {
        let mut executor = MockExecutor::new();
        executor.expect_affected(1, None);
        let result = save(&mut executor, &user(1), 1i64).await.unwrap();
        assert_eq!(result.rows_affected, 1);
        assert_eq!(result.last_affected_id, None);
        assert_eq!(
            executor.sql(),
            ["UPDATE Users SET name=X'54657374',status=31 WHERE id=1;"]
        );
    }

    #[tokio::test]
    async fn explicit_key_decides() {
        let mut executor = MockExecutor::new();
        save(&mut executor, &user(5), 0i64).await.unwrap();
        save(&mut executor, &user(5), Value::Int64(None)).await.unwrap();
        save(&mut executor, &user(5), "").await.unwrap();
        save(&mut executor, &user(5), false).await.unwrap();
        save(&mut executor, &user(5), "k").await.unwrap();
        let sql = executor.sql();
        assert!(sql[..4].iter().all(|v| v.starts_with("INSERT")));
        assert!(sql[4].starts_with("UPDATE"));
    }

    #[tokio::test]
    async fn untyped_null_key_rejected() {
        let mut executor = MockExecutor::new();
        let error = save(&mut executor, &user(1), Value::Null).await.unwrap_err();
        assert_eq!(error.to_string(), "invalid primary key value");
        assert_eq!(
            error.downcast_ref::<StatementError>(),
            Some(&StatementError::InvalidPrimaryKey)
        );
        assert!(executor.queries.is_empty());
    }

    #[tokio::test]
    async fn configuration_error_not_executed() {
        #[derive(Entity, Default)]
        struct Orphan {
            #[db = "column=id primarykey=yes"]
            id: i64,
            #[db = "column=name"]
            name: String,
        }
        let mut executor = MockExecutor::new();
        let error = Orphan::default().save(&mut executor).await.unwrap_err();
        assert_eq!(error.to_string(), "no table found in structure");
        assert!(executor.queries.is_empty());
    }

    #[tokio::test]
    async fn driver_error_propagates() {
        let mut executor = MockExecutor::new();
        executor.expect_error("UNIQUE constraint failed: Users.name");
        let error = user(0).save(&mut executor).await.unwrap_err();
        assert_eq!(error.to_string(), "UNIQUE constraint failed: Users.name");
        assert_eq!(executor.queries.len(), 1);
    }

    #[tokio::test]
    async fn primary_key_types() {
        #[derive(Entity, Default)]
        struct Text {
            #[db = "column=code primarykey=yes table=Codes"]
            code: String,
            #[db = "column=label"]
            label: String,
        }
        #[derive(Entity, Default)]
        struct Unsigned {
            #[db = "column=id primarykey=yes table=Counters"]
            id: u16,
            #[db = "column=hits"]
            hits: u64,
        }
        #[derive(Entity, Default)]
        struct Nullable {
            #[db = "column=id primarykey=yes table=Items"]
            id: Option<i32>,
            #[db = "column=price"]
            price: f64,
        }
        #[derive(Entity, Default)]
        struct Keyless {
            #[db = "column=line table=Lines"]
            line: String,
        }
        let mut executor = MockExecutor::new();
        Text {
            code: "".into(),
            label: "a".into(),
        }
        .save(&mut executor)
        .await
        .unwrap();
        Text {
            code: "abc".into(),
            label: "a".into(),
        }
        .save(&mut executor)
        .await
        .unwrap();
        Unsigned { id: 0, hits: 3 }.save(&mut executor).await.unwrap();
        Unsigned { id: 2, hits: 3 }.save(&mut executor).await.unwrap();
        Nullable {
            id: None,
            price: 9.5,
        }
        .save(&mut executor)
        .await
        .unwrap();
        Nullable {
            id: Some(4),
            price: 9.5,
        }
        .save(&mut executor)
        .await
        .unwrap();
        let error = Keyless { line: "x".into() }
            .save(&mut executor)
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "invalid primary key value");
        assert_eq!(
            executor.sql(),
            [
                "INSERT INTO Codes(label) VALUES (X'61');",
                "UPDATE Codes SET label=X'61' WHERE code=X'616263';",
                "INSERT INTO Counters(hits) VALUES (3);",
                "UPDATE Counters SET hits=3 WHERE id=2;",
                "INSERT INTO Items(price) VALUES (9.5);",
                "UPDATE Items SET price=9.5 WHERE id=4;",
            ]
        );
    }
}
