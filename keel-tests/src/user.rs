use crate::silent_logs;
use keel::{Entity, Executor, Query, StatementError};
use std::sync::LazyLock;
use time::PrimitiveDateTime;
use tokio::sync::Mutex;

#[derive(Entity, Default, Debug, Clone, PartialEq)]
struct User {
    #[db = "column=id primarykey=yes table=users"]
    id: i64,
    #[db = "column=name"]
    name: String,
    #[db = "column=status"]
    status: i32,
    #[db = "column=created omit=yes"]
    created: Option<PrimitiveDateTime>,
    session: String,
}

/// Read only view over the same table, without a primary key.
#[derive(Entity, Default, Debug, Clone, PartialEq)]
struct UserName {
    #[db = "column=name table=users"]
    name: String,
}

pub async fn users<E: Executor>(executor: &mut E) {
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    // Setup
    executor
        .execute("DROP TABLE IF EXISTS users".into())
        .await
        .expect("Failed to drop users table");
    executor
        .execute(
            indoc::indoc! {"
                CREATE TABLE users (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    status INTEGER NOT NULL DEFAULT 0,
                    created TEXT DEFAULT CURRENT_TIMESTAMP
                )
            "}
            .into(),
        )
        .await
        .expect("Failed to create users table");

    // Untagged attributes cannot be written
    let user = User {
        name: "Alice".into(),
        ..Default::default()
    };
    silent_logs! {
        let error = user
            .save(executor)
            .await
            .expect_err("An untagged attribute should not be saved");
        assert_eq!(
            error.downcast_ref::<StatementError>(),
            Some(&StatementError::MissingColumn("session".into()))
        );
    }

    // Insert, omitted columns are filled by the database
    #[derive(Entity, Default, Debug, Clone, PartialEq)]
    struct NewUser {
        #[db = "column=id primarykey=yes table=users"]
        id: i64,
        #[db = "column=name"]
        name: String,
        #[db = "column=status"]
        status: i32,
        #[db = "column=created omit=yes"]
        created: Option<PrimitiveDateTime>,
    }
    let mut ids = Vec::new();
    for (name, status) in [("Alice", 1), ("Bob", 2), ("Carol", 3)] {
        let result = NewUser {
            name: name.into(),
            status,
            ..Default::default()
        }
        .save(executor)
        .await
        .expect("Failed to insert user");
        assert_eq!(result.rows_affected, 1);
        ids.push(
            result
                .last_affected_id
                .expect("Insert did not report the generated id"),
        );
    }
    let users = NewUser::query_many(executor, "SELECT * FROM users ORDER BY id")
        .await
        .expect("Failed to query users");
    assert_eq!(users.len(), 3);
    assert_eq!(users.iter().map(|v| v.id).collect::<Vec<_>>(), ids);
    assert!(users.iter().all(|v| v.created.is_some()));

    // Update leaves omitted columns alone
    let mut bob = users[1].clone();
    bob.name = "Robert".into();
    bob.status = 20;
    bob.created = None;
    let result = bob.save(executor).await.expect("Failed to update Bob");
    assert_eq!(result.rows_affected, 1);
    let loaded = NewUser::query_one(
        executor,
        Query::new("SELECT * FROM users WHERE id = ?").bind(bob.id),
    )
    .await
    .expect("Failed to query Bob");
    assert_eq!(loaded.name, "Robert");
    assert_eq!(loaded.status, 20);
    assert_eq!(loaded.created, users[1].created);

    // Updating a missing row is not an error
    let result = NewUser {
        id: 999,
        name: "Nobody".into(),
        ..Default::default()
    }
    .save(executor)
    .await
    .expect("Failed to update a missing user");
    assert_eq!(result.rows_affected, 0);

    // Partial views map only the columns they declare
    let names = UserName::query_many(executor, "SELECT * FROM users ORDER BY name")
        .await
        .expect("Failed to query user names");
    assert_eq!(
        names.into_iter().map(|v| v.name).collect::<Vec<_>>(),
        ["Alice", "Carol", "Robert"]
    );
    silent_logs! {
        let error = UserName {
            name: "Dave".into(),
        }
        .save(executor)
        .await
        .expect_err("A keyless entity cannot be saved");
        assert_eq!(
            error.downcast_ref::<StatementError>(),
            Some(&StatementError::InvalidPrimaryKey)
        );
    }
}
