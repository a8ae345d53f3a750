#[cfg(test)]
mod tests {
    use keel_core::{Connection, Executor};
    use keel_sqlite::SqliteConnection;
    use keel_tests::{init_logs, silent_logs};
    use std::path::Path;

    const DB_PATH: &'static str = "../target/debug/connection.sqlite";

    fn url(mode: &str) -> String {
        format!("{}{}?mode={}", SqliteConnection::PREFIX, DB_PATH, mode)
    }

    #[tokio::test]
    async fn open_modes() {
        init_logs();
        let _ = tokio::fs::remove_file(DB_PATH).await;
        assert!(!Path::new(DB_PATH).exists());

        // Read only never creates the file
        silent_logs! {
            assert!(SqliteConnection::connect(&url("ro")).await.is_err());
        }
        assert!(!Path::new(DB_PATH).exists());

        let mut connection = SqliteConnection::connect(&url("rwc"))
            .await
            .expect("Could not create the database");
        assert!(Path::new(DB_PATH).exists());
        connection
            .execute("CREATE TABLE notes (body TEXT)".into())
            .await
            .expect("Failed to create the notes table");

        let mut reader = SqliteConnection::connect(&url("ro"))
            .await
            .expect("Could not open the database read only");
        let tables = reader
            .records("SELECT name FROM sqlite_master WHERE type = 'table'".into())
            .await
            .expect("Failed to list tables");
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].get("name").map(|v| v.as_string()), Some("notes".into()));
        silent_logs! {
            assert!(
                reader
                    .execute("INSERT INTO notes VALUES ('x')".into())
                    .await
                    .is_err(),
                "A read only connection should reject writes"
            );
        }
    }

    #[tokio::test]
    async fn in_memory_is_private() {
        init_logs();
        let mut first = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open an in memory database");
        let mut second = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open an in memory database");
        first
            .execute("CREATE TABLE t (v INTEGER)".into())
            .await
            .expect("Failed to create a table");
        silent_logs! {
            assert!(second.records("SELECT * FROM t".into()).await.is_err());
        }
    }

    #[tokio::test]
    async fn wrong_scheme() {
        silent_logs! {
            for url in ["duckdb://some_value", "sqlite:/missing_slash", ""] {
                assert!(SqliteConnection::connect(url).await.is_err(), "{url}");
            }
        }
    }
}
