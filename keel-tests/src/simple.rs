use keel::{Entity, Executor, Query, ZERO_TIMESTAMP};
use std::sync::LazyLock;
use time::{PrimitiveDateTime, macros::datetime};
use tokio::sync::Mutex;

pub async fn simple<E: Executor>(executor: &mut E) {
    #[derive(Entity, Debug, Clone, PartialEq)]
    struct SimpleFields {
        #[db = "column=id primarykey=yes table=simple_fields"]
        id: i64,
        #[db = "column=alpha"]
        alpha: u8,
        #[db = "column=bravo"]
        bravo: i32,
        #[db = "column=charlie"]
        charlie: i16,
        #[db = "column=delta"]
        delta: u64,
        #[db = "column=echo"]
        echo: f32,
        #[db = "column=foxtrot"]
        foxtrot: f64,
        #[db = "column=golf"]
        golf: bool,
        #[db = "column=hotel"]
        hotel: String,
        #[db = "column=india"]
        india: Vec<u8>,
        #[db = "column=juliet"]
        juliet: PrimitiveDateTime,
    }
    impl Default for SimpleFields {
        fn default() -> Self {
            Self {
                id: 0,
                alpha: 0,
                bravo: 0,
                charlie: 0,
                delta: 0,
                echo: 0.0,
                foxtrot: 0.0,
                golf: false,
                hotel: String::new(),
                india: Vec::new(),
                juliet: ZERO_TIMESTAMP,
            }
        }
    }

    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    // Setup
    executor
        .execute("DROP TABLE IF EXISTS simple_fields".into())
        .await
        .expect("Failed to drop simple_fields table");
    executor
        .execute(
            indoc::indoc! {"
                CREATE TABLE simple_fields (
                    id INTEGER PRIMARY KEY,
                    alpha INTEGER NOT NULL,
                    bravo INTEGER NOT NULL,
                    charlie INTEGER NOT NULL,
                    delta INTEGER NOT NULL,
                    echo REAL NOT NULL,
                    foxtrot REAL NOT NULL,
                    golf BOOLEAN NOT NULL,
                    hotel TEXT NOT NULL,
                    india BLOB NOT NULL,
                    juliet TEXT NOT NULL
                )
            "}
            .into(),
        )
        .await
        .expect("Failed to create simple_fields table");

    // Insert
    let mut entity = SimpleFields {
        id: 0,
        alpha: 255,
        bravo: 777,
        charlie: -2,
        delta: 9876543210,
        echo: 1.5,
        foxtrot: -0.125,
        golf: true,
        hotel: "Hello world!".into(),
        india: vec![0, 1, 2, 254, 255],
        juliet: datetime!(2024-01-08 12:30:45),
    };
    let result = entity
        .save(executor)
        .await
        .expect("Failed to save simple 1");
    assert_eq!(result.rows_affected, 1);
    entity.id = result
        .last_affected_id
        .expect("Insert did not report the generated id");
    let loaded = SimpleFields::query_one(
        executor,
        Query::new("SELECT * FROM simple_fields WHERE id = ?").bind(entity.id),
    )
    .await
    .expect("Failed to query simple 1");
    assert_eq!(loaded, entity);

    // Update
    let entity = SimpleFields {
        alpha: 0,
        bravo: i32::MIN,
        golf: false,
        hotel: "It's a 'quoted' \"text\"; --".into(),
        india: vec![],
        juliet: datetime!(1999-12-31 23:59:59),
        ..entity
    };
    let result = entity
        .save(executor)
        .await
        .expect("Failed to save simple 2");
    assert_eq!(result.rows_affected, 1);
    assert_eq!(result.last_affected_id, None);
    let loaded = SimpleFields::query_many(executor, "SELECT * FROM simple_fields")
        .await
        .expect("Failed to query simple 2");
    assert_eq!(loaded, [entity]);

    // Empty table
    executor
        .execute("DELETE FROM simple_fields".into())
        .await
        .expect("Failed to clear simple_fields table");
    let loaded = SimpleFields::query_one(executor, "SELECT * FROM simple_fields")
        .await
        .expect("Failed to query an empty table");
    assert_eq!(loaded, SimpleFields::default());
}
