use keel::{Connection, Entity};
use std::sync::LazyLock;
use time::{PrimitiveDateTime, macros::datetime};
use tokio::sync::Mutex;

pub async fn nullability<C: Connection>(connection: &mut C) {
    #[derive(Entity, Default, Debug, Clone, PartialEq)]
    struct NullFields {
        #[db = "column=id primarykey=yes table=null_fields"]
        id: Option<i64>,
        #[db = "column=alpha"]
        alpha: Option<u8>,
        #[db = "column=bravo"]
        bravo: Option<i32>,
        #[db = "column=charlie"]
        charlie: Option<u64>,
        #[db = "column=delta"]
        delta: Option<f64>,
        #[db = "column=echo"]
        echo: Option<bool>,
        #[db = "column=foxtrot"]
        foxtrot: Option<String>,
        #[db = "column=golf"]
        golf: Option<Vec<u8>>,
        #[db = "column=hotel"]
        hotel: Option<PrimitiveDateTime>,
    }

    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    // Setup
    connection
        .execute("DROP TABLE IF EXISTS null_fields".into())
        .await
        .expect("Failed to drop null_fields table");
    connection
        .execute(
            indoc::indoc! {"
                CREATE TABLE null_fields (
                    id INTEGER PRIMARY KEY,
                    alpha INTEGER,
                    bravo INTEGER,
                    charlie INTEGER,
                    delta REAL,
                    echo BOOLEAN,
                    foxtrot TEXT,
                    golf BLOB,
                    hotel TEXT
                )
            "}
            .into(),
        )
        .await
        .expect("Failed to create null_fields table");

    // Every attribute absent, a missing key means insert
    let result = NullFields::default()
        .save(connection)
        .await
        .expect("Failed to save null entity");
    let id = result.last_affected_id;
    assert!(id.is_some());
    let loaded = NullFields::query_many(connection, "SELECT * FROM null_fields")
        .await
        .expect("Failed to query null entity");
    assert_eq!(
        loaded,
        [NullFields {
            id,
            ..Default::default()
        }]
    );

    // Every attribute present, empty text and bytes are not absent
    let entity = NullFields {
        id,
        alpha: Some(7),
        bravo: Some(-777),
        charlie: Some(9876543210),
        delta: Some(0.5),
        echo: Some(false),
        foxtrot: Some("".into()),
        golf: Some(vec![]),
        hotel: Some(datetime!(2025-02-28 08:00:01)),
    };
    entity
        .save(connection)
        .await
        .expect("Failed to update null entity");
    let loaded = NullFields::query_one(connection, "SELECT * FROM null_fields")
        .await
        .expect("Failed to query updated entity");
    assert_eq!(loaded, entity);

    // Back to absent
    let entity = NullFields {
        id,
        ..Default::default()
    };
    entity
        .save(connection)
        .await
        .expect("Failed to clear null entity");
    let loaded = NullFields::query_one(connection, "SELECT * FROM null_fields")
        .await
        .expect("Failed to query cleared entity");
    assert_eq!(loaded, entity);
}
