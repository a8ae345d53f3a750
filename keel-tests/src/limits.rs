use keel::{Entity, Executor};
use std::sync::LazyLock;
use tokio::sync::Mutex;

pub async fn limits<E: Executor>(executor: &mut E) {
    #[derive(Entity, Default, Debug, Clone, PartialEq)]
    struct Limits {
        #[db = "column=id primarykey=yes table=limits"]
        id: i64,
        #[db = "column=boolean"]
        boolean: bool,
        #[db = "column=int8"]
        int8: i8,
        #[db = "column=uint8"]
        uint8: u8,
        #[db = "column=int16"]
        int16: i16,
        #[db = "column=uint16"]
        uint16: u16,
        #[db = "column=int32"]
        int32: i32,
        #[db = "column=uint32"]
        uint32: u32,
        #[db = "column=int64"]
        int64: i64,
        #[db = "column=uint64"]
        uint64: u64,
        #[db = "column=float32"]
        float32: f32,
        #[db = "column=float64"]
        float64: f64,
    }

    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    // Setup
    executor
        .execute("DROP TABLE IF EXISTS limits".into())
        .await
        .expect("Failed to drop limits table");
    executor
        .execute(
            indoc::indoc! {"
                CREATE TABLE limits (
                    id INTEGER PRIMARY KEY,
                    boolean BOOLEAN,
                    int8 INTEGER,
                    uint8 INTEGER,
                    int16 INTEGER,
                    uint16 INTEGER,
                    int32 INTEGER,
                    uint32 INTEGER,
                    int64 INTEGER,
                    uint64 INTEGER,
                    float32 REAL,
                    float64 REAL
                )
            "}
            .into(),
        )
        .await
        .expect("Failed to create limits table");

    // Minimals
    let mut minimals = Limits {
        id: 0,
        boolean: false,
        int8: i8::MIN,
        uint8: 0,
        int16: i16::MIN,
        uint16: 0,
        int32: i32::MIN,
        uint32: 0,
        int64: -9_223_372_036_854_775_807,
        uint64: 0,
        float32: -1.25,
        float64: -0.0625,
    };
    minimals.id = minimals
        .save(executor)
        .await
        .expect("Failed to save minimals")
        .last_affected_id
        .expect("Insert did not report the generated id");

    // Maximals
    let mut maximals = Limits {
        id: 0,
        boolean: true,
        int8: i8::MAX,
        uint8: u8::MAX,
        int16: i16::MAX,
        uint16: u16::MAX,
        int32: i32::MAX,
        uint32: u32::MAX,
        int64: i64::MAX,
        uint64: i64::MAX as u64,
        float32: 3.5,
        float64: 12345.678,
    };
    maximals.id = maximals
        .save(executor)
        .await
        .expect("Failed to save maximals")
        .last_affected_id
        .expect("Insert did not report the generated id");
    assert_ne!(minimals.id, maximals.id);

    let loaded = Limits::query_many(executor, "SELECT * FROM limits ORDER BY id")
        .await
        .expect("Failed to query limits");
    assert_eq!(loaded, [minimals, maximals]);
}
