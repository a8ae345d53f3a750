use crate::silent_logs;
use keel::{Executor, Query};
use time::macros::datetime;

pub async fn records<E: Executor>(executor: &mut E) {
    // Driver values through the field accessors
    let records = executor
        .records(
            indoc::indoc! {"
                SELECT 42 AS int,
                    '17' AS text,
                    2.5 AS real,
                    NULL AS absent,
                    X'68656C6C6F' AS blob,
                    '2024-01-08 12:30:45' AS at,
                    1 AS flag
            "}
            .into(),
        )
        .await
        .expect("Failed to select literals");
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(
        record.names(),
        ["int", "text", "real", "absent", "blob", "at", "flag"]
    );
    let field = |name: &str| record.get(name).expect("Missing column");
    assert_eq!(field("int").as_int(), 42);
    assert_eq!(field("int").as_string(), "42");
    assert_eq!(field("text").as_int64(), 17);
    assert_eq!(field("real").as_float(), 2.5);
    assert_eq!(field("real").as_int(), 2);
    assert!(field("absent").is_null());
    assert_eq!(field("absent").as_string(), "");
    assert_eq!(field("absent").as_int64_opt(), None);
    assert_eq!(field("blob").as_string(), "hello");
    assert_eq!(field("blob").as_bytes(), b"hello");
    assert_eq!(field("at").as_date(None), datetime!(2024-01-08 12:30:45));
    assert_eq!(field("at").as_date_epoch(), 1704717045);
    assert!(field("flag").as_bool());

    // Parameters
    let records = executor
        .records(
            Query::new("SELECT ? AS a, ? AS b, ? AS c, ? AS d")
                .bind(-5i32)
                .bind("text")
                .bind(Option::<f64>::None)
                .bind(datetime!(2000-02-29 00:00:00)),
        )
        .await
        .expect("Failed to select parameters");
    let record = &records[0];
    assert_eq!(record.get("a").map(|v| v.as_int()), Some(-5));
    assert_eq!(record.get("b").map(|v| v.as_string()), Some("text".into()));
    assert!(record.get("c").is_some_and(|v| v.is_null()));
    assert_eq!(
        record.get("d").map(|v| v.as_date(None)),
        Some(datetime!(2000-02-29 00:00:00))
    );

    // Many rows, in order
    let records = executor
        .records(
            indoc::indoc! {"
                WITH RECURSIVE n(v) AS (SELECT 1 UNION ALL SELECT v + 1 FROM n WHERE v < 100)
                SELECT v FROM n ORDER BY v DESC
            "}
            .into(),
        )
        .await
        .expect("Failed to select many rows");
    assert_eq!(
        records
            .iter()
            .filter_map(|v| v.get("v").map(|v| v.as_int()))
            .collect::<Vec<_>>(),
        (1..=100).rev().collect::<Vec<_>>()
    );

    // Driver errors
    silent_logs! {
        let result = executor.records("SELECT * FROM missing_table".into()).await;
        assert!(result.is_err());
    }
}
