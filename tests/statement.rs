#[cfg(test)]
mod tests {
    use keel::{Entity, StatementError};
    use time::{PrimitiveDateTime, macros::datetime};

    #[derive(Entity, Default, Debug, Clone, PartialEq)]
    struct User {
        #[db = "column=id primarykey=yes table=Users"]
        id: i64,
        #[db = "column=name"]
        name: String,
        #[db = "column=status"]
        status: i32,
    }

    fn error_of(result: keel::Result<String>) -> StatementError {
        result
            .expect_err("Synthesis should fail")
            .downcast::<StatementError>()
            .expect("Should be a StatementError")
    }

    #[test]
    fn insert_skips_primary_key() {
        let user = User {
            id: 0,
            name: "Test".into(),
            status: 31,
        };
        assert_eq!(
            user.insert_sql().unwrap(),
            "INSERT INTO Users(name,status) VALUES (X'54657374',31);"
        );
    }

    #[test]
    fn update_uses_primary_key() {
        let user = User {
            id: 1,
            name: "Test".into(),
            status: 31,
        };
        assert_eq!(
            user.update_sql().unwrap(),
            "UPDATE Users SET name=X'54657374',status=31 WHERE id=1;"
        );
        assert_eq!(user.update_sql().unwrap(), user.update_sql().unwrap());
    }

    #[test]
    fn status_renderings() {
        #[derive(Entity, Default)]
        struct Flag {
            #[db = "column=id primarykey=yes table=Users"]
            id: u32,
            #[db = "column=status"]
            status: bool,
        }
        #[derive(Entity, Default)]
        struct Text {
            #[db = "column=id primarykey=yes table=Users"]
            id: u32,
            #[db = "column=status"]
            status: String,
        }
        #[derive(Entity, Default)]
        struct Small {
            #[db = "column=id primarykey=yes table=Users"]
            id: u32,
            #[db = "column=status"]
            status: u8,
        }
        #[derive(Entity, Default)]
        struct Real {
            #[db = "column=id primarykey=yes table=Users"]
            id: u32,
            #[db = "column=status"]
            status: f64,
        }
        assert_eq!(
            Flag { id: 1, status: true }.update_sql().unwrap(),
            "UPDATE Users SET status=true WHERE id=1;"
        );
        assert_eq!(
            Text {
                id: 1,
                status: "1".into()
            }
            .update_sql()
            .unwrap(),
            "UPDATE Users SET status=X'31' WHERE id=1;"
        );
        assert_eq!(
            Small { id: 1, status: 1 }.update_sql().unwrap(),
            "UPDATE Users SET status=1 WHERE id=1;"
        );
        assert_eq!(
            Real { id: 1, status: 1.0 }.update_sql().unwrap(),
            "UPDATE Users SET status=1 WHERE id=1;"
        );
        assert_eq!(
            Real { id: 1, status: 3.25 }.update_sql().unwrap(),
            "UPDATE Users SET status=3.25 WHERE id=1;"
        );
    }

    #[test]
    fn timestamp_rendering() {
        #[derive(Entity, Default)]
        struct Event {
            #[db = "column=id primarykey=yes table=Events"]
            id: i64,
            #[db = "column=dtadded"]
            added: Option<PrimitiveDateTime>,
        }
        let event = Event {
            id: 3,
            added: Some(datetime!(2024-12-07 15:29:25)),
        };
        assert_eq!(
            event.update_sql().unwrap(),
            "UPDATE Events SET dtadded='2024-12-07 15:29:25' WHERE id=3;"
        );
        let event = Event { id: 0, added: None };
        assert_eq!(
            event.insert_sql().unwrap(),
            "INSERT INTO Events(dtadded) VALUES (NULL);"
        );
    }

    #[test]
    fn text_never_quoted() {
        #[derive(Entity, Default)]
        struct Note {
            #[db = "column=code primarykey=yes"]
            code: String,
            #[db = "column=body table=Notes"]
            body: String,
            #[db = "column=data"]
            data: Vec<u8>,
        }
        let note = Note {
            code: "a'b".into(),
            body: "'; DROP TABLE Notes; --".into(),
            data: vec![0x00, 0xff],
        };
        assert_eq!(
            note.update_sql().unwrap(),
            "UPDATE Notes SET body=X'273B2044524F50205441424C45204E6F7465733B202D2D',data=X'00FF' WHERE code=X'612762';"
        );
    }

    #[test]
    fn omitted_attributes() {
        #[derive(Entity, Default)]
        struct Account {
            #[db = "column=id primarykey=yes table=Accounts"]
            id: i64,
            #[db = "column=email"]
            email: String,
            #[db = "column=created omit=yes"]
            created: Option<PrimitiveDateTime>,
            #[db = "column=cache omit=yes"]
            cache: std::collections::HashMap<String, String>,
        }
        let account = Account {
            id: 9,
            email: "a@b".into(),
            ..Default::default()
        };
        assert_eq!(
            account.update_sql().unwrap(),
            "UPDATE Accounts SET email=X'614062' WHERE id=9;"
        );
        assert_eq!(
            account.insert_sql().unwrap(),
            "INSERT INTO Accounts(email) VALUES (X'614062');"
        );
    }

    #[test]
    fn missing_column() {
        #[derive(Entity, Default)]
        struct Broken {
            #[db = "column=id primarykey=yes table=Users"]
            id: i64,
            name: String,
        }
        let broken = Broken::default();
        assert_eq!(
            error_of(broken.update_sql()),
            StatementError::MissingColumn("name".into())
        );
        assert_eq!(
            error_of(broken.insert_sql()).to_string(),
            "no column name specified for field name"
        );
    }

    #[test]
    fn empty_column() {
        #[derive(Entity, Default)]
        struct Broken {
            #[db = "column= table=Users"]
            id: i64,
            #[db = "column=name"]
            name: String,
        }
        assert_eq!(
            error_of(Broken::default().insert_sql()),
            StatementError::MissingColumn("id".into())
        );
    }

    #[test]
    fn missing_table() {
        #[derive(Entity, Default)]
        struct Orphan {
            #[db = "column=id primarykey=yes"]
            id: i64,
            #[db = "column=name"]
            name: String,
        }
        let orphan = Orphan::default();
        assert_eq!(
            error_of(orphan.insert_sql()).to_string(),
            "no table found in structure"
        );
        assert_eq!(error_of(orphan.update_sql()), StatementError::MissingTable);

        #[derive(Entity, Default)]
        struct Lonely {
            #[db = "column=id primarykey=yes"]
            id: i64,
        }
        assert_eq!(
            error_of(Lonely::default().update_sql()),
            StatementError::MissingTable
        );
    }

    #[test]
    fn no_columns() {
        #[derive(Entity, Default)]
        struct Key {
            #[db = "column=id primarykey=yes table=Keys"]
            id: i64,
            #[db = "column=seen omit=yes"]
            seen: bool,
        }
        let key = Key::default();
        assert_eq!(
            error_of(key.update_sql()).to_string(),
            "no non-primary key and non-omitted fields found in structure"
        );
        assert_eq!(error_of(key.insert_sql()), StatementError::NoColumns);
    }

    #[test]
    fn missing_primary_key() {
        #[derive(Entity, Default)]
        struct Log {
            #[db = "column=message table=Logs"]
            message: String,
        }
        let log = Log {
            message: "hi".into(),
        };
        assert_eq!(
            error_of(log.update_sql()).to_string(),
            "no primary key set, unable to set a where clause"
        );
        assert_eq!(
            log.insert_sql().unwrap(),
            "INSERT INTO Logs(message) VALUES (X'6869');"
        );
    }

    #[test]
    fn unsupported_type() {
        #[derive(Entity, Default)]
        struct Bag {
            #[db = "column=id primarykey=yes table=Bags"]
            id: i64,
            #[db = "column=items"]
            items: Vec<String>,
        }
        assert_eq!(
            error_of(Bag::default().insert_sql()),
            StatementError::UnsupportedType("items".into())
        );
    }

    #[test]
    fn first_table_wins() {
        #[derive(Entity, Default)]
        struct Twice {
            #[db = "column=id primarykey=yes table=First"]
            id: i64,
            #[db = "column=name table=Second"]
            name: String,
        }
        assert_eq!(
            Twice::default().insert_sql().unwrap(),
            "INSERT INTO First(name) VALUES (X'');"
        );
    }
}
