use dbapi_contract::prelude::*;

const USERS_QUERY: &str = "SELECT id, name FROM users";

fn users_script() -> Script {
    Script::new().on(
        USERS_QUERY,
        Outcome::rows(
            vec![
                ColumnDesc::new("id", "INTEGER"),
                ColumnDesc::new("name", "TEXT"),
            ],
            vec![
                vec![Value::Int(1), Value::Text("a".into())],
                vec![Value::Int(2), Value::Text("b".into())],
                vec![Value::Int(3), Value::Text("c".into())],
            ],
        ),
    )
}

fn fresh_cursor() -> (ScriptedConnection, ScriptedCursor) {
    let mut conn = ScriptedConnection::new(users_script());
    let cur = conn.cursor().unwrap();
    (conn, cur)
}

#[test]
fn select_scenario_description_and_mixed_fetches() {
    let (_conn, mut cur) = fresh_cursor();
    cur.execute(USERS_QUERY, &Params::none()).unwrap();

    let desc = cur.description().expect("description after a query");
    assert_eq!(desc.len(), 2);
    assert_eq!(desc[0].name, "id");
    assert_eq!(desc[1].name, "name");
    assert_eq!(cur.rowcount(), Some(3));

    let first = cur.fetchone().unwrap().expect("first row");
    assert_eq!(first.get("id"), Some(&Value::Int(1)));
    assert_eq!(first.get("name"), Some(&Value::Text("a".into())));

    let next_two = cur.fetchmany(Some(2)).unwrap();
    assert_eq!(next_two.len(), 2);
    assert_eq!(next_two[0].get_by_index(0), Some(&Value::Int(2)));
    assert_eq!(next_two[1].get_by_index(1), Some(&Value::Text("c".into())));

    assert!(cur.fetchone().unwrap().is_none(), "set is exhausted");
}

#[test]
fn fetchone_loop_equals_fetchall() {
    let (_conn, mut cur) = fresh_cursor();

    cur.execute(USERS_QUERY, &Params::none()).unwrap();
    let mut incremental = Vec::new();
    while let Some(row) = cur.fetchone().unwrap() {
        incremental.push(row);
    }

    cur.execute(USERS_QUERY, &Params::none()).unwrap();
    let bulk = cur.fetchall().unwrap();

    assert_eq!(incremental, bulk, "no duplication, no omission, same order");
    assert_eq!(bulk.len(), 3);
}

#[test]
fn fetchmany_partitions_the_result_set() {
    let (_conn, mut cur) = fresh_cursor();
    cur.execute(USERS_QUERY, &Params::none()).unwrap();
    let baseline = cur.fetchall().unwrap();

    for n in 1..=4usize {
        cur.execute(USERS_QUERY, &Params::none()).unwrap();
        let mut chunks = Vec::new();
        loop {
            let chunk = cur.fetchmany(Some(n)).unwrap();
            if chunk.is_empty() {
                break;
            }
            assert!(chunk.len() <= n, "chunk longer than requested size");
            chunks.push(chunk);
        }
        let concatenated: Vec<Row> = chunks.into_iter().flatten().collect();
        assert_eq!(concatenated, baseline, "partition for size {n}");
    }
}

#[test]
fn arraysize_governs_default_fetchmany() {
    let (_conn, mut cur) = fresh_cursor();
    assert_eq!(cur.arraysize(), 1);

    cur.execute(USERS_QUERY, &Params::none()).unwrap();
    assert_eq!(cur.fetchmany(None).unwrap().len(), 1, "default arraysize");

    cur.set_arraysize(2).unwrap();
    assert_eq!(cur.fetchmany(None).unwrap().len(), 2, "after arraysize = 2");
    assert!(cur.fetchmany(None).unwrap().is_empty(), "exhausted");
}

#[test]
fn reexecution_discards_unconsumed_rows() {
    let (_conn, mut cur) = fresh_cursor();
    cur.execute(USERS_QUERY, &Params::none()).unwrap();
    let _ = cur.fetchone().unwrap();

    // Two rows are still unconsumed; re-executing throws them away and the
    // new result set starts from the top.
    cur.execute(USERS_QUERY, &Params::none()).unwrap();
    let rows = cur.fetchall().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].get("id"), Some(&Value::Int(1)));
}

#[test]
fn fetchall_on_exhausted_set_is_empty_not_an_error() {
    let (_conn, mut cur) = fresh_cursor();
    cur.execute(USERS_QUERY, &Params::none()).unwrap();
    cur.fetchall().unwrap();
    assert!(cur.fetchall().unwrap().is_empty());
    assert!(cur.fetchmany(Some(5)).unwrap().is_empty());
}
