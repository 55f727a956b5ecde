use dbapi_contract::prelude::*;

const UPDATE_ONE: &str = "UPDATE users SET name='x' WHERE id=1";
const INSERT_USER: &str = "INSERT INTO users (id, name) VALUES (?1, ?2)";
const USERS_QUERY: &str = "SELECT id, name FROM users";

fn script() -> Script {
    Script::new()
        .on(UPDATE_ONE, Outcome::Affected(1))
        .on(INSERT_USER, Outcome::Affected(1))
        .on(
            USERS_QUERY,
            Outcome::rows(
                vec![
                    ColumnDesc::new("id", "INTEGER"),
                    ColumnDesc::new("name", "TEXT"),
                ],
                vec![vec![Value::Int(1), Value::Text("a".into())]],
            ),
        )
        .on("SELECT 1/0", Outcome::Fail("division by zero".into()))
}

#[test]
fn update_scenario_rowcount_and_fetch_precondition() {
    let mut conn = ScriptedConnection::new(script());
    let mut cur = conn.cursor().unwrap();

    cur.execute(UPDATE_ONE, &Params::none()).unwrap();
    assert_eq!(cur.rowcount(), Some(1));
    assert!(cur.description().is_none(), "no result set metadata for DML");

    let err = cur.fetchone().unwrap_err();
    assert!(err.is_no_result_set(), "fetch after DML: {err}");
}

#[test]
fn fetch_before_any_execute_is_a_precondition_error() {
    let mut conn = ScriptedConnection::new(script());
    let mut cur = conn.cursor().unwrap();

    for err in [
        cur.fetchone().map(|_| ()).unwrap_err(),
        cur.fetchmany(Some(3)).map(|_| ()).unwrap_err(),
        cur.fetchall().map(|_| ()).unwrap_err(),
    ] {
        assert!(err.is_no_result_set(), "fresh cursor fetch: {err}");
    }
}

#[test]
fn executemany_sums_affected_rows() {
    let mut conn = ScriptedConnection::new(script());
    let mut cur = conn.cursor().unwrap();

    let sets = vec![
        ParamSet::positional([Value::Int(10), Value::Text("x".into())]),
        ParamSet::positional([Value::Int(11), Value::Text("y".into())]),
        ParamSet::positional([Value::Int(12), Value::Text("z".into())]),
    ];
    cur.executemany(INSERT_USER, &sets).unwrap();
    assert_eq!(cur.rowcount(), Some(3));
    assert_eq!(conn.pending_writes(), 3);
}

#[test]
fn executemany_rejects_row_producing_operations() {
    let mut conn = ScriptedConnection::new(script());
    let mut cur = conn.cursor().unwrap();

    let err = cur
        .executemany(USERS_QUERY, &[ParamSet::Empty])
        .unwrap_err();
    assert!(err.is_parameter(), "executemany over a query: {err}");
}

#[test]
fn batch_params_through_execute_behave_as_executemany() {
    let mut conn = ScriptedConnection::new(script());
    let mut cur = conn.cursor().unwrap();

    let batch = Params::Batch(vec![
        ParamSet::positional([Value::Int(20), Value::Text("p".into())]),
        ParamSet::positional([Value::Int(21), Value::Text("q".into())]),
    ]);
    cur.execute(INSERT_USER, &batch).unwrap();
    assert_eq!(cur.rowcount(), Some(2));
}

#[test]
fn parameters_are_left_unmodified() {
    let mut conn = ScriptedConnection::new(script());
    let mut cur = conn.cursor().unwrap();

    let params: Params = ParamSet::named([
        ("id", Value::Int(1)),
        ("name", Value::Text("x".into())),
    ])
    .into();
    let snapshot = params.clone();
    cur.execute(UPDATE_ONE, &params).unwrap();
    assert_eq!(params, snapshot);
}

#[test]
fn backend_failures_keep_their_own_kind() {
    let mut conn = ScriptedConnection::new(script());
    let mut cur = conn.cursor().unwrap();

    let err = cur.execute("SELECT 1/0", &Params::none()).unwrap_err();
    assert!(err.is_backend(), "scripted failure: {err}");
    assert!(err.to_string().contains("division by zero"));

    let err = cur
        .execute("SELECT * FROM nowhere", &Params::none())
        .unwrap_err();
    assert!(err.is_backend(), "unscripted operation: {err}");
}

#[test]
fn failed_execute_discards_previous_result_state() {
    let mut conn = ScriptedConnection::new(script());
    let mut cur = conn.cursor().unwrap();

    cur.execute(USERS_QUERY, &Params::none()).unwrap();
    assert!(cur.description().is_some());

    let _ = cur.execute("SELECT 1/0", &Params::none()).unwrap_err();
    assert!(cur.description().is_none(), "stale metadata must be gone");
    assert_eq!(cur.rowcount(), None);
    let err = cur.fetchone().unwrap_err();
    assert!(err.is_no_result_set(), "stale rows must be gone: {err}");
}
