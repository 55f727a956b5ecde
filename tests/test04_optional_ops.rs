use dbapi_contract::prelude::*;

const TWO_SETS: &str = "CALL report()";

fn multi_set_script() -> Script {
    Script::new().with_nextset().on(
        TWO_SETS,
        Outcome::ResultSets(vec![
            ResultSpec::new(
                vec![ColumnDesc::new("id", "INTEGER")],
                vec![vec![Value::Int(1)], vec![Value::Int(2)]],
            ),
            ResultSpec::new(
                vec![ColumnDesc::new("total", "INTEGER")],
                vec![vec![Value::Int(2)]],
            ),
        ]),
    )
}

#[test]
fn rollback_is_loudly_unsupported_by_default() {
    let mut conn = ScriptedConnection::new(Script::new());
    let err = conn.rollback().unwrap_err();
    assert!(err.is_unsupported(), "rollback: {err}");
}

#[test]
fn rollback_discards_pending_writes_when_supported() {
    let script = Script::new()
        .with_rollback()
        .on("DELETE FROM users", Outcome::Affected(4));
    let mut conn = ScriptedConnection::new(script);
    let mut cur = conn.cursor().unwrap();
    cur.execute("DELETE FROM users", &Params::none()).unwrap();
    assert_eq!(conn.pending_writes(), 4);

    conn.rollback().unwrap();
    assert_eq!(conn.pending_writes(), 0);
    assert_eq!(conn.transaction_log(), vec![TxEvent::Rollback]);

    // Nothing left to roll back at close time.
    conn.close().unwrap();
    assert_eq!(conn.transaction_log(), vec![TxEvent::Rollback]);
}

#[test]
fn callproc_is_loudly_unsupported_without_procedures() {
    let mut conn = ScriptedConnection::new(Script::new());
    let mut cur = conn.cursor().unwrap();
    let err = cur.callproc("lower", &[Value::Text("A".into())]).unwrap_err();
    assert!(err.is_unsupported(), "callproc: {err}");
}

#[test]
fn callproc_replaces_out_args_and_exposes_result_set() {
    let script = Script::new().on_proc(
        "next_id",
        ProcSpec::new(vec![None, Some(Value::Int(42))]).with_result(ResultSpec::new(
            vec![ColumnDesc::new("generated", "INTEGER")],
            vec![vec![Value::Int(42)]],
        )),
    );
    let mut conn = ScriptedConnection::new(script);
    let mut cur = conn.cursor().unwrap();

    let input = [Value::Text("users".into()), Value::Int(0)];
    let returned = cur.callproc("next_id", &input).unwrap();
    // Input position untouched, out position replaced.
    assert_eq!(returned[0], Value::Text("users".into()));
    assert_eq!(returned[1], Value::Int(42));
    // The caller's arguments are not mutated.
    assert_eq!(input[1], Value::Int(0));

    let row = cur.fetchone().unwrap().expect("procedure result set");
    assert_eq!(row.get("generated"), Some(&Value::Int(42)));
}

#[test]
fn callproc_argument_mismatch_and_unknown_name() {
    let script = Script::new().on_proc("next_id", ProcSpec::new(vec![Some(Value::Int(1))]));
    let mut conn = ScriptedConnection::new(script);
    let mut cur = conn.cursor().unwrap();

    let err = cur.callproc("next_id", &[]).unwrap_err();
    assert!(err.is_parameter(), "argument count: {err}");

    let err = cur.callproc("missing", &[]).unwrap_err();
    assert!(err.is_backend(), "unknown procedure: {err}");
}

#[test]
fn nextset_is_loudly_unsupported_by_default() {
    let script = Script::new().on("SELECT 1", Outcome::rows(
        vec![ColumnDesc::new("1", "INTEGER")],
        vec![vec![Value::Int(1)]],
    ));
    let mut conn = ScriptedConnection::new(script);
    let mut cur = conn.cursor().unwrap();
    cur.execute("SELECT 1", &Params::none()).unwrap();
    let err = cur.nextset().unwrap_err();
    assert!(err.is_unsupported(), "nextset: {err}");
}

#[test]
fn nextset_walks_every_set_then_reports_exhaustion() {
    let mut conn = ScriptedConnection::new(multi_set_script());
    let mut cur = conn.cursor().unwrap();
    cur.execute(TWO_SETS, &Params::none()).unwrap();

    assert_eq!(cur.rowcount(), Some(2));
    let first = cur.fetchone().unwrap().expect("row of the first set");
    assert_eq!(first.get("id"), Some(&Value::Int(1)));

    // Advancing discards the unconsumed remainder of the first set.
    assert!(cur.nextset().unwrap(), "second set becomes active");
    assert_eq!(cur.rowcount(), Some(1));
    let desc = cur.description().expect("metadata of the second set");
    assert_eq!(desc[0].name, "total");
    let row = cur.fetchone().unwrap().expect("row of the second set");
    assert_eq!(row.get("total"), Some(&Value::Int(2)));

    assert!(!cur.nextset().unwrap(), "no more sets");
    let err = cur.fetchone().unwrap_err();
    assert!(err.is_no_result_set(), "fetch after last set: {err}");
}

#[test]
fn nextset_before_any_execute_is_a_precondition_error() {
    let mut conn = ScriptedConnection::new(multi_set_script());
    let mut cur = conn.cursor().unwrap();
    let err = cur.nextset().unwrap_err();
    assert!(err.is_no_result_set(), "fresh nextset: {err}");
}

#[test]
fn size_hints_are_sanctioned_no_ops() {
    let mut conn = ScriptedConnection::new(Script::new());
    let mut cur = conn.cursor().unwrap();
    cur.setinputsizes(&[Some(32), None, Some(8)]).unwrap();
    cur.setoutputsize(4096, None).unwrap();
    cur.setoutputsize(4096, Some(1)).unwrap();

    // But not on a closed cursor.
    cur.close().unwrap();
    assert!(cur.setinputsizes(&[]).unwrap_err().is_closed());
    assert!(cur.setoutputsize(1, None).unwrap_err().is_closed());
}
