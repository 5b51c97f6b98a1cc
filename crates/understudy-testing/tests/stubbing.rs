//! Stubbing scenarios: return values, faults, argument matching, chains and
//! callback answers.

use serde_json::json;
use understudy_core::{any, any_int, arg_that, args, matchers, Fault, Invocation, Value};
use understudy_engine::Session;
use understudy_testing::{fixtures, init_tracing};

#[test]
fn test_then_return_chain_on_iterator() {
    init_tracing();
    let session = Session::new();
    let iterator = session.mock(fixtures::iterator());
    iterator
        .when("next", matchers![])
        .unwrap()
        .then_return("hello")
        .then_return("world");

    let words: Vec<String> = (0..3)
        .map(|_| iterator.call_as::<String>("next", args![]).unwrap())
        .collect();
    assert_eq!(words.join(" "), "hello world world");
}

#[test]
fn test_then_throw_on_close() {
    let session = Session::new();
    let stream = session.mock(fixtures::output_stream());
    stream
        .when("close", matchers![])
        .unwrap()
        .then_throw(Fault::of_kind("IOException"));

    let err = stream.call("close", args![]).unwrap_err();
    assert_eq!(err.into_fault(), Some(Fault::of_kind("IOException")));
    stream.call("flush", args![]).unwrap();
}

#[test]
fn test_throw_on_specific_argument_only() {
    let session = Session::new();
    let list = session.mock(fixtures::list());
    list.when("add", matchers![1])
        .unwrap()
        .then_throw(Fault::of_kind("RuntimeException"));

    assert!(list.call("add", args![1]).unwrap_err().as_fault().is_some());
    assert_eq!(list.call("add", args![2]).unwrap(), json!(false));
}

#[test]
fn test_stubs_keyed_by_argument() {
    let session = Session::new();
    let comparable = session.mock(fixtures::comparable());
    comparable.when("compare_to", matchers!["test"]).unwrap().then_return(1);
    comparable.when("compare_to", matchers!["foo"]).unwrap().then_return(2);

    assert_eq!(comparable.call_as::<i64>("compare_to", args!["test"]).unwrap(), 1);
    assert_eq!(comparable.call_as::<i64>("compare_to", args!["foo"]).unwrap(), 2);
    assert_eq!(comparable.call_as::<i64>("compare_to", args!["Not stub"]).unwrap(), 0);
}

#[test]
fn test_wildcard_and_predicate_matchers() {
    let session = Session::new();
    let list = session.mock(fixtures::list());
    list.when("get", [any_int()]).unwrap().then_return(1);
    list.when(
        "contains",
        [arg_that("one or two", |v: &Value| v == 1 || v == 2)],
    )
    .unwrap()
    .then_return(true);

    assert_eq!(list.call("get", args![0]).unwrap(), json!(1));
    assert_eq!(list.call("get", args![999]).unwrap(), json!(1));
    assert_eq!(list.call("get", args!["zero"]).unwrap(), Value::Null);
    assert_eq!(list.call("contains", args![1]).unwrap(), json!(true));
    assert_eq!(list.call("contains", args![3]).unwrap(), json!(false));
}

#[test]
fn test_consecutive_calls() {
    let session = Session::new();
    let list = session.mock(fixtures::list());
    list.when("get", matchers![0]).unwrap().then_return(0);
    list.when("get", matchers![0]).unwrap().then_return(1);
    list.when("get", matchers![0]).unwrap().then_return(2);
    list.when("get", matchers![3])
        .unwrap()
        .then_return(3)
        .then_return(4)
        .then_throw(Fault::of_kind("RuntimeException"));

    assert_eq!(list.call("get", args![0]).unwrap(), json!(2));
    assert_eq!(list.call("get", args![0]).unwrap(), json!(2));
    assert_eq!(list.call("get", args![3]).unwrap(), json!(3));
    assert_eq!(list.call("get", args![3]).unwrap(), json!(4));
    for _ in 0..3 {
        let err = list.call("get", args![3]).unwrap_err();
        assert!(err.as_fault().is_some_and(|f| f.is_kind("RuntimeException")));
    }
    assert_eq!(list.stub_count(), 2);
}

#[test]
fn test_answer_with_callback() {
    let session = Session::new();
    let list = session.mock(fixtures::list());
    list.when("get", [any_int()]).unwrap().then_answer(
        |inv: &Invocation| -> Result<Value, Fault> {
            Ok(json!(format!("hello world:{}", inv.arg(0))))
        },
    );

    assert_eq!(list.call("get", args![0]).unwrap(), json!("hello world:0"));
    assert_eq!(list.call("get", args![999]).unwrap(), json!("hello world:999"));
}

#[test]
fn test_failing_answer_propagates_verbatim() {
    let session = Session::new();
    let list = session.mock(fixtures::list());
    list.when("get", [any()]).unwrap().then_answer(
        |inv: &Invocation| -> Result<Value, Fault> {
            Err(Fault::new("IllegalState", format!("refused {}", inv)))
        },
    );

    let err = list.call("get", args![5]).unwrap_err();
    assert_eq!(err.to_string(), "IllegalState: refused list.get(5)");
}

#[test]
fn test_setup_errors_are_configuration_errors() {
    let session = Session::new();
    let list = session.mock(fixtures::list());

    let arity = list.when("get", matchers![1, 2]).unwrap_err();
    assert!(arity.is_configuration());
    assert_eq!(arity.code().as_u16(), 1001);

    let unknown = list.when("remove", matchers![1]).unwrap_err();
    assert_eq!(unknown.code_name(), "UNKNOWN_METHOD");
    assert_eq!(unknown.to_string(), "List has no method named 'remove'");
}

#[test]
fn test_result_type_mismatch() {
    let session = Session::new();
    let iterator = session.mock(fixtures::iterator());
    iterator.when("next", matchers![]).unwrap().then_return("text");

    let err = iterator.call_as::<i64>("next", args![]).unwrap_err();
    assert_eq!(err.code_name(), "RESULT_TYPE");
}
