//! Unit tests for value rendering and record serialization.

use super::{format_number, Record, Value};

fn nums(ns: &[i64]) -> Value {
    Value::Array(ns.iter().map(|&n| Value::from(n)).collect())
}

#[test]
fn renders_arrays_with_inner_spaces() {
    assert_eq!(nums(&[1, 2, 3, 4, 5]).render(), "[ 1, 2, 3, 4, 5 ]");
    assert_eq!(nums(&[7]).render(), "[ 7 ]");
    assert_eq!(Value::Array(vec![]).render(), "[]");
}

#[test]
fn strings_are_raw_at_top_level_and_quoted_inside_arrays() {
    assert_eq!(Value::from("hi").render(), "hi");
    let mixed = Value::Array(vec![Value::from("a"), Value::from(1)]);
    assert_eq!(mixed.render(), "[ 'a', 1 ]");
}

#[test]
fn numbers_print_like_the_engine() {
    assert_eq!(format_number(42.0), "42");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(2.5), "2.5");
    assert_eq!(format_number(f64::NAN), "NaN");
    assert_eq!(format_number(f64::INFINITY), "Infinity");
    assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
}

#[test]
fn record_json_skips_methods_and_keeps_order() {
    let rec = Record::new()
        .data("name", "Test")
        .method("method", |me| me.get("value").cloned().unwrap_or(Value::Number(0.0)))
        .data("value", 42);

    assert_eq!(rec.to_json(), r#"{"name":"Test","value":42}"#);
    assert_eq!(rec.method_names().collect::<Vec<_>>(), vec!["method"]);
}

#[test]
fn record_json_handles_fractions_and_non_finite() {
    let rec = Record::new()
        .data("half", 0.5)
        .data("bad", f64::NAN)
        .data("list", nums(&[1, 2]));
    assert_eq!(rec.to_json(), r#"{"half":0.5,"bad":null,"list":[1,2]}"#);
}

#[test]
fn invoke_reads_owner_at_call_time() {
    let mut rec = Record::new().data("value", 42).method("double", |me| {
        let v = me.get("value").and_then(Value::as_number).unwrap_or(0.0);
        Value::Number(v * 2.0)
    });

    assert_eq!(rec.invoke("double"), Some(Value::Number(84.0)));

    rec.set("value", 10);
    assert_eq!(rec.invoke("double"), Some(Value::Number(20.0)));
}

#[test]
fn invoke_ignores_data_fields_and_unknown_names() {
    let rec = Record::new().data("value", 1);
    assert_eq!(rec.invoke("value"), None);
    assert_eq!(rec.invoke("missing"), None);
}

#[test]
fn redeclared_field_keeps_position() {
    let rec = Record::new().data("a", 1).data("b", 2).data("a", 3);
    assert_eq!(rec.to_json(), r#"{"a":3,"b":2}"#);
}

#[test]
fn numbers_switch_to_exponent_form_at_engine_boundaries() {
    assert_eq!(format_number(1e20), "100000000000000000000");
    assert_eq!(format_number(1e21), "1e+21");
    assert_eq!(format_number(1.5e21), "1.5e+21");
    assert_eq!(format_number(1e-6), "0.000001");
    assert_eq!(format_number(1e-7), "1e-7");
    assert_eq!(format_number(-2.5e-8), "-2.5e-8");
    assert_eq!(format_number(123.456), "123.456");
    assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
}

#[test]
fn large_factorial_renders_in_exponent_form() {
    let v = Value::Number(crate::oracle::factorial(25));
    assert_eq!(v.render(), "1.5511210043330986e+25");
    assert_eq!(Value::Number(crate::oracle::factorial(20)).render(), "2432902008176640000");
}

#[test]
fn record_json_uses_engine_number_text() {
    let rec = Record::new()
        .data("big", 1e20)
        .data("huge", 1e21)
        .data("tiny", 1e-7)
        .data("neg", -0.0);
    assert_eq!(
        rec.to_json(),
        r#"{"big":100000000000000000000,"huge":1e+21,"tiny":1e-7,"neg":0}"#
    );
}
