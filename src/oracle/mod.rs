//! Demonstration oracle.
//!
//! The ordered list of steps the smoke-test script runs, and the exact
//! lines a conformant engine prints for each of them. Every step is a pure
//! function of literal inputs, so the transcript never changes between runs.

use crate::sink::OutputSink;
use crate::value::{Record, Value};

pub const HEADER: &str = "=== QuickJS-NG Demo ===";
pub const FOOTER: &str = "=== Demo Complete ===";

/// Literal input shared by the sum and doubling steps.
pub const NUMBERS: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

/// One demonstration unit. Order in [`STEPS`] is the execution order.
pub struct Step {
    pub label: &'static str,
    pub run: fn(&mut OutputSink),
}

pub const STEPS: &[Step] = &[
    Step {
        label: "header",
        run: header,
    },
    Step {
        label: "arithmetic",
        run: arithmetic,
    },
    Step {
        label: "strings",
        run: strings,
    },
    Step {
        label: "arrays",
        run: arrays,
    },
    Step {
        label: "object",
        run: object,
    },
    Step {
        label: "recursion",
        run: recursion,
    },
    Step {
        label: "footer",
        run: footer,
    },
];

pub fn steps() -> &'static [Step] {
    STEPS
}

/* --- Operations ------------------------------------------------------ */

pub fn interpolate(name: &str, version: &str) -> String {
    format!("{name}-{version} from Zig")
}

/// Left fold with seed 0.
pub fn sum(numbers: &[f64]) -> f64 {
    numbers.iter().fold(0.0, |acc, n| acc + n)
}

pub fn doubled(numbers: &[f64]) -> Vec<f64> {
    numbers.iter().map(|n| n * 2.0).collect()
}

/// `n <= 1 -> 1`, otherwise `n * factorial(n - 1)`. Computed in doubles like
/// the engine, so large inputs reach `Infinity` instead of overflowing.
pub fn factorial(n: u32) -> f64 {
    if n <= 1 {
        1.0
    } else {
        f64::from(n) * factorial(n - 1)
    }
}

/// `{ name: "Test", value: 42, method() { return this.value * 2 } }`
pub fn demo_record() -> Record {
    Record::new()
        .data("name", "Test")
        .data("value", 42)
        .method("method", |me| {
            let value = me.get("value").and_then(Value::as_number).unwrap_or(f64::NAN);
            Value::Number(value * 2.0)
        })
}

fn array(numbers: &[f64]) -> Value {
    Value::Array(numbers.iter().map(|&n| Value::Number(n)).collect())
}

/* --- Steps ----------------------------------------------------------- */

fn header(out: &mut OutputSink) {
    out.log(&[HEADER.into()]);
    out.blank();
}

fn arithmetic(out: &mut OutputSink) {
    out.log(&["Basic arithmetic:".into()]);
    out.log(&["2 + 3 =".into(), Value::Number(2.0 + 3.0)]);
    out.log(&["10 * 5 =".into(), Value::Number(10.0 * 5.0)]);
    out.blank();
}

fn strings(out: &mut OutputSink) {
    out.log(&["String operations:".into()]);
    out.log(&[interpolate("QuickJS", "ng").into()]);
    out.blank();
}

fn arrays(out: &mut OutputSink) {
    out.log(&["Array operations:".into()]);
    out.log(&["Array:".into(), array(&NUMBERS)]);
    out.log(&["Sum:".into(), Value::Number(sum(&NUMBERS))]);
    out.log(&["Doubled:".into(), array(&doubled(&NUMBERS))]);
    out.blank();
}

fn object(out: &mut OutputSink) {
    let obj = demo_record();
    out.log(&["Object operations:".into()]);
    out.log(&["Object:".into(), obj.to_json().into()]);
    let result = obj.invoke("method").unwrap_or(Value::Number(f64::NAN));
    out.log(&["Method result:".into(), result]);
    out.blank();
}

fn recursion(out: &mut OutputSink) {
    out.log(&["Functions:".into()]);
    out.log(&["5! =".into(), Value::Number(factorial(5))]);
    out.blank();
}

fn footer(out: &mut OutputSink) {
    out.log(&[FOOTER.into()]);
}

/* --- Entry points ---------------------------------------------------- */

/// Runs every step in order, appending to `sink`.
pub fn run_into(sink: &mut OutputSink) {
    for step in STEPS {
        log::trace!("step: {}", step.label);
        (step.run)(sink);
    }
}

/// Runs every step on a fresh in-memory sink and returns the lines.
pub fn run() -> Vec<String> {
    let mut sink = OutputSink::new();
    run_into(&mut sink);
    sink.take_lines()
}

/// Joins lines the way the sink delivers them: each terminated by `\n`.
pub fn render_transcript(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

pub fn transcript() -> String {
    render_transcript(&run())
}
