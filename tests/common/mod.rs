#![allow(dead_code)]

use pwshfmt::FormatterOptions;

/// Format already-canonical input and assert it comes back unchanged.
pub fn roundtrip(input: &str) {
    let output = pwshfmt::safe_format(input, &FormatterOptions::default());
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}

/// Format twice and assert the second pass is a fixed point.
pub fn stable(input: &str) {
    let options = FormatterOptions::default();
    let once = pwshfmt::safe_format(input, &options);
    let twice = pwshfmt::safe_format(&once, &options);
    assert_eq!(
        twice, once,
        "formatting not idempotent:\n--- input ---\n{input}\n\
         --- first ---\n{once}\n--- second ---\n{twice}"
    );
}
