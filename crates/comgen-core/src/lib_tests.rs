#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// LogLevel tests

#[test]
fn LogLevel___ordering___trace_less_than_error() {
    assert!(LogLevel::Trace < LogLevel::Debug);
    assert!(LogLevel::Debug < LogLevel::Info);
    assert!(LogLevel::Info < LogLevel::Warn);
    assert!(LogLevel::Warn < LogLevel::Error);
    assert!(LogLevel::Error < LogLevel::Off);
}

#[test_case(0, LogLevel::Trace)]
#[test_case(2, LogLevel::Info)]
#[test_case(4, LogLevel::Error)]
#[test_case(5, LogLevel::Off)]
#[test_case(200, LogLevel::Off)]
fn LogLevel___from_u8___maps_value(value: u8, expected: LogLevel) {
    assert_eq!(LogLevel::from_u8(value), expected);
}

#[test]
fn LogLevel___display___uppercase() {
    assert_eq!(LogLevel::Warn.to_string(), "WARN");
    assert_eq!(LogLevel::Trace.to_string(), "TRACE");
}

#[test]
fn LogLevel___parse___roundtrips_display() {
    for level in [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Off,
    ] {
        assert_eq!(LogLevel::parse(&level.to_string()), Some(level));
    }
}
