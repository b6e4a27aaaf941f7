//! Unit tests for `retrace_grammar`.

mod unit;
