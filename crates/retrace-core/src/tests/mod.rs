//! Unit tests for `retrace_core`.
