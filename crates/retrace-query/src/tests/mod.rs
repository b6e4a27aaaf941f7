//! Unit tests for the query engine.

mod unit;
