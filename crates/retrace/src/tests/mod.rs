//! Unit and behaviour tests for the `retrace` facade.

mod config_tests;

mod behaviour;
