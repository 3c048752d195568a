// tests/gateway/main.rs

mod config_tests;
