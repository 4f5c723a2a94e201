//! Integration tests against a mock speech service

mod error_handling;
