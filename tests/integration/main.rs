//! Integration tests for poster generation
//!
//! These tests use wiremock to stand in for product pages, the relay and
//! image hosts, and run the full generation pipeline end-to-end.

mod common;
mod fetch_tests;
mod generate_tests;
