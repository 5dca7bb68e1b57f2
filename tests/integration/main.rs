//! Integration tests

mod analytics_test;
mod config_test;
mod insights_test;
mod policy_test;
