//! Integration tests for jira-ratchet
//!
//! Each test runs the compiled binary against an in-process fake JIRA
//! server and asserts on output, exit codes, and the mutations recorded by
//! the server.

mod test_doctor;
mod test_release;
mod test_validate;
