//! Unit tests for the authorization flow.
