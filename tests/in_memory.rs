//! In-memory integration tests over the public service API.
//!
//! - `task_service_tests`: local task lifecycle and ownership
//! - `digest_tests`: digests built from the aggregate view

mod in_memory {
    pub mod helpers;

    mod digest_tests;
    mod task_service_tests;
}
