pub use esqlate_startup_test_utils::builders;
pub use esqlate_startup_test_utils::init_tracing;
