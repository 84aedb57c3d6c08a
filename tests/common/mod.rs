#![allow(unused_imports)]

pub use wslctl_test_utils::builders;
pub use wslctl_test_utils::{SpyRunner, init_tracing, with_timeout};
