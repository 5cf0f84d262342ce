#![allow(dead_code, unused_imports)]

pub use slotplan_test_utils::{builders, init_tracing, recording_solver};

use std::error::Error;

pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;
