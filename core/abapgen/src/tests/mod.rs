mod support;

mod driver_tests;
mod engine_tests;
