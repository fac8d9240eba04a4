pub mod spec_tests;
