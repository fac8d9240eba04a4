pub mod loader_tests;
