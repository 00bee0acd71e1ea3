mod mock_fs;

mod discovery_tests;
mod validation_tests;
