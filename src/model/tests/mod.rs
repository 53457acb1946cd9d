mod code_tests;
mod component_tests;
mod crs_tests;
