mod project_tests;
mod run_tests;
mod url_tests;
mod writer_tests;
