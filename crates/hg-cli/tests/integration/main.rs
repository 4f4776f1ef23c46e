mod support;

mod cli_test;
mod config_test;
mod service_test;
