pub mod analyzers;
pub mod config;
pub mod convert;
pub mod fetch;
pub mod load;
pub mod output;
pub mod parser;
pub mod reading;
