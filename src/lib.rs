pub mod aggregate;
pub mod cli;
pub mod committers;
pub mod error;
pub mod export;
pub mod fetch;
pub mod files;
pub mod log;
pub mod model;
pub mod parse;
pub mod report;
pub mod template;
pub mod timeline;
pub mod util;
