pub mod common;
pub mod config;
pub mod namecheap;
pub mod service;
pub mod translate;
pub mod yamlfile;

pub use crate::config::Config;
