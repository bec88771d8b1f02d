mod models;
mod provider;

pub use models::{set_hosts_params, HostRecord};
pub use provider::*;
