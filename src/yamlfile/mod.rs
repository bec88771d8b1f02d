mod backend;
mod models;

pub use backend::*;
pub use models::*;
