mod constants;
mod db;

pub use constants::*;
pub use db::*;
