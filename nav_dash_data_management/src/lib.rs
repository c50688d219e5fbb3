use const_format::concatcp;

pub mod database;
mod data_manager;

pub use data_manager::*;

pub const DATA_DIR: &str = "data/";
pub const DATABASE_PATH: &str = concatcp!(DATA_DIR, "settings.db");

#[derive(Debug)]
pub enum DataManagerError {
    Database(String),
    Encoding(String),
}
