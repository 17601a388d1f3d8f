pub mod database;
pub mod providers;
pub mod storage;
