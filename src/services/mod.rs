pub mod assistants;
pub mod auth_service;
pub mod identity;
pub mod payments;
pub mod storage;
