//! Event managers and the event bundle builder

pub mod factory;
pub mod manager;

pub use factory::EventManagerFactory;
pub use manager::EventManager;
