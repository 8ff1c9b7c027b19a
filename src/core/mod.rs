pub mod clock;
pub mod listing;
pub mod notifications;
pub mod scheduler;
pub mod seed;
pub mod service;
pub mod store;
pub mod validation;
pub mod workspace;
