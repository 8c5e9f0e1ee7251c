pub mod auth;
pub mod availability_service;
pub mod booking_service;
pub mod payment;
pub mod slot_generator;
