//! API Route Handlers

pub mod health;
pub mod panels;
pub mod rankings;
pub mod technologies;
