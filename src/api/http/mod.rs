// src/api/http/mod.rs

pub mod handlers;
pub mod router;
