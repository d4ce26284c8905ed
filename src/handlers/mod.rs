// src/handlers/mod.rs

pub mod music;
pub mod spotify;
pub mod stubs;
pub mod weather;
