// src/lib.rs

pub mod api;
pub mod config;
pub mod dispatcher;
pub mod handlers;
pub mod nlp;
pub mod state;
