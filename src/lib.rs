// src/lib.rs

//! Bangumi metadata client library

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
