pub mod adapters;
pub mod config;
pub mod course;
pub mod error;
pub mod providers;
pub mod render;
pub mod web;
