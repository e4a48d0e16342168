pub mod app;
pub mod config;
pub mod features;
pub mod form;
pub mod handler;
pub mod model;
pub mod predict;
pub mod reference;
pub mod render;
pub mod resource;
pub mod roster;
pub mod types;
