pub mod api;
pub mod bff;
pub mod config;
pub mod data_models;
pub mod db;
pub mod error;
pub mod query;
pub mod repository;
pub mod service;
