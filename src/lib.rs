pub mod apphost;
pub mod config;
pub mod db;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod gateway;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod web;
