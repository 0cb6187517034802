// src/handlers/mod.rs

pub mod auth;
pub mod comment;
pub mod like;
pub mod message;
pub mod post;
pub mod user;
