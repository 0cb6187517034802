// src/models/mod.rs

pub mod comment;
pub mod like;
pub mod message;
pub mod pagination;
pub mod post;
pub mod user;
