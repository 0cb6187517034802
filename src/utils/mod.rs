// src/utils/mod.rs

pub mod exists;
pub mod hash;
pub mod jwt;
pub mod tags;
