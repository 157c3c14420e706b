// src/quiz/mod.rs

pub mod answer_store;
pub mod navigation;
pub mod runner;
pub mod session;
