// src/lib.rs

pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod presenter;
pub mod quiz;
pub mod routes;
pub mod state;
pub mod utils;

pub use gateway::{HttpGateway, QuizApi};
pub use presenter::Presenter;
pub use quiz::{runner::QuizRunner, session::QuizSession};
