pub mod calc;
pub mod controllers;
pub mod entities;
pub mod pipeline;
pub mod quiz;
pub mod ranking;
