pub mod branches;
pub mod builder;
pub mod engine;
pub mod state;
