pub mod batch;
pub mod single;
