pub mod mapper;

pub use mapper::{shape_mismatch, Mapper};
