pub mod frame;
pub mod reaction;
