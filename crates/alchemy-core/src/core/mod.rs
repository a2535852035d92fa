pub mod collision;
pub mod registry;
