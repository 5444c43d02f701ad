pub mod builder;
pub mod layout_model;
pub mod rows;
