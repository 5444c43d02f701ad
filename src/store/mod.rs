pub mod form_store;
pub mod store_model;
