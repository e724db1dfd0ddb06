pub mod category;
pub mod column;
pub mod filters;
pub mod load_state;
pub mod schema;
pub mod table;
pub mod validation;
