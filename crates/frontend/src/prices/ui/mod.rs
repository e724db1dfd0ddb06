pub mod container;
pub mod pages;
pub mod selectors;
pub mod table;
