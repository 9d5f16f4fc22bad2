pub mod components;
pub mod dashboard;
pub mod form;
pub mod forms;
pub mod records;
