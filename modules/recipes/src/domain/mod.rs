pub mod composition;
pub mod error;
pub mod import;
pub mod model;
pub mod repo;
pub mod rules;
pub mod service;
pub mod shopping_list;
