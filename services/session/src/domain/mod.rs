pub mod allow_list;
pub mod repository;
pub mod types;
