pub mod attributes;
pub mod corpus;
pub mod problem_crud;
pub mod vector_search;
