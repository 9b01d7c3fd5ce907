pub mod activity;
pub mod assignments;
pub mod auth;
pub mod departments;
pub mod employees;
pub mod health;
pub mod organisations;
pub mod projects;
pub mod users;
