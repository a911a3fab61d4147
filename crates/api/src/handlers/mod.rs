pub mod admin_content;
pub mod admin_films;
pub mod admin_integrations;
pub mod forms;
pub mod pages;
