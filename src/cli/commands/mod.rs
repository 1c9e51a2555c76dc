pub mod nav;
pub mod project;
