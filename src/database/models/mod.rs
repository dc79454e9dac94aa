pub mod template;
pub mod workout;
