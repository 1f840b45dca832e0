pub mod quest;
pub mod reflection;
