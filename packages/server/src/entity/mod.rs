pub mod category;
pub mod item;
