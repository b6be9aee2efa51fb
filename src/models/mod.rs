pub mod calendar;
pub mod menu;
pub mod quantity;
pub mod recipe;
