pub mod calendar;
pub mod dates;
pub mod menu;
pub mod metrics;
pub mod recipes;
pub mod shopping;
