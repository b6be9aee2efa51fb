//! Page state for the calendar, the add-menu picker and the menu details page.

pub mod calendar;
pub mod menu_details;
pub mod picker;
