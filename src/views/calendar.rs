use chrono::{NaiveDate, Weekday};
use tracing::{debug, warn};

use super::picker::{MenuPicker, PickedMenu};
use crate::{
    db::DocumentStore,
    error::StoreError,
    models::calendar::{CalendarEntry, WeekView},
    services::{
        calendar::{CalendarError, CalendarService},
        dates,
    },
};

/// Identifies one calendar fetch. Only the most recent ticket may apply its
/// result; anything older is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// State of the calendar page: the visible week, the loaded entries and the
/// add-menu picker when open.
///
/// Every store failure is logged and leaves the state as it was before the
/// operation, with loading cleared.
#[derive(Debug)]
pub struct CalendarView {
    first_day: Weekday,
    week_start: NaiveDate,
    entries: Vec<CalendarEntry>,
    loading: bool,
    generation: u64,
    picker: Option<MenuPicker>,
}

impl CalendarView {
    pub fn new(pivot: NaiveDate, first_day: Weekday) -> Self {
        Self {
            first_day,
            week_start: dates::week_start(pivot, first_day).unwrap_or(pivot),
            entries: Vec::new(),
            loading: true,
            generation: 0,
            picker: None,
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket(self.generation)
    }

    /// Apply a fetch result. Returns false when the ticket is stale and the
    /// result was dropped.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<CalendarEntry>, StoreError>,
    ) -> bool {
        if ticket.0 != self.generation {
            debug!(ticket = ticket.0, current = self.generation, "Discarding stale calendar load");
            return false;
        }
        self.loading = false;
        match result {
            Ok(entries) => self.entries = entries,
            Err(e) => warn!("Calendar load failed, keeping previous entries: {e}"),
        }
        true
    }

    /// Invalidate any fetch still in flight.
    pub fn dismiss(&mut self) {
        self.generation += 1;
        self.loading = false;
        self.picker = None;
    }

    pub async fn load(&mut self, store: &dyn DocumentStore) {
        let ticket = self.begin_load();
        let result = CalendarService::load_entries(store).await;
        self.finish_load(ticket, result);
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    /// Week navigation is disabled while a load is in flight, and stops at the
    /// edges of the representable calendar.
    pub fn next_week(&mut self) -> bool {
        self.shift(1)
    }

    pub fn previous_week(&mut self) -> bool {
        self.shift(-1)
    }

    fn shift(&mut self, weeks: i64) -> bool {
        if self.loading {
            return false;
        }
        match dates::shift_weeks(self.week_start, weeks, self.first_day) {
            Some(start) => {
                self.week_start = start;
                true
            }
            None => false,
        }
    }

    pub fn week(&self, today: NaiveDate) -> Result<WeekView, CalendarError> {
        CalendarService::week_view(&self.entries, self.week_start, self.first_day, today)
    }

    pub async fn open_picker(&mut self, store: &dyn DocumentStore, day: NaiveDate) {
        self.picker = Some(MenuPicker::open(store, day).await);
    }

    pub fn picker(&self) -> Option<&MenuPicker> {
        self.picker.as_ref()
    }

    pub fn picker_mut(&mut self) -> Option<&mut MenuPicker> {
        self.picker.as_mut()
    }

    pub fn close_picker(&mut self) {
        self.picker = None;
    }

    /// Save the picker's selection. The picker closes only when the entry was
    /// created.
    pub async fn confirm_picker(&mut self, store: &dyn DocumentStore) -> bool {
        let picked = match self.picker.as_ref() {
            Some(picker) => match picker.selected() {
                Some(menu_id) => PickedMenu {
                    date: picker.date(),
                    menu_id: menu_id.to_string(),
                },
                None => return false,
            },
            None => return false,
        };
        let saved = self.add(store, picked.date, &picked.menu_id).await;
        if saved {
            self.picker = None;
        }
        saved
    }

    /// Create an entry and append it locally without re-fetching the calendar.
    pub async fn add(&mut self, store: &dyn DocumentStore, date: NaiveDate, menu_id: &str) -> bool {
        match CalendarService::add_entry(store, date, menu_id).await {
            Ok(entry) => {
                self.entries.push(entry);
                true
            }
            Err(e) => {
                warn!("Error saving calendar entry: {e}");
                false
            }
        }
    }

    /// Delete an entry from the store, then locally. No confirmation step.
    pub async fn delete(&mut self, store: &dyn DocumentStore, entry_id: &str) -> bool {
        match CalendarService::delete_entry(store, entry_id).await {
            Ok(()) => {
                self.entries.retain(|entry| entry.id != entry_id);
                true
            }
            Err(e) => {
                warn!("Error deleting calendar entry: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{memory::Operation, MemoryStore},
        models::{calendar::CalendarEntryDoc, menu::Menu, recipe::Recipe},
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        for (id, name, recipe) in [("bbq", "Backyard BBQ", "Brisket"), ("veg", "Veggie Feast", "Ratatouille")] {
            store
                .put_menu(&Menu {
                    id: id.into(),
                    name: name.into(),
                    description: String::new(),
                    recipes: vec![Recipe {
                        name: recipe.into(),
                        ..Recipe::default()
                    }],
                })
                .await
                .unwrap();
        }
        store
            .insert_calendar_doc(CalendarEntryDoc {
                id: "e1".into(),
                date: "2024-03-10".into(),
                menu_id: "bbq".into(),
            })
            .await;
        store
    }

    #[tokio::test]
    async fn navigation_waits_for_load_and_moves_by_week() {
        let store = seeded_store().await;
        let mut view = CalendarView::new(date(2024, 3, 13), Weekday::Sun);
        assert!(view.is_loading());
        assert!(!view.next_week());

        view.load(&store).await;
        assert!(!view.is_loading());
        assert_eq!(view.week_start(), date(2024, 3, 10));
        assert!(view.next_week());
        assert_eq!(view.week_start(), date(2024, 3, 17));
        assert!(view.previous_week());
        assert!(view.previous_week());
        assert_eq!(view.week_start(), date(2024, 3, 3));
    }

    #[test]
    fn navigation_stops_at_the_last_representable_week() {
        let mut view = CalendarView::new(NaiveDate::MAX, Weekday::Sun);
        view.dismiss();
        let start = view.week_start();

        assert!(!view.next_week());
        assert_eq!(view.week_start(), start);
        assert!(view.previous_week());
        assert!(view.week_start() < start);
    }

    #[tokio::test]
    async fn stale_loads_are_discarded() {
        let mut view = CalendarView::new(date(2024, 3, 13), Weekday::Sun);
        let first = view.begin_load();
        let second = view.begin_load();

        assert!(!view.finish_load(first, Ok(Vec::new())));
        assert!(view.is_loading());
        assert!(view.finish_load(second, Ok(Vec::new())));

        let late = view.begin_load();
        view.dismiss();
        assert!(!view.finish_load(late, Ok(Vec::new())));
    }

    #[tokio::test]
    async fn picker_flow_adds_entry_then_delete_restores_state() {
        let store = seeded_store().await;
        let mut view = CalendarView::new(date(2024, 3, 13), Weekday::Sun);
        view.load(&store).await;
        let before: Vec<_> = view.entries().to_vec();

        view.open_picker(&store, date(2024, 3, 12)).await;
        assert!(!view.confirm_picker(&store).await);

        let picker = view.picker_mut().unwrap();
        picker.set_search("ratat");
        let chosen = picker.filtered()[0].id.clone();
        assert!(picker.select(&chosen));
        assert!(view.confirm_picker(&store).await);
        assert!(view.picker().is_none());

        assert_eq!(view.entries().len(), 2);
        let week = view.week(date(2024, 3, 12)).unwrap();
        assert_eq!(week.days[2].entries[0].menu_name, "Veggie Feast");

        let new_id = view.entries()[1].id.clone();
        assert!(view.delete(&store, &new_id).await);
        assert_eq!(view.entries(), before.as_slice());
        assert_eq!(store.list_calendar_entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failures_leave_state_untouched() {
        let store = seeded_store().await;
        let mut view = CalendarView::new(date(2024, 3, 13), Weekday::Sun);
        view.load(&store).await;
        assert_eq!(view.entries().len(), 1);

        store.fail(Operation::CreateCalendar);
        assert!(!view.add(&store, date(2024, 3, 11), "veg").await);
        assert_eq!(view.entries().len(), 1);

        store.fail(Operation::DeleteCalendar);
        assert!(!view.delete(&store, "e1").await);
        assert_eq!(view.entries().len(), 1);

        store.fail(Operation::ListCalendar);
        view.load(&store).await;
        assert!(!view.is_loading());
        assert_eq!(view.entries().len(), 1);
    }
}
