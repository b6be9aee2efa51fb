use std::collections::HashSet;

use chrono::{NaiveDate, Weekday};
use futures_util::future::join_all;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    db::DocumentStore,
    error::StoreError,
    models::calendar::{CalendarEntry, CalendarEntryDoc, DayCell, WeekView},
    services::{dates, metrics},
};

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("invalid calendar date: {0}")]
    InvalidDate(String),

    #[error("menu {0} not found")]
    MenuNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct CalendarService;

impl CalendarService {
    /// Fetch every calendar document and join it with its menu.
    ///
    /// Menu lookups run concurrently; the result keeps the order in which the
    /// calendar documents were listed. Entries whose menu is missing, or whose
    /// lookup fails, are logged and left out.
    pub async fn load_entries(store: &dyn DocumentStore) -> Result<Vec<CalendarEntry>, StoreError> {
        let docs = store.list_calendar_entries().await.inspect_err(|e| {
            metrics::store_failure("list_calendar_entries");
            error!("Error fetching calendar entries: {e}");
        })?;

        let lookups = docs.into_iter().map(|doc| async move {
            match store.get_menu(&doc.menu_id).await {
                Ok(Some(menu)) => Some(CalendarEntry::resolved(doc, menu)),
                Ok(None) => {
                    metrics::DANGLING_REFERENCES.inc();
                    warn!(entry_id = %doc.id, menu_id = %doc.menu_id, "Menu with ID {} not found", doc.menu_id);
                    None
                }
                Err(e) => {
                    metrics::store_failure("get_menu");
                    warn!(entry_id = %doc.id, "Error fetching menu {}: {e}", doc.menu_id);
                    None
                }
            }
        });

        Ok(join_all(lookups).await.into_iter().flatten().collect())
    }

    /// Plan `menu_id` onto `date`.
    ///
    /// The document is written first, then the menu is fetched again to fill
    /// the denormalized copy. If that fetch fails or finds nothing the new
    /// document is deleted again so no dangling entry is left behind.
    pub async fn add_entry(
        store: &dyn DocumentStore,
        date: NaiveDate,
        menu_id: &str,
    ) -> Result<CalendarEntry, CalendarError> {
        let doc = store
            .create_calendar_entry(date, menu_id)
            .await
            .inspect_err(|e| {
                metrics::store_failure("create_calendar_entry");
                error!("Error saving calendar entry: {e}");
            })?;

        let lookup = store.get_menu(menu_id).await;
        let menu = match lookup {
            Ok(Some(menu)) => menu,
            Ok(None) => {
                warn!(entry_id = %doc.id, "Menu {menu_id} vanished while planning, rolling back");
                Self::roll_back(store, &doc).await;
                return Err(CalendarError::MenuNotFound(menu_id.to_string()));
            }
            Err(e) => {
                metrics::store_failure("get_menu");
                error!(entry_id = %doc.id, "Error fetching menu {menu_id}: {e}");
                Self::roll_back(store, &doc).await;
                return Err(e.into());
            }
        };

        metrics::CALENDAR_ENTRIES_CREATED.inc();
        info!(entry_id = %doc.id, date = %doc.date, menu_id, "Calendar entry created");
        Ok(CalendarEntry::resolved(doc, menu))
    }

    /// Same as [`Self::add_entry`] but accepts any ISO-8601 date or timestamp.
    pub async fn add_entry_from_str(
        store: &dyn DocumentStore,
        raw_date: &str,
        menu_id: &str,
    ) -> Result<CalendarEntry, CalendarError> {
        let date = dates::normalize(raw_date)
            .ok_or_else(|| CalendarError::InvalidDate(raw_date.to_string()))?;
        Self::add_entry(store, date, menu_id).await
    }

    async fn roll_back(store: &dyn DocumentStore, doc: &CalendarEntryDoc) {
        if let Err(e) = store.delete_calendar_entry(&doc.id).await {
            metrics::store_failure("delete_calendar_entry");
            error!(entry_id = %doc.id, "Failed to roll back calendar entry: {e}");
        }
    }

    pub async fn delete_entry(store: &dyn DocumentStore, id: &str) -> Result<(), StoreError> {
        store.delete_calendar_entry(id).await.inspect_err(|e| {
            metrics::store_failure("delete_calendar_entry");
            error!(entry_id = id, "Error deleting calendar entry: {e}");
        })?;
        metrics::CALENDAR_ENTRIES_DELETED.inc();
        info!(entry_id = id, "Calendar entry deleted");
        Ok(())
    }

    /// Bucket `entries` into the seven day cells of the week containing `pivot`.
    ///
    /// Fails with `InvalidDate` when that week runs off either end of the
    /// representable calendar.
    pub fn week_view(
        entries: &[CalendarEntry],
        pivot: NaiveDate,
        first_day: Weekday,
        today: NaiveDate,
    ) -> Result<WeekView, CalendarError> {
        let out_of_range = || CalendarError::InvalidDate(pivot.to_string());
        let start = dates::week_start(pivot, first_day).ok_or_else(out_of_range)?;
        let label = dates::week_label(start).ok_or_else(out_of_range)?;
        let days = dates::week_days(start)
            .ok_or_else(out_of_range)?
            .into_iter()
            .map(|day| DayCell {
                date: day,
                weekday: day.format("%a").to_string(),
                is_today: day == today,
                entries: Self::entries_on(entries, day)
                    .map(CalendarEntry::summary)
                    .collect(),
            })
            .collect::<Vec<_>>();

        Ok(WeekView {
            start,
            end: days.last().map(|d| d.date).unwrap_or(start),
            label,
            days,
        })
    }

    /// Entries whose normalized date is `day`.
    pub fn entries_on(
        entries: &[CalendarEntry],
        day: NaiveDate,
    ) -> impl Iterator<Item = &CalendarEntry> {
        entries.iter().filter(move |entry| entry.day() == Some(day))
    }

    /// Calendar documents that reference a menu which no longer exists.
    pub async fn find_dangling(store: &dyn DocumentStore) -> Result<Vec<CalendarEntryDoc>, StoreError> {
        let menu_ids: HashSet<String> = store
            .list_menus()
            .await?
            .into_iter()
            .map(|menu| menu.id)
            .collect();
        let docs = store.list_calendar_entries().await?;
        Ok(docs
            .into_iter()
            .filter(|doc| !menu_ids.contains(&doc.menu_id))
            .collect())
    }

    /// Delete dangling calendar documents; returns how many were found.
    pub async fn prune_dangling(store: &dyn DocumentStore, dry_run: bool) -> anyhow::Result<usize> {
        let dangling = Self::find_dangling(store).await?;
        for doc in &dangling {
            if dry_run {
                info!(entry_id = %doc.id, menu_id = %doc.menu_id, date = %doc.date, "Would delete dangling entry");
            } else {
                Self::delete_entry(store, &doc.id).await?;
            }
        }
        Ok(dangling.len())
    }
}
