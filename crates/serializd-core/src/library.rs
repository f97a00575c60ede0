use anyhow::{Context, Result};
use serializd_models::{earliest, Library, ListEntry, ShowId, UserContext, WATCHED_LISTS, WATCHLIST_LIST};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// A watchlisted show that appeared with more than one `dateAdded` (e.g. several
/// seasons watchlisted separately) and was collapsed to the earliest one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCollision {
    pub show_id: ShowId,
    pub dates: Vec<String>,
    pub earliest: String,
}

#[derive(Debug, Clone, Default)]
pub struct LibraryReduction {
    pub library: Library,
    pub collisions: Vec<DateCollision>,
}

fn list_entries(name: &str, value: &serde_json::Value) -> Result<Vec<ListEntry>> {
    serde_json::from_value(value.clone()).with_context(|| format!("Malformed '{}' list in user context", name))
}

/// Reduce the user context lists to the watched set and the watchlist.
///
/// Lists with names other than the four watched categories and `watchlist` are ignored.
pub fn build_library(context: &UserContext) -> Result<LibraryReduction> {
    let mut watched = BTreeSet::new();
    let mut watchlist_dates: BTreeMap<ShowId, BTreeSet<String>> = BTreeMap::new();

    for (name, value) in &context.context {
        if WATCHED_LISTS.contains(&name.as_str()) {
            watched.extend(list_entries(name, value)?.into_iter().map(|entry| entry.show_id));
        } else if name == WATCHLIST_LIST {
            for entry in list_entries(name, value)? {
                match entry.date_added {
                    Some(date) => {
                        watchlist_dates.entry(entry.show_id).or_default().insert(date);
                    }
                    None => warn!(show_id = entry.show_id, "Watchlist entry without dateAdded, ignoring"),
                }
            }
        } else {
            debug!(list = %name, "Ignoring unrecognized user context list");
        }
    }

    let mut watchlist = BTreeMap::new();
    let mut collisions = Vec::new();
    for (show_id, dates) in watchlist_dates {
        let Some(first) = earliest(dates.iter().map(String::as_str)).map(str::to_string) else {
            continue;
        };
        if dates.len() > 1 {
            collisions.push(DateCollision {
                show_id,
                dates: dates.iter().cloned().collect(),
                earliest: first.clone(),
            });
        }
        watchlist.insert(show_id, first);
    }

    Ok(LibraryReduction {
        library: Library { watched, watchlist },
        collisions,
    })
}
