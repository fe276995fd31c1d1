use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::models::Record;

/// Column the record list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Description,
    Priority,
    Date,
}

/// Parse a `dd.MM.yyyy` due date for ordering purposes.
/// Unparsable values sort as the earliest possible date instead of failing.
pub fn parse_due_date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw.trim(), "%d.%m.%Y").unwrap_or(NaiveDate::MIN)
}

/// Return a newly ordered copy of `records`.
///
/// `ascending` is the shared direction toggle. It only governs the primary
/// key; the tie-break keys have fixed directions:
///
/// - Id: numeric id.
/// - Description: ordinal text compare.
/// - Priority: rank, then due date (always newest first), then description
///   (always ascending).
/// - Date: due date (toggle on = newest first), then description (always
///   ascending), then priority rank (always ascending).
pub fn sort_records(field: SortField, ascending: bool, records: &[Record]) -> Vec<Record> {
    let mut sorted = records.to_vec();

    match field {
        SortField::Id => {
            sorted.sort_by(|a, b| directed(a.id.cmp(&b.id), ascending));
        }
        SortField::Description => {
            sorted.sort_by(|a, b| directed(a.description.cmp(&b.description), ascending));
        }
        SortField::Priority => {
            sorted.sort_by(|a, b| {
                directed(a.priority.rank().cmp(&b.priority.rank()), ascending)
                    .then_with(|| parse_due_date(&b.due_date).cmp(&parse_due_date(&a.due_date)))
                    .then_with(|| a.description.cmp(&b.description))
            });
        }
        SortField::Date => {
            sorted.sort_by(|a, b| {
                directed(parse_due_date(&b.due_date).cmp(&parse_due_date(&a.due_date)), ascending)
                    .then_with(|| a.description.cmp(&b.description))
                    .then_with(|| a.priority.rank().cmp(&b.priority.rank()))
            });
        }
    }

    sorted
}

fn directed(ord: Ordering, ascending: bool) -> Ordering {
    if ascending { ord } else { ord.reverse() }
}
