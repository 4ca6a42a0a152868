//! Extraction of course schedule records from the training course list page.
//!
//! The page is a table in which each course occupies a run of sibling rows:
//!
//! ```text
//! <tr class="kamokuName"> … <a>course name</a> … </tr>
//! <tr class="kouName"><td>venue</td></tr>
//! <tr class="nendo"><td>令和6年度 No.１２</td></tr>
//! <tr><td class="table-th">実施日(曜日)</td><td>１０／１(火)、１０／８(火)</td></tr>
//! ```
//!
//! Rows are first classified one by one into [`ParsedRow`]s, and then
//! [`extract_records`] walks them in order, keeping track of the group
//! currently being assembled.

use std::iter;

use log::{debug, warn};
use scraper::{ElementRef, Html};

use crate::{
    date::normalize,
    schema::{CourseName, Record, SessionNumber, Venue},
};

/// Text of the header cell that precedes the list of dates.
pub const DATE_HEADER: &str = "実施日(曜日)";

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RowMarker {
    /// `tr.kamokuName` with a link in it.
    CourseName(CourseName),
    /// `tr.kouName` with at least one cell.
    Venue(Venue),
    /// `tr.nendo` with at least one cell.
    Session(SessionNumber),
    Plain,
}

/// The `実施日(曜日)` cell of a row.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DateCell {
    Absent,
    /// The header cell is there but no value cell follows it.
    HeaderOnly,
    Dates(Vec<String>),
}

/// What the extractor needs to know about a single table row.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParsedRow {
    pub marker: RowMarker,
    pub dates: DateCell,
}

impl ParsedRow {
    pub fn parse(row: ElementRef) -> Self {
        Self {
            marker: parse_marker(row),
            dates: parse_dates(row),
        }
    }
}

fn first_cell_text(row: ElementRef) -> Option<String> {
    let cell = row.select(selector!("td")).next()?;
    Some(cell.text().collect::<String>().trim().to_owned())
}

fn parse_marker(row: ElementRef) -> RowMarker {
    if selector!("tr.kamokuName").matches(&row) {
        match row.select(selector!("a")).next() {
            Some(a) => {
                RowMarker::CourseName(a.text().collect::<String>().trim().to_owned().into())
            }
            None => RowMarker::Plain,
        }
    } else if selector!("tr.kouName").matches(&row) {
        first_cell_text(row).map_or(RowMarker::Plain, |venue| RowMarker::Venue(venue.into()))
    } else if selector!("tr.nendo").matches(&row) {
        first_cell_text(row).map_or(RowMarker::Plain, |text| {
            RowMarker::Session(parse_session_number(&text))
        })
    } else {
        RowMarker::Plain
    }
}

/// `令和6年度 No.１２` → `12`
pub fn parse_session_number(text: &str) -> SessionNumber {
    let tail = text.rsplit("No.").next().unwrap_or(text);
    crate::date::to_half_width(tail.trim()).into()
}

/// The header cell text must equal `実施日(曜日)` as is, without trimming.
fn parse_dates(row: ElementRef) -> DateCell {
    let Some(header) = row
        .select(selector!("td.table-th"))
        .find(|cell| cell.text().collect::<String>() == DATE_HEADER)
    else {
        return DateCell::Absent;
    };
    header
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "td")
        .map_or(DateCell::HeaderOnly, |value| {
            DateCell::Dates(split_dates(&value.text().collect::<String>()))
        })
}

/// Splits a list of dates joined by `、`.  An empty cell gives a single empty token.
pub fn split_dates(text: &str) -> Vec<String> {
    text.trim()
        .split('、')
        .map(|date| date.trim().to_owned())
        .collect()
}

enum GroupState {
    Idle,
    Course {
        name: CourseName,
        venue: Option<Venue>,
    },
    AwaitingDates {
        name: CourseName,
        venue: Venue,
        session: SessionNumber,
    },
}

/// Turns a run of sibling rows into records.
///
/// A group is a course row, optionally followed by a venue row, then a session
/// row, which must be directly followed by the date row.  Unrelated rows may sit
/// between the course row and the session row.  A group that is interrupted by the
/// next course row before its session row yields nothing.
pub fn extract_records(rows: impl IntoIterator<Item = ParsedRow>) -> Vec<Record> {
    let mut records = vec![];
    let mut state = GroupState::Idle;
    for row in rows {
        if let GroupState::AwaitingDates {
            name,
            venue,
            session,
        } = state
        {
            match row.dates {
                DateCell::Dates(ref dates) => {
                    debug!("Dates of {name}: {dates:?}");
                    push_records(&mut records, &name, &venue, &session, dates);
                }
                DateCell::HeaderOnly => {
                    warn!("The date header cell of {name} has no value cell next to it")
                }
                DateCell::Absent => warn!("The date cell was not found for {name}"),
            }
            state = GroupState::Idle;
        }
        state = match (state, row.marker) {
            (state, RowMarker::CourseName(name)) => {
                if let GroupState::Course { name: orphan, .. } = state {
                    warn!("The No. row was not found for {orphan}");
                }
                debug!("Course: {name}");
                GroupState::Course { name, venue: None }
            }
            (GroupState::Course { name, venue: None }, RowMarker::Venue(venue)) => {
                debug!("Venue of {name}: {venue}");
                GroupState::Course {
                    name,
                    venue: Some(venue),
                }
            }
            (GroupState::Course { name, venue }, RowMarker::Session(session)) => {
                debug!("No. of {name}: {session}");
                GroupState::AwaitingDates {
                    name,
                    venue: venue.unwrap_or_else(Venue::unknown),
                    session,
                }
            }
            (state, _) => state,
        };
    }
    match state {
        GroupState::Idle => {}
        GroupState::Course { name, .. } => warn!("The No. row was not found for {name}"),
        GroupState::AwaitingDates { name, .. } => warn!("The date row was not found for {name}"),
    }
    records
}

fn push_records(
    records: &mut Vec<Record>,
    name: &CourseName,
    venue: &Venue,
    session: &SessionNumber,
    dates: &[String],
) {
    records.extend(dates.iter().map(|date| {
        Record::builder()
            .session_number(session.clone())
            .course_name(name.clone())
            .venue(venue.clone())
            .raw_date(date.trim().to_owned())
            .normalized_date(normalize(date))
            .build()
    }));
    debug!("Added {} rows for {name}", dates.len());
}

/// Names of every course row that carries a link, in document order.
pub fn course_names(html: &Html) -> Vec<CourseName> {
    html.select(selector!("tr.kamokuName"))
        .filter_map(|row| row.select(selector!("a")).next())
        .map(|a| a.text().collect::<String>().trim().to_owned().into())
        .collect()
}

/// A course row followed by its sibling rows, up to the next course row.
fn group_rows<'a>(course_row: ElementRef<'a>) -> impl Iterator<Item = ParsedRow> + 'a {
    let following = course_row
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "tr")
        .map(ParsedRow::parse)
        .take_while(|row| !matches!(row.marker, RowMarker::CourseName(_)));
    iter::once(ParsedRow::parse(course_row)).chain(following)
}

/// Extracts every record in the document, in the order of the course rows.
///
/// Each course row is followed through its own siblings, so courses in nested
/// tables keep their place in the document.
pub fn parse(html: &Html) -> Vec<Record> {
    html.select(selector!("tr.kamokuName"))
        .filter(|row| row.select(selector!("a")).next().is_some())
        .flat_map(|row| extract_records(group_rows(row)))
        .collect()
}
