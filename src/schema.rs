use derive_more::{AsRef, Display, From};
use serde::Serialize;
use typed_builder::TypedBuilder;

use crate::date::MonthDay;

/// Placeholder for a course whose venue row is missing.
pub const UNKNOWN_VENUE: &str = "不明";

#[derive(Clone, PartialEq, Eq, Debug, From, AsRef, Display, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct SessionNumber(String);

#[derive(Clone, PartialEq, Eq, Debug, From, AsRef, Display, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct CourseName(String);

#[derive(Clone, PartialEq, Eq, Debug, From, AsRef, Display, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Venue(String);

impl Venue {
    pub fn unknown() -> Self {
        Self(UNKNOWN_VENUE.to_owned())
    }
}

/// One row of the output: a single date of a single course.
///
/// Field order is the column order of the exported file.
#[derive(Clone, PartialEq, Eq, Debug, TypedBuilder, Serialize)]
pub struct Record {
    #[serde(rename = "No.")]
    pub session_number: SessionNumber,
    #[serde(rename = "講座名")]
    pub course_name: CourseName,
    #[serde(rename = "実施場所")]
    pub venue: Venue,
    #[serde(rename = "実施日")]
    pub raw_date: String,
    #[serde(rename = "実施日英語")]
    pub normalized_date: Option<MonthDay>,
}

impl Record {
    pub const HEADERS: [&'static str; 5] = ["No.", "講座名", "実施場所", "実施日", "実施日英語"];
}

#[cfg(test)]
mod tests {
    use super::Record;

    #[test]
    fn test_headers_match_serialized_names() {
        let record = Record::builder()
            .session_number("1".to_owned().into())
            .course_name("A".to_owned().into())
            .venue("V".to_owned().into())
            .raw_date("1/2".to_owned())
            .normalized_date(None)
            .build();
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(&record).unwrap();
        let written = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(written.lines().next(), Some(Record::HEADERS.join(",").as_str()));
    }
}
