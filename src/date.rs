use std::fmt::{self, Display};

use regex::Captures;
use serde::{Serialize, Serializer};

/// Replaces full-width digits (`０`-`９`) and the full-width slash (`／`)
/// with their ASCII counterparts.  Every other character is kept as is.
pub fn to_half_width(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
            '／' => '/',
            c => c,
        })
        .collect()
}

/// A calendar day without a year, shown as `MM/DD`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct MonthDay {
    month: u8,
    day: u8,
}

impl MonthDay {
    /// Both captures must be runs of one or two ASCII digits.
    fn from_captures(captures: &Captures, month: usize, day: usize) -> Option<Self> {
        let parse = |i: usize| -> Option<u8> {
            let s = captures.get(i)?.as_str();
            (1..=2).contains(&s.len()).then(|| s.parse().ok())?
        };
        Some(Self {
            month: parse(month)?,
            day: parse(day)?,
        })
    }
}

impl Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.day)
    }
}

impl Serialize for MonthDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Extracts the month and day from a free-form date such as
/// `２０２４／１２／１日(月)`, `1/2` or `3月5日`.
///
/// Patterns are tried in order: `YYYY/M/D`, `M/D`, then `M月D日`;
/// the first one found anywhere in the text wins.
pub fn normalize(date: &str) -> Option<MonthDay> {
    let date = to_half_width(date);
    if let Some(captures) = regex!(r"([0-9]{4})/([0-9]{1,2})/([0-9]{1,2})").captures(&date) {
        return MonthDay::from_captures(&captures, 2, 3);
    }
    if let Some(captures) = regex!(r"([0-9]{1,2})/([0-9]{1,2})").captures(&date) {
        return MonthDay::from_captures(&captures, 1, 2);
    }
    let captures = regex!(r"([0-9]+)月([0-9]+)日").captures(&date)?;
    MonthDay::from_captures(&captures, 1, 2)
}
