use serde::{Deserialize, Serialize};
use time::{Date as TimeDate, Month};

///
/// DateComponent
///
/// The single calendar/clock component a component-wise date
/// comparison inspects.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateComponent {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl DateComponent {
    /// Resolve a component from its lowercase rule-file spelling.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "year" => Some(Self::Year),
            "month" => Some(Self::Month),
            "day" => Some(Self::Day),
            "hour" => Some(Self::Hour),
            "minute" => Some(Self::Minute),
            "second" => Some(Self::Second),
            _ => None,
        }
    }
}

///
/// PartialDate
///
/// An ISO-8601 date-time whose trailing components may be absent:
/// `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `YYYY-MM-DDTHH`, … down to
/// seconds. The year is always present; each further component
/// requires every component before it.
///
/// Calendar validity (days per month, leap years) is enforced when
/// year, month and day are all present.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PartialDate {
    year: i32,
    month: Option<u8>,
    day: Option<u8>,
    hour: Option<u8>,
    minute: Option<u8>,
    second: Option<u8>,
}

impl PartialDate {
    /// Parse a partial ISO-8601 date-time. A trailing `Z` is accepted
    /// and ignored; anything else unconsumed rejects the input.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.strip_suffix('Z').unwrap_or(input);
        let (date_part, time_part) = match input.split_once('T') {
            Some((date, time)) => (date, Some(time)),
            None => (input, None),
        };

        let mut date_segments = date_part.split('-');
        let year = parse_fixed_digits(date_segments.next()?, 4)?;
        let month = match date_segments.next() {
            Some(segment) => Some(u8::try_from(parse_fixed_digits(segment, 2)?).ok()?),
            None => None,
        };
        let day = match date_segments.next() {
            Some(segment) => Some(u8::try_from(parse_fixed_digits(segment, 2)?).ok()?),
            None => None,
        };
        if date_segments.next().is_some() {
            return None;
        }

        match (month, day) {
            (Some(m), Some(d)) => {
                let month = Month::try_from(m).ok()?;
                TimeDate::from_calendar_date(year, month, d).ok()?;
            }
            (Some(m), None) => {
                Month::try_from(m).ok()?;
            }
            (None, _) => {}
        }

        let (hour, minute, second) = match time_part {
            Some(time) => {
                // A clock reading is only meaningful on a full calendar date.
                if day.is_none() {
                    return None;
                }
                parse_clock(time)?
            }
            None => (None, None, None),
        };

        Some(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// True when year, month and day are all present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.month.is_some() && self.day.is_some()
    }

    /// The value of one component, if present.
    #[must_use]
    pub fn component(&self, component: DateComponent) -> Option<i64> {
        match component {
            DateComponent::Year => Some(i64::from(self.year)),
            DateComponent::Month => self.month.map(i64::from),
            DateComponent::Day => self.day.map(i64::from),
            DateComponent::Hour => self.hour.map(i64::from),
            DateComponent::Minute => self.minute.map(i64::from),
            DateComponent::Second => self.second.map(i64::from),
        }
    }
}

fn parse_fixed_digits(segment: &str, width: usize) -> Option<i32> {
    if segment.len() != width || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

#[allow(clippy::type_complexity)]
fn parse_clock(time: &str) -> Option<(Option<u8>, Option<u8>, Option<u8>)> {
    let mut segments = time.split(':');

    let hour = u8::try_from(parse_fixed_digits(segments.next()?, 2)?).ok()?;
    if hour > 23 {
        return None;
    }

    let minute = match segments.next() {
        Some(segment) => {
            let m = u8::try_from(parse_fixed_digits(segment, 2)?).ok()?;
            if m > 59 {
                return None;
            }
            Some(m)
        }
        None => None,
    };

    let second = match segments.next() {
        Some(segment) => {
            if minute.is_none() {
                return None;
            }
            let s = u8::try_from(parse_fixed_digits(segment, 2)?).ok()?;
            if s > 59 {
                return None;
            }
            Some(s)
        }
        None => None,
    };

    if segments.next().is_some() {
        return None;
    }

    Some((Some(hour), minute, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_truncation_level() {
        for input in [
            "2023",
            "2023-06",
            "2023-06-15",
            "2023-06-15T10",
            "2023-06-15T10:30",
            "2023-06-15T10:30:59",
            "2023-06-15T10:30:59Z",
        ] {
            assert!(PartialDate::parse(input).is_some(), "rejected {input}");
        }
    }

    #[test]
    fn rejects_malformed_inputs() {
        for input in [
            "",
            "23",
            "2023-13",
            "2023-02-30",
            "2023-06-15T24",
            "2023-06T10",
            "2023-06-15T10:61",
            "2023-06-15x",
            "not a date",
        ] {
            assert!(PartialDate::parse(input).is_none(), "accepted {input}");
        }
    }

    #[test]
    fn leap_day_validity_follows_the_calendar() {
        assert!(PartialDate::parse("2024-02-29").is_some());
        assert!(PartialDate::parse("2023-02-29").is_none());
    }

    #[test]
    fn completeness_requires_year_month_day() {
        assert!(PartialDate::parse("2023-06-15").unwrap().is_complete());
        assert!(!PartialDate::parse("2023-06").unwrap().is_complete());
        assert!(!PartialDate::parse("2023").unwrap().is_complete());
    }

    #[test]
    fn components_report_presence() {
        let d = PartialDate::parse("2023-06-15T10:30").unwrap();
        assert_eq!(d.component(DateComponent::Year), Some(2023));
        assert_eq!(d.component(DateComponent::Month), Some(6));
        assert_eq!(d.component(DateComponent::Minute), Some(30));
        assert_eq!(d.component(DateComponent::Second), None);
    }
}
