//! Date normalization.
//!
//! Raw date tokens are tried against an ordered table of format parsers;
//! the first parser that matches wins. Numeric dates without an unambiguous
//! layout are interpreted month-first: `03/04/2021` is March 4th. This is a
//! documented policy, not a guess.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::CanonicalDate;

/// Result of normalizing one raw token: either a calendar date or the
/// Present/Current sentinel for open-ended ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateToken {
    Date(CanonicalDate),
    Present,
}

impl DateToken {
    pub fn as_date(self) -> Option<CanonicalDate> {
        match self {
            DateToken::Date(d) => Some(d),
            DateToken::Present => None,
        }
    }
}

/// The supported date format families, in default priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// `January 2020`, `Jan. 2020`
    MonthNameYear,
    /// `01/2020`, `01-2020`
    NumericMonthYear,
    /// `03/04/2021` (month-first), two-digit years accepted
    FullNumericDate,
    /// `2021-03-04`
    IsoDate,
    /// `Q2 2020`
    QuarterYear,
    /// `Spring 2020`
    SeasonYear,
    /// `2020`
    BareYear,
}

const DEFAULT_ORDER: &[DateFormat] = &[
    DateFormat::MonthNameYear,
    DateFormat::NumericMonthYear,
    DateFormat::FullNumericDate,
    DateFormat::IsoDate,
    DateFormat::QuarterYear,
    DateFormat::SeasonYear,
    DateFormat::BareYear,
];

static PRESENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:present|current(?:ly)?|ongoing|now|today|till\s+date|to\s+date)\b")
        .unwrap()
});

static MONTH_NAME_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{4})\b")
        .unwrap()
});

// The leading/trailing guards keep this from claiming the middle of a full
// MM/DD/YYYY date.
static NUMERIC_MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^0-9/-])(\d{1,2})[/-](\d{4})(?:$|[^0-9/-])").unwrap());

static FULL_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{2,4})\b").unwrap());

static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").unwrap());

static QUARTER_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bq([1-4])\s*(\d{4})\b").unwrap());

static SEASON_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(spring|summer|fall|autumn|winter)\s+(\d{4})\b").unwrap());

static BARE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").unwrap());

fn month_number(name: &str) -> Option<u8> {
    let prefix: String = name.to_lowercase().chars().take(3).collect();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn season_month(name: &str) -> u8 {
    match name.to_lowercase().as_str() {
        "spring" => 3,
        "summer" => 6,
        "fall" | "autumn" => 9,
        _ => 12,
    }
}

fn plausible_year(year: u16) -> bool {
    (1900..=2100).contains(&year)
}

/// Normalizes raw date tokens via the ordered format table.
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    formats: Vec<DateFormat>,
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl DateNormalizer {
    pub fn new() -> Self {
        Self { formats: DEFAULT_ORDER.to_vec() }
    }

    /// Builds a normalizer that tries `hints` first, then the remaining
    /// default formats in their usual order.
    pub fn with_hints(hints: &[DateFormat]) -> Self {
        let mut formats: Vec<DateFormat> = hints.to_vec();
        for format in DEFAULT_ORDER {
            if !formats.contains(format) {
                formats.push(*format);
            }
        }
        Self { formats }
    }

    /// Parses one raw token. The Present sentinel is recognized before any
    /// format parser runs and is never handed to them.
    pub fn parse(&self, raw: &str) -> Option<DateToken> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if PRESENT.is_match(raw) {
            return Some(DateToken::Present);
        }
        for format in &self.formats {
            if let Some(date) = Self::try_format(*format, raw) {
                return Some(DateToken::Date(date));
            }
        }
        None
    }

    /// Like [`parse`](Self::parse) but only accepts calendar dates.
    pub fn parse_date(&self, raw: &str) -> Option<CanonicalDate> {
        self.parse(raw).and_then(DateToken::as_date)
    }

    fn try_format(format: DateFormat, raw: &str) -> Option<CanonicalDate> {
        match format {
            DateFormat::MonthNameYear => {
                let caps = MONTH_NAME_YEAR.captures(raw)?;
                let month = month_number(caps.get(1)?.as_str())?;
                let year: u16 = caps.get(2)?.as_str().parse().ok()?;
                plausible_year(year).then(|| CanonicalDate::year_month(year, month))
            }
            DateFormat::NumericMonthYear => {
                let caps = NUMERIC_MONTH_YEAR.captures(raw)?;
                let month: u8 = caps.get(1)?.as_str().parse().ok()?;
                let year: u16 = caps.get(2)?.as_str().parse().ok()?;
                ((1..=12).contains(&month) && plausible_year(year))
                    .then(|| CanonicalDate::year_month(year, month))
            }
            DateFormat::FullNumericDate => {
                let caps = FULL_NUMERIC.captures(raw)?;
                let month: u8 = caps.get(1)?.as_str().parse().ok()?;
                let day: u8 = caps.get(2)?.as_str().parse().ok()?;
                let mut year: u16 = caps.get(3)?.as_str().parse().ok()?;
                if year < 100 {
                    year += if year < 50 { 2000 } else { 1900 };
                }
                ((1..=12).contains(&month) && (1..=31).contains(&day) && plausible_year(year))
                    .then(|| CanonicalDate::full(year, month, day))
            }
            DateFormat::IsoDate => {
                let caps = ISO_DATE.captures(raw)?;
                let year: u16 = caps.get(1)?.as_str().parse().ok()?;
                let month: u8 = caps.get(2)?.as_str().parse().ok()?;
                let day: u8 = caps.get(3)?.as_str().parse().ok()?;
                ((1..=12).contains(&month) && (1..=31).contains(&day) && plausible_year(year))
                    .then(|| CanonicalDate::full(year, month, day))
            }
            DateFormat::QuarterYear => {
                let caps = QUARTER_YEAR.captures(raw)?;
                let quarter: u8 = caps.get(1)?.as_str().parse().ok()?;
                let year: u16 = caps.get(2)?.as_str().parse().ok()?;
                plausible_year(year)
                    .then(|| CanonicalDate::year_month(year, (quarter - 1) * 3 + 1))
            }
            DateFormat::SeasonYear => {
                let caps = SEASON_YEAR.captures(raw)?;
                let month = season_month(caps.get(1)?.as_str());
                let year: u16 = caps.get(2)?.as_str().parse().ok()?;
                plausible_year(year).then(|| CanonicalDate::year_month(year, month))
            }
            DateFormat::BareYear => {
                let caps = BARE_YEAR.captures(raw)?;
                let year: u16 = caps.get(1)?.as_str().parse().ok()?;
                Some(CanonicalDate::year(year))
            }
        }
    }

    /// Extracts a `start - end` range from free text. A lone date yields
    /// `(Some(start), None)`.
    pub fn extract_range(&self, text: &str) -> (Option<DateToken>, Option<DateToken>) {
        static MMYYYY_RANGE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)(\d{1,2}[/-]\d{4})\s*[-–—]\s*(\d{1,2}[/-]\d{4}|present|current)")
                .unwrap()
        });
        static YEAR_RANGE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)\b(\d{4})\s*[-–—]\s*(\d{4}|present|current)\b").unwrap()
        });
        static WORD_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)\s+(?:-|–|—|to|through|until)\s+|\s*[–—]\s*").unwrap()
        });

        if let Some(caps) = MMYYYY_RANGE.captures(text) {
            return (self.parse(&caps[1]), self.parse(&caps[2]));
        }
        if let Some(m) = WORD_SEPARATOR.find(text) {
            let start = self.parse(&text[..m.start()]);
            let end = self.parse(&text[m.end()..]);
            if start.is_some() || end.is_some() {
                return (start, end);
            }
        }
        // Unspaced year ranges ("2019-2021") that the spaced separator missed.
        if let Some(caps) = YEAR_RANGE.captures(text) {
            return (self.parse(&caps[1]), self.parse(&caps[2]));
        }
        (self.parse(text), None)
    }

    /// True when the text marks an ongoing position.
    pub fn is_current(text: &str) -> bool {
        PRESENT.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates() -> DateNormalizer {
        DateNormalizer::new()
    }

    #[test]
    fn test_month_name_year() {
        assert_eq!(
            dates().parse_date("January 2020"),
            Some(CanonicalDate::year_month(2020, 1))
        );
        assert_eq!(
            dates().parse_date("Sept. 2019"),
            Some(CanonicalDate::year_month(2019, 9))
        );
    }

    #[test]
    fn test_numeric_month_year() {
        assert_eq!(dates().parse_date("03/2021"), Some(CanonicalDate::year_month(2021, 3)));
        assert_eq!(dates().parse_date("11-2018"), Some(CanonicalDate::year_month(2018, 11)));
    }

    #[test]
    fn test_full_numeric_is_month_first() {
        assert_eq!(dates().parse_date("03/04/2021"), Some(CanonicalDate::full(2021, 3, 4)));
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(dates().parse_date("2021-03-04"), Some(CanonicalDate::full(2021, 3, 4)));
    }

    #[test]
    fn test_season_differs_from_bare_year() {
        let season = dates().parse_date("Spring 2020").expect("season should parse");
        let bare = dates().parse_date("2020").expect("year should parse");
        assert_eq!(season, CanonicalDate::year_month(2020, 3));
        assert_ne!(season, bare);
    }

    #[test]
    fn test_quarter() {
        assert_eq!(dates().parse_date("Q3 2022"), Some(CanonicalDate::year_month(2022, 7)));
    }

    #[test]
    fn test_present_sentinel() {
        assert_eq!(dates().parse("Present"), Some(DateToken::Present));
        assert_eq!(dates().parse("current"), Some(DateToken::Present));
        assert!(DateNormalizer::is_current("Jan 2020 - Present"));
    }

    #[test]
    fn test_implausible_inputs() {
        assert_eq!(dates().parse("not a date"), None);
        assert_eq!(dates().parse(""), None);
        assert_eq!(dates().parse_date("13/2020"), None);
        assert_eq!(dates().parse_date("1850"), None);
    }

    #[test]
    fn test_extract_range() {
        let (start, end) = dates().extract_range("January 2020 - Present");
        assert_eq!(start, Some(DateToken::Date(CanonicalDate::year_month(2020, 1))));
        assert_eq!(end, Some(DateToken::Present));

        let (start, end) = dates().extract_range("01/2019 to 06/2020");
        assert_eq!(start.unwrap().as_date(), Some(CanonicalDate::year_month(2019, 1)));
        assert_eq!(end.unwrap().as_date(), Some(CanonicalDate::year_month(2020, 6)));

        let (start, end) = dates().extract_range("Spring 2018");
        assert_eq!(start.unwrap().as_date(), Some(CanonicalDate::year_month(2018, 3)));
        assert_eq!(end, None);
    }

    #[test]
    fn test_hint_reordering() {
        // With bare-year preferred, "June 2020" still needs the year token,
        // so the hint changes which format claims it first.
        let hinted = DateNormalizer::with_hints(&[DateFormat::BareYear]);
        assert_eq!(hinted.parse_date("June 2020"), Some(CanonicalDate::year(2020)));
        assert_eq!(
            DateNormalizer::new().parse_date("June 2020"),
            Some(CanonicalDate::year_month(2020, 6))
        );
    }
}
