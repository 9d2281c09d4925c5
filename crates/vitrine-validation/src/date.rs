// File: src/date.rs
// Purpose: Strict parsing of values against PHP-style date format strings

use chrono::{NaiveDate, NaiveTime};

pub const DEFAULT_DATETIME_FORMAT: &str = "Y-m-d H:i:s";
pub const DEFAULT_DATE_FORMAT: &str = "Y-m-d";

// Components a format leaves out take these values when checking ranges
const FALLBACK_YEAR: i32 = 2000;
const FALLBACK_MONTH: u32 = 1;
const FALLBACK_DAY: u32 = 1;

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

const WEEKDAYS: [&str; 7] = [
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

const MERIDIEMS: [&str; 2] = ["am", "pm"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    /// `d`, `j`
    Day,
    /// `m`, `n`
    Month,
    /// `M`, `F`
    MonthName,
    /// `Y`
    Year,
    /// `y`
    ShortYear,
    /// `D`, `l`
    Weekday,
    /// `H`, `G`
    Hour,
    /// `h`, `g`
    Hour12,
    /// `i`
    Minute,
    /// `s`
    Second,
    /// `A`, `a`
    Meridiem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Field(Field),
    Literal(char),
}

/// Split a PHP-style format (`Y-m-d H:i:s`) into tokens.
///
/// Returns None when the format uses a letter outside the supported set;
/// such formats never match anything.
fn tokenize(format: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::with_capacity(format.len());
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        let field = match c {
            'd' | 'j' => Field::Day,
            'm' | 'n' => Field::Month,
            'M' | 'F' => Field::MonthName,
            'Y' => Field::Year,
            'y' => Field::ShortYear,
            'D' | 'l' => Field::Weekday,
            'H' | 'G' => Field::Hour,
            'h' | 'g' => Field::Hour12,
            'i' => Field::Minute,
            's' => Field::Second,
            'A' | 'a' => Field::Meridiem,
            '\\' => {
                if let Some(next) = chars.next() {
                    tokens.push(Token::Literal(next));
                }
                continue;
            }
            c if c.is_ascii_alphabetic() => return None,
            c => {
                tokens.push(Token::Literal(c));
                continue;
            }
        };
        tokens.push(Token::Field(field));
    }

    Some(tokens)
}

/// Values read from the input, before range checks
#[derive(Debug, Default)]
struct Fields {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    twelve_hour: bool,
    pm: Option<bool>,
    minute: Option<u32>,
    second: Option<u32>,
}

impl Fields {
    fn has_time(&self) -> bool {
        self.hour.is_some() || self.minute.is_some() || self.second.is_some()
    }

    fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            self.year.unwrap_or(FALLBACK_YEAR),
            self.month.unwrap_or(FALLBACK_MONTH),
            self.day.unwrap_or(FALLBACK_DAY),
        )
    }

    fn time(&self) -> Option<NaiveTime> {
        let mut hour = self.hour.unwrap_or(0);
        if self.twelve_hour {
            if !(1..=12).contains(&hour) {
                return None;
            }
            match self.pm {
                Some(true) => hour = hour % 12 + 12,
                Some(false) => hour %= 12,
                None => {}
            }
        }
        NaiveTime::from_hms_opt(hour, self.minute.unwrap_or(0), self.second.unwrap_or(0))
    }
}

/// Consume between `min` and `max` ASCII digits. Signs and whitespace are
/// not digits, so they never start a number.
fn take_digits(rest: &mut &str, min: usize, max: usize) -> Option<u32> {
    let len = rest
        .bytes()
        .take(max)
        .take_while(u8::is_ascii_digit)
        .count();
    if len < min {
        return None;
    }
    let (digits, tail) = rest.split_at(len);
    *rest = tail;
    digits.parse().ok()
}

/// Consume a full or abbreviated name (case-insensitive) and return its index.
fn take_name(rest: &mut &str, names: &[&str], abbrev: usize) -> Option<usize> {
    for (index, &name) in names.iter().enumerate() {
        let short = name.get(..abbrev).unwrap_or(name);
        for candidate in [name, short] {
            let matched = rest
                .get(..candidate.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(candidate));
            if matched {
                *rest = &rest[candidate.len()..];
                return Some(index);
            }
        }
    }
    None
}

fn scan(value: &str, tokens: &[Token]) -> Option<Fields> {
    let mut fields = Fields::default();
    let mut rest = value;

    for token in tokens {
        match *token {
            Token::Literal(c) => rest = rest.strip_prefix(c)?,
            Token::Field(Field::Day) => fields.day = Some(take_digits(&mut rest, 1, 2)?),
            Token::Field(Field::Month) => fields.month = Some(take_digits(&mut rest, 1, 2)?),
            Token::Field(Field::MonthName) => {
                let index = take_name(&mut rest, &MONTHS, 3)?;
                fields.month = Some(index as u32 + 1);
            }
            Token::Field(Field::Year) => {
                fields.year = Some(take_digits(&mut rest, 4, 4)? as i32);
            }
            Token::Field(Field::ShortYear) => {
                let short = take_digits(&mut rest, 2, 2)? as i32;
                fields.year = Some(if short < 70 { 2000 + short } else { 1900 + short });
            }
            // Weekday names are read but not checked against the date
            Token::Field(Field::Weekday) => {
                take_name(&mut rest, &WEEKDAYS, 3)?;
            }
            Token::Field(Field::Hour) => {
                fields.hour = Some(take_digits(&mut rest, 1, 2)?);
                fields.twelve_hour = false;
            }
            Token::Field(Field::Hour12) => {
                fields.hour = Some(take_digits(&mut rest, 1, 2)?);
                fields.twelve_hour = true;
            }
            Token::Field(Field::Minute) => fields.minute = Some(take_digits(&mut rest, 2, 2)?),
            Token::Field(Field::Second) => fields.second = Some(take_digits(&mut rest, 2, 2)?),
            Token::Field(Field::Meridiem) => {
                fields.pm = Some(take_name(&mut rest, &MERIDIEMS, 2)? == 1);
            }
        }
    }

    rest.is_empty().then_some(fields)
}

/// True when `value` is exactly a valid date/time in `format`.
///
/// Missing or trailing characters, unknown format letters, signs or spaces
/// inside numbers and impossible calendar values (Feb 30, hour 25) all fail.
/// Only the components the format names are checked, so `m/Y` accepts
/// `05/2024`.
pub fn matches_format(value: &str, format: &str) -> bool {
    let Some(tokens) = tokenize(format) else {
        return false;
    };
    let Some(fields) = scan(value, &tokens) else {
        return false;
    };

    if fields.date().is_none() {
        return false;
    }
    !fields.has_time() || fields.time().is_some()
}
