//! Timestamp format strings in the `yyyy-MM-dd HH:mm:ss` family.
//!
//! | Pattern | Output |
//! |---------|--------|
//! | `yyyy` `yy` `y` | year, 2-digit year, year without padding |
//! | `MMMM` `MMM` `MM` `M` | month name, abbreviation, padded, plain |
//! | `dddd` `ddd` `dd` `d` | weekday name, abbreviation, padded day, plain day |
//! | `HH` `H` / `hh` `h` | 24-hour / 12-hour clock |
//! | `mm` `m` `ss` `s` | minutes, seconds |
//! | `f`..`fffffff` | fraction digits |
//! | `F`..`FFFFFFF` | fraction digits, trailing zeros dropped |
//! | `tt` `t` | `AM`/`PM`, `A`/`P` |
//! | `zzz` `zz` `z` `K` | UTC offset `+02:00`, `+02`, `+2`, `+02:00` |
//! | `'text'` `"text"` `\c` | literals |
//!
//! A format of a single letter selects a standard pattern:
//! `o`/`O` round-trip, `s` sortable, `u` universal sortable, `d` short date,
//! `D` long date, `t`/`T` short/long time, `g`/`G` general, `r`/`R` RFC 1123.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};

/// Format used for `{Timestamp}` without a format string.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "yyyy-MM-dd HH:mm:ss.fff zzz";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Formats `timestamp` with a standard or custom pattern.
pub fn format_timestamp(timestamp: &DateTime<FixedOffset>, format: &str) -> String {
    let mut chars = format.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        match letter {
            'o' | 'O' => return round_trip(timestamp),
            's' => return custom(timestamp, "yyyy'-'MM'-'dd'T'HH':'mm':'ss"),
            'u' => {
                let utc = timestamp.with_timezone(&Utc).fixed_offset();
                return custom(&utc, "yyyy'-'MM'-'dd HH':'mm':'ss'Z'");
            }
            'd' => return custom(timestamp, "MM/dd/yyyy"),
            'D' => return custom(timestamp, "dddd, dd MMMM yyyy"),
            't' => return custom(timestamp, "HH:mm"),
            'T' => return custom(timestamp, "HH:mm:ss"),
            'g' => return custom(timestamp, "MM/dd/yyyy HH:mm"),
            'G' => return custom(timestamp, "MM/dd/yyyy HH:mm:ss"),
            'r' | 'R' => {
                let utc = timestamp.with_timezone(&Utc).fixed_offset();
                return custom(&utc, "ddd, dd MMM yyyy HH':'mm':'ss 'GMT'");
            }
            _ => {}
        }
    }
    custom(timestamp, format)
}

/// The round-trip form: `2024-03-05T14:07:09.1230000+02:00`.
pub fn round_trip(timestamp: &DateTime<FixedOffset>) -> String {
    custom(timestamp, "yyyy'-'MM'-'dd'T'HH':'mm':'ss.fffffffzzz")
}

fn custom(ts: &DateTime<FixedOffset>, format: &str) -> String {
    let chars: Vec<char> = format.chars().collect();
    let mut out = String::with_capacity(format.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let run = chars[i..].iter().take_while(|&&x| x == c).count();

        match c {
            'y' => {
                let year = ts.year();
                match run {
                    1 => out.push_str(&(year % 100).to_string()),
                    2 => out.push_str(&format!("{:02}", year % 100)),
                    n => out.push_str(&format!("{:0n$}", year, n = n)),
                }
            }
            'M' => {
                let month = ts.month() as usize;
                match run {
                    1 => out.push_str(&month.to_string()),
                    2 => out.push_str(&format!("{:02}", month)),
                    3 => out.push_str(&MONTHS[month - 1][..3]),
                    _ => out.push_str(MONTHS[month - 1]),
                }
            }
            'd' => {
                let weekday = DAYS[ts.weekday().num_days_from_monday() as usize];
                match run {
                    1 => out.push_str(&ts.day().to_string()),
                    2 => out.push_str(&format!("{:02}", ts.day())),
                    3 => out.push_str(&weekday[..3]),
                    _ => out.push_str(weekday),
                }
            }
            'H' => pad(&mut out, ts.hour(), run),
            'h' => {
                let hour = match ts.hour() % 12 {
                    0 => 12,
                    h => h,
                };
                pad(&mut out, hour, run);
            }
            'm' => pad(&mut out, ts.minute(), run),
            's' => pad(&mut out, ts.second(), run),
            'f' | 'F' => {
                let digits = format!("{:09}", ts.nanosecond().min(999_999_999));
                let fraction = &digits[..run.min(9)];
                if c == 'f' {
                    out.push_str(fraction);
                } else {
                    out.push_str(fraction.trim_end_matches('0'));
                }
            }
            't' => {
                let marker = if ts.hour() < 12 { "AM" } else { "PM" };
                out.push_str(if run == 1 { &marker[..1] } else { marker });
            }
            'z' => {
                let offset = ts.offset().local_minus_utc();
                let sign = if offset < 0 { '-' } else { '+' };
                let hours = offset.abs() / 3600;
                let minutes = offset.abs() % 3600 / 60;
                match run {
                    1 => out.push_str(&format!("{}{}", sign, hours)),
                    2 => out.push_str(&format!("{}{:02}", sign, hours)),
                    _ => out.push_str(&format!("{}{:02}:{:02}", sign, hours, minutes)),
                }
            }
            'K' => {
                out.push_str(&custom(ts, "zzz"));
                i += 1;
                continue;
            }
            '\'' | '"' => {
                let end = chars[i + 1..]
                    .iter()
                    .position(|&x| x == c)
                    .map_or(chars.len(), |p| i + 1 + p);
                out.extend(&chars[i + 1..end]);
                i = end + 1;
                continue;
            }
            '\\' => {
                if let Some(&next) = chars.get(i + 1) {
                    out.push(next);
                }
                i += 2;
                continue;
            }
            '%' => {
                i += 1;
                continue;
            }
            other => {
                out.push(other);
                i += 1;
                continue;
            }
        }
        i += run;
    }

    out
}

fn pad(out: &mut String, value: u32, run: usize) {
    if run == 1 {
        out.push_str(&value.to_string());
    } else {
        out.push_str(&format!("{:02}", value));
    }
}
