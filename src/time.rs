// Copyright  (C) 2020, Kisio Digital and/or its affiliates. All rights reserved.
//
// This file is part of Navitia,
// the software to build cool stuff with public transport.
//
// Hope you'll enjoy and contribute to this project,
// powered by Kisio Digital (www.kisio.com).
// Help us simplify mobility and open public transport:
// a non ending quest to the responsive locomotion way of traveling!
//
// This contribution is a part of the research and development work of the
// IVA Project which aims to enhance traveler information and is carried out
// under the leadership of the Technological Research Institute SystemX,
// with the partnership and support of the transport organization authority
// Ile-De-France Mobilités (IDFM), SNCF, and public funds
// under the scope of the French Program "Investissements d’Avenir".
//
// LICENCE: This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
//
// Stay tuned using
// twitter @navitia
// channel `#navitia` on riot https://riot.im/app/#/room/#navitia:matrix.org
// https://groups.google.com/d/forum/navitia
// www.navitia.io

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::{Display, Formatter};

pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// A point in time of the dataset : a day offset since the first date of the
/// calendar, and a number of seconds since midnight of that day.
///
/// The ordering is lexicographic on (date, seconds). Two sentinels bound the
/// whole range : `DateTime::MIN` is before every reachable instant, and
/// `DateTime::INF` after every reachable instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTime {
    date: u16,
    seconds: u32, // in [0, SECONDS_PER_DAY)
}

impl DateTime {
    pub const MIN: DateTime = DateTime {
        date: 0,
        seconds: 0,
    };

    pub const INF: DateTime = DateTime {
        date: u16::MAX,
        seconds: SECONDS_PER_DAY - 1,
    };

    pub fn new(date: u16, seconds: u32) -> Self {
        Self {
            date: date + (seconds / SECONDS_PER_DAY) as u16,
            seconds: seconds % SECONDS_PER_DAY,
        }
    }

    pub fn date(&self) -> u16 {
        self.date
    }

    pub fn seconds_of_day(&self) -> u32 {
        self.seconds
    }

    /// Rolls the instant forward so that its seconds-of-day equals `seconds`,
    /// advancing the date when the target is earlier in the day.
    pub fn update(&mut self, seconds: u32) {
        let seconds = seconds % SECONDS_PER_DAY;
        if seconds < self.seconds {
            self.date += 1;
        }
        self.seconds = seconds;
    }

    /// Rolls the instant backward so that its seconds-of-day equals `seconds`,
    /// moving to the previous date when the target is later in the day.
    /// Saturates at `DateTime::MIN`.
    pub fn update_reverse(&mut self, seconds: u32) {
        let seconds = seconds % SECONDS_PER_DAY;
        if seconds > self.seconds {
            if self.date == 0 {
                *self = Self::MIN;
                return;
            }
            self.date -= 1;
        }
        self.seconds = seconds;
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::MIN || *self == Self::INF
    }

    fn total_seconds(&self) -> u64 {
        u64::from(self.date) * u64::from(SECONDS_PER_DAY) + u64::from(self.seconds)
    }
}

impl std::ops::Add<PositiveDuration> for DateTime {
    type Output = Self;

    fn add(self, rhs: PositiveDuration) -> Self::Output {
        if self == Self::INF {
            return self;
        }
        let total = self.seconds + rhs.seconds;
        Self {
            date: self.date + (total / SECONDS_PER_DAY) as u16,
            seconds: total % SECONDS_PER_DAY,
        }
    }
}

impl std::ops::Sub<PositiveDuration> for DateTime {
    type Output = Self;

    fn sub(self, rhs: PositiveDuration) -> Self::Output {
        if self == Self::MIN {
            return self;
        }
        let total = self.total_seconds() as i64 - i64::from(rhs.seconds);
        if total <= 0 {
            return Self::MIN;
        }
        Self {
            date: (total as u64 / u64::from(SECONDS_PER_DAY)) as u16,
            seconds: (total as u64 % u64::from(SECONDS_PER_DAY)) as u32,
        }
    }
}

impl std::ops::Sub for DateTime {
    type Output = PositiveDuration;

    fn sub(self, rhs: Self) -> Self::Output {
        debug_assert!(rhs <= self);
        let seconds = self.total_seconds().saturating_sub(rhs.total_seconds());
        PositiveDuration {
            seconds: seconds as u32,
        }
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if *self == Self::MIN {
            return write!(f, "min");
        }
        if *self == Self::INF {
            return write!(f, "inf");
        }
        write!(
            f,
            "day {} {:02}:{:02}:{:02}",
            self.date,
            self.seconds / 60 / 60,
            self.seconds / 60 % 60,
            self.seconds % 60
        )
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy, Ord, PartialOrd)]
pub struct PositiveDuration {
    pub(crate) seconds: u32,
}

impl PositiveDuration {
    pub fn zero() -> Self {
        Self { seconds: 0 }
    }

    pub const fn from_seconds(seconds: u32) -> Self {
        Self { seconds }
    }

    pub const fn from_hms(hours: u32, minutes: u32, seconds: u32) -> PositiveDuration {
        let total_seconds = seconds + 60 * minutes + 60 * 60 * hours;
        PositiveDuration {
            seconds: total_seconds,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.seconds as u64
    }
}

impl Display for PositiveDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let hours = self.seconds / (60 * 60);
        let minutes_in_secs = self.seconds % (60 * 60);
        let minutes = minutes_in_secs / 60;
        let seconds = minutes_in_secs % 60;
        if hours != 0 {
            write!(f, "{}h{:02}m{:02}s", hours, minutes, seconds)
        } else if minutes != 0 {
            write!(f, "{}m{:02}s", minutes, seconds)
        } else {
            write!(f, "{}s", seconds)
        }
    }
}

#[derive(Debug)]
pub struct DurationParseError {
    text: String,
}

impl Display for DurationParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bad duration given : `{}`, expected `hh:mm:ss`",
            self.text
        )
    }
}

impl std::error::Error for DurationParseError {}

impl std::str::FromStr for PositiveDuration {
    type Err = DurationParseError;

    // parses hh:mm:ss, where hh may exceed 24
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || DurationParseError {
            text: s.to_string(),
        };
        let mut fields = s.split(':');
        let hours: u32 = fields.next().ok_or_else(error)?.parse().map_err(|_| error())?;
        let minutes: u32 = fields.next().ok_or_else(error)?.parse().map_err(|_| error())?;
        let seconds: u32 = fields.next().ok_or_else(error)?.parse().map_err(|_| error())?;
        if fields.next().is_some() || minutes >= 60 || seconds >= 60 {
            return Err(error());
        }
        Ok(PositiveDuration::from_hms(hours, minutes, seconds))
    }
}

impl<'de> serde::Deserialize<'de> for PositiveDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl std::ops::Add for PositiveDuration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            seconds: self.seconds + rhs.seconds,
        }
    }
}

impl std::ops::Mul<u32> for PositiveDuration {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        PositiveDuration {
            seconds: self.seconds * rhs,
        }
    }
}

/// The validity period of the dataset. Anchors the day offsets carried by
/// `DateTime` to real dates.
#[derive(Debug, Clone)]
pub struct Calendar {
    first_date: NaiveDate, // first date which may be allowed
    nb_of_days: u16,       // == (last_date - first_date).num_days() + 1
}

impl Calendar {
    pub fn new(first_date: NaiveDate, last_date: NaiveDate) -> Self {
        assert!(first_date <= last_date);
        let nb_of_days = (last_date - first_date).num_days() + 1;
        assert!(nb_of_days <= u16::MAX as i64);
        Self {
            first_date,
            nb_of_days: nb_of_days as u16,
        }
    }

    pub fn first_date(&self) -> NaiveDate {
        self.first_date
    }

    pub fn nb_of_days(&self) -> u16 {
        self.nb_of_days
    }

    pub fn date_to_offset(&self, date: NaiveDate) -> Option<u16> {
        let offset = (date - self.first_date).num_days();
        if offset < 0 || offset >= i64::from(self.nb_of_days) {
            None
        } else {
            Some(offset as u16)
        }
    }

    pub fn offset_to_date(&self, offset: u16) -> NaiveDate {
        self.first_date + chrono::Duration::days(i64::from(offset))
    }

    pub fn from_naive_datetime(&self, datetime: NaiveDateTime) -> Option<DateTime> {
        let offset = self.date_to_offset(datetime.date())?;
        let seconds = datetime
            .time()
            .signed_duration_since(NaiveTime::from_hms(0, 0, 0));
        Some(DateTime::new(offset, seconds.num_seconds() as u32))
    }

    pub fn to_naive_datetime(&self, datetime: &DateTime) -> NaiveDateTime {
        let date = self.offset_to_date(datetime.date());
        let seconds = datetime.seconds_of_day();
        date.and_hms(seconds / 3600, seconds / 60 % 60, seconds % 60)
    }
}
