//! Pickup scheduling for claims: the 12-hour picker and its window rules.
//!
//! The picker is entered in the browser's local time. A claim is sent only
//! when the pickup is at least [`MIN_LEAD_MINUTES`] ahead and not after the
//! donation's expiry.

#[cfg(test)]
#[path = "pickup_test.rs"]
mod pickup_test;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};

use crate::util::clock::{format_local, parse_instant};

pub const MIN_LEAD_MINUTES: i64 = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Meridiem {
    #[default]
    Am,
    Pm,
}

impl Meridiem {
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("pm") { Self::Pm } else { Self::Am }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

/// Why a pickup time was refused. The message is shown to the user as is.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PickupError {
    #[error("Please choose a pickup date")]
    MissingDate,
    #[error("Please choose a valid pickup date")]
    InvalidDate,
    #[error("Minute must be between 0 and 59")]
    InvalidMinute,
    #[error("That pickup time does not exist in your time zone")]
    NonexistentLocalTime,
    #[error("Pickup time must be at least 5 minutes in the future")]
    TooSoon,
    #[error("Pickup must be before expiry: {0}")]
    AfterExpiry(String),
}

/// Raw picker fields as typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickupForm {
    /// `YYYY-MM-DD` from the date input.
    pub date: String,
    pub hour: String,
    pub minute: String,
    pub meridiem: Meridiem,
}

impl Default for PickupForm {
    fn default() -> Self {
        Self { date: String::new(), hour: "12".to_owned(), minute: "00".to_owned(), meridiem: Meridiem::Am }
    }
}

impl PickupForm {
    /// Wall-clock pickup time. `12 AM` is midnight and `12 PM` is noon; an
    /// empty minute field means `:00`.
    ///
    /// # Errors
    ///
    /// Returns [`PickupError`] for a missing or malformed date or minute.
    pub fn local_datetime(&self) -> Result<NaiveDateTime, PickupError> {
        let date = self.date.trim();
        if date.is_empty() {
            return Err(PickupError::MissingDate);
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| PickupError::InvalidDate)?;

        let minute = match self.minute.trim() {
            "" => 0,
            raw => raw.parse::<u32>().map_err(|_| PickupError::InvalidMinute)?,
        };
        let hour = self.hour.trim().parse::<u32>().unwrap_or(0) % 12;
        let hour = match self.meridiem {
            Meridiem::Am => hour,
            Meridiem::Pm => hour + 12,
        };
        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or(PickupError::InvalidMinute)?;
        Ok(date.and_time(time))
    }

    /// The pickup as an instant, resolved in the browser's zone.
    ///
    /// # Errors
    ///
    /// As [`PickupForm::local_datetime`], plus
    /// [`PickupError::NonexistentLocalTime`] inside a DST gap.
    pub fn instant(&self) -> Result<DateTime<Utc>, PickupError> {
        resolve_in(&Local, self.local_datetime()?)
    }
}

/// Resolve a wall-clock time in `zone`; an ambiguous time takes the earlier
/// reading.
pub fn resolve_in<Tz: TimeZone>(zone: &Tz, naive: NaiveDateTime) -> Result<DateTime<Utc>, PickupError> {
    zone.from_local_datetime(&naive)
        .earliest()
        .map(|at| at.with_timezone(&Utc))
        .ok_or(PickupError::NonexistentLocalTime)
}

/// Enforce the lead time and the expiry bound. An unparseable expiry is
/// ignored.
///
/// # Errors
///
/// Returns [`PickupError::TooSoon`] or [`PickupError::AfterExpiry`].
pub fn check_pickup_window(
    pickup: DateTime<Utc>,
    now: DateTime<Utc>,
    expires_at: Option<&str>,
) -> Result<(), PickupError> {
    if pickup < now + TimeDelta::minutes(MIN_LEAD_MINUTES) {
        return Err(PickupError::TooSoon);
    }
    if let Some(expiry) = expires_at.and_then(parse_instant)
        && pickup > expiry
    {
        return Err(PickupError::AfterExpiry(format_local(expiry)));
    }
    Ok(())
}
