/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Day and night statistics of historical outdoor temperatures.
//!
//! The floor-heating panel is run at a *normal* setpoint during the
//! night, sized for the coldest night of the month, and at a *save*
//! setpoint during the day, sized for the average day.

use crate::error::{FloorHeatingError, FloorHeatingResult};
use crate::Float;
use calendar::Date;
use serde::Serialize;

/// The months during which the heating is on, from October to April
pub const HEATING_SEASON: [u8; 7] = [10, 11, 12, 1, 2, 3, 4];

/// An hourly outdoor temperature measurement
#[derive(Debug, Clone)]
pub struct TemperatureRecord {
    /// When it was measured
    pub date: Date,

    /// The dry bulb temperature, in $`C`$
    pub temperature: Float,
}

/// Separates the hours of the day into day and night
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayNightSplit {
    /// The hour at which the night starts
    pub night_start_hour: Float,

    /// The hour at which the night ends
    pub night_end_hour: Float,
}

impl std::default::Default for DayNightSplit {
    fn default() -> Self {
        Self {
            night_start_hour: 18.,
            night_end_hour: 9.,
        }
    }
}

impl DayNightSplit {
    /// Checks whether an hour of the day is night time. The night
    /// may or may not wrap around midnight.
    pub fn is_night(&self, hour: Float) -> bool {
        if self.night_start_hour > self.night_end_hour {
            hour >= self.night_start_hour || hour < self.night_end_hour
        } else {
            hour >= self.night_start_hour && hour < self.night_end_hour
        }
    }
}

/// The outdoor temperatures that matter for sizing the setpoints
/// of one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyClimate {
    /// The month, from 1 to 12
    pub month: u8,

    /// The lowest temperature measured at night, in $`C`$
    pub night_minimum: Float,

    /// The mean temperature during the day, in $`C`$
    pub day_mean: Float,
}

/// Summarizes the records of a month.
///
/// Records only carry a month, so a series spanning several years
/// pools every year's records of that month together.
pub fn monthly_climate(
    records: &[TemperatureRecord],
    month: u8,
    split: &DayNightSplit,
) -> FloorHeatingResult<MonthlyClimate> {
    let mut night_minimum: Option<Float> = None;
    let mut day_sum = 0.;
    let mut day_count = 0;
    for r in records.iter().filter(|r| r.date.month == month) {
        if split.is_night(r.date.hour) {
            night_minimum = Some(match night_minimum {
                Some(v) => v.min(r.temperature),
                None => r.temperature,
            });
        } else {
            day_sum += r.temperature;
            day_count += 1;
        }
    }

    let night_minimum = night_minimum
        .ok_or_else(|| FloorHeatingError::EmptyPeriod(format!("the nights of month {}", month)))?;
    if day_count == 0 {
        return Err(FloorHeatingError::EmptyPeriod(format!(
            "the days of month {}",
            month
        )));
    }

    Ok(MonthlyClimate {
        month,
        night_minimum,
        day_mean: day_sum / day_count as Float,
    })
}

/// Summarizes several months, in the order given
pub fn monthly_climates(
    records: &[TemperatureRecord],
    months: &[u8],
    split: &DayNightSplit,
) -> FloorHeatingResult<Vec<MonthlyClimate>> {
    months
        .iter()
        .map(|m| monthly_climate(records, *m, split))
        .collect()
}

/// Parses an hourly temperature series.
///
/// Each line starts with a timestamp such as `2022/1/1 1:00:00` (dashes
/// and a `T` separator are accepted too) followed by the temperature.
/// Any other columns are ignored. Lines before the first record are
/// considered a header; after that, every non-empty line must be a record.
/// Records with an empty temperature are missing measurements and
/// are skipped.
pub fn parse_hourly_records(text: &str) -> FloorHeatingResult<Vec<TemperatureRecord>> {
    let mut ret = Vec::new();
    let mut in_header = true;
    let mut missing = 0;
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_record(line) {
            Ok(Some(r)) => {
                in_header = false;
                ret.push(r);
            }
            Ok(None) => {
                in_header = false;
                missing += 1;
            }
            Err(reason) => {
                if in_header {
                    // still in the header
                    continue;
                }
                return Err(FloorHeatingError::InvalidRecord {
                    line: i + 1,
                    reason,
                });
            }
        }
    }
    if missing > 0 {
        log::warn!("Skipped {} hourly records with no temperature", missing);
    }
    log::debug!("Parsed {} hourly temperature records", ret.len());
    Ok(ret)
}

/// Parses a line. `None` means the temperature is missing.
fn parse_record(line: &str) -> Result<Option<TemperatureRecord>, String> {
    let mut fields = line.split(',').map(|f| f.trim().trim_matches('"'));
    let timestamp = fields.next().ok_or("empty line")?;
    let date = parse_timestamp(timestamp)?;
    let temperature = fields
        .next()
        .ok_or_else(|| format!("no temperature after '{}'", timestamp))?;
    if temperature.is_empty() {
        return Ok(None);
    }
    let temperature = temperature
        .parse::<Float>()
        .map_err(|e| format!("invalid temperature '{}': {}", temperature, e))?;
    if !temperature.is_finite() {
        return Err(format!("invalid temperature '{}'", temperature));
    }
    Ok(Some(TemperatureRecord { date, temperature }))
}

fn parse_timestamp(s: &str) -> Result<Date, String> {
    let (day_part, time_part) = s
        .split_once(|c: char| c == ' ' || c == 'T')
        .ok_or_else(|| format!("'{}' is not a timestamp", s))?;

    let ymd: Vec<&str> = day_part.split(|c: char| c == '/' || c == '-').collect();
    if ymd.len() != 3 {
        return Err(format!("'{}' is not a date", day_part));
    }
    ymd[0]
        .parse::<i32>()
        .map_err(|_| format!("invalid year in '{}'", day_part))?;
    let month = ymd[1]
        .parse::<u8>()
        .map_err(|_| format!("invalid month in '{}'", day_part))?;
    let day = ymd[2]
        .parse::<u8>()
        .map_err(|_| format!("invalid day in '{}'", day_part))?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(format!("'{}' is not a valid date", day_part));
    }

    let hms: Vec<&str> = time_part.trim().split(':').collect();
    if hms.len() < 2 || hms.len() > 3 {
        return Err(format!("'{}' is not a time", time_part));
    }
    let mut hour: Float = 0.;
    for (value, scale) in hms.iter().zip([1., 60., 3600.]) {
        let v = value
            .parse::<Float>()
            .map_err(|_| format!("invalid time '{}'", time_part))?;
        hour += v / scale;
    }
    if !(0. ..24.).contains(&hour) {
        return Err(format!("'{}' is not a valid time", time_part));
    }

    Ok(Date { month, day, hour })
}

/***********/
/* TESTING */
/***********/
