use crate::utils::dss::dss_pathname::DssPathname;
use crate::utils::errors::dss_read_errors::DssReadError;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Sentinel ordinate values marking gaps in a record.
pub const MISSING_VALUE: f64 = -901.0;
pub const REJECTED_VALUE: f64 = -902.0;

/// One regular-interval record read from a DSS text file. Gap ordinates
/// are dropped during parsing, so `times`/`values` hold plottable points
/// only and always have equal length.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    pub pathname: DssPathname,
    pub times: Vec<NaiveDateTime>,
    pub values: Vec<f64>,
}

/// Parse a whole DSS text export.
///
/// Format: a pathname line opens a record, followed by one
/// `DDMMMYYYY HH:MM, value` row per ordinate. Blank lines close the
/// current record, `*` lines are comments.
pub fn read_dss_text(bytes: &[u8]) -> Result<Vec<TimeSeries>, DssReadError> {
    let text = std::str::from_utf8(bytes)?;

    let mut records: Vec<TimeSeries> = Vec::new();
    let mut current: Option<TimeSeries> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();

        if line.is_empty() {
            if let Some(record) = current.take() {
                records.push(record);
            }
            continue;
        }
        if line.starts_with('*') {
            continue;
        }
        if line.starts_with('/') {
            if let Some(record) = current.take() {
                records.push(record);
            }
            current = Some(TimeSeries {
                pathname: DssPathname::parse(line)?,
                times: Vec::new(),
                values: Vec::new(),
            });
            continue;
        }

        let record = current
            .as_mut()
            .ok_or(DssReadError::OrdinateBeforePathname { line: line_no })?;

        let (time, value) = parse_ordinate(line, line_no)?;
        if value == MISSING_VALUE || value == REJECTED_VALUE {
            continue;
        }
        if let Some(last) = record.times.last() {
            if time <= *last {
                return Err(DssReadError::TimeNotAscending { line: line_no });
            }
        }
        record.times.push(time);
        record.values.push(value);
    }

    if let Some(record) = current.take() {
        records.push(record);
    }

    Ok(records)
}

/// First record whose pathname matches, case-insensitively.
pub fn select_record<'a>(
    records: &'a [TimeSeries],
    wanted: &DssPathname,
) -> Result<&'a TimeSeries, DssReadError> {
    let record = records
        .iter()
        .find(|record| record.pathname.matches(wanted))
        .ok_or_else(|| DssReadError::RecordNotFound(wanted.to_string()))?;

    if record.times.is_empty() {
        return Err(DssReadError::EmptyRecord(record.pathname.to_string()));
    }
    Ok(record)
}

fn parse_ordinate(line: &str, line_no: usize) -> Result<(NaiveDateTime, f64), DssReadError> {
    let (datetime_text, value_text) =
        line.split_once(',')
            .ok_or_else(|| DssReadError::BadValue {
                line: line_no,
                text: line.to_string(),
            })?;

    let time = parse_dss_datetime(datetime_text.trim()).ok_or_else(|| {
        DssReadError::BadDateTime {
            line: line_no,
            text: datetime_text.trim().to_string(),
        }
    })?;

    let value: f64 = value_text
        .trim()
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| DssReadError::BadValue {
            line: line_no,
            text: value_text.trim().to_string(),
        })?;

    Ok((time, value))
}

/// `DDMMMYYYY HH:MM`, with the HEC end-of-day convention: `24:00` is
/// `00:00` of the following day.
fn parse_dss_datetime(text: &str) -> Option<NaiveDateTime> {
    let mut fields = text.split_whitespace();
    let date_text = fields.next()?;
    let time_text = fields.next()?;
    if fields.next().is_some() {
        return None;
    }

    let date = NaiveDate::parse_from_str(date_text, "%d%b%Y").ok()?;

    if time_text == "24:00" {
        let next_day = date.checked_add_signed(Duration::days(1))?;
        return Some(next_day.and_time(NaiveTime::MIN));
    }

    let time = NaiveTime::parse_from_str(time_text, "%H:%M").ok()?;
    Some(date.and_time(time))
}
