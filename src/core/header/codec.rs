// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! EDF header date codec
//!
//! Parses the fixed-width startdate/starttime fields of an EDF header,
//! applies a day-offset with full Gregorian rollover, and re-serializes at
//! the exact original field width. Time-of-day bytes are never touched.
//!
//! The shift is day-count arithmetic over `chrono::NaiveDate`, so month,
//! year, and leap-year boundaries roll over correctly by construction:
//! 2020-02-29 minus 400 days is exactly 2019-01-25, never a clamped
//! approximation.

use super::layout;
use crate::core::registry::DayOffset;
use crate::domain::{EdfveilError, PatientId, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime};

/// An EDF recording held as raw bytes with typed access to header fields
///
/// Owns the full file content; `shift_start_date` emits a derived copy and
/// never mutates the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
    bytes: Vec<u8>,
}

impl HeaderRecord {
    /// Wraps raw EDF file content
    ///
    /// # Errors
    ///
    /// Returns `EdfveilError::MalformedHeader` if the content is shorter
    /// than the 256-byte fixed header.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() < layout::MIN_HEADER_LEN {
            return Err(EdfveilError::MalformedHeader(format!(
                "file is {} bytes, EDF header requires at least {}",
                bytes.len(),
                layout::MIN_HEADER_LEN
            )));
        }
        Ok(Self { bytes })
    }

    /// Patient identity from the local-patient-identification field
    ///
    /// # Errors
    ///
    /// Returns `EdfveilError::MalformedHeader` if the field is not ASCII or
    /// is blank.
    pub fn patient_id(&self) -> Result<PatientId> {
        let raw = field_str(&self.bytes, layout::PATIENT_FIELD, "patient identification")?;
        PatientId::new(raw).map_err(EdfveilError::MalformedHeader)
    }

    /// Startdate parsed from the `dd.mm.yy` field
    pub fn start_date(&self) -> Result<NaiveDate> {
        let raw = field_str(&self.bytes, layout::START_DATE_FIELD, "startdate")?;
        parse_edf_date(raw)
    }

    /// Starttime parsed from the `hh.mm.ss` field
    pub fn start_time(&self) -> Result<NaiveTime> {
        let raw = field_str(&self.bytes, layout::START_TIME_FIELD, "starttime")?;
        parse_edf_time(raw)
    }

    /// Raw starttime bytes, exactly as stored
    pub fn start_time_bytes(&self) -> &[u8] {
        &self.bytes[layout::START_TIME_FIELD]
    }

    /// The full file content
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes self and returns the file content
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Byte length of the record
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the record is empty (never true for a parsed record)
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Original and shifted values produced by one header rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderShift {
    pub original_date: NaiveDate,
    pub original_time: NaiveTime,
    pub new_date: NaiveDate,
    pub offset: DayOffset,
}

/// Applies a day-offset to the startdate of an EDF header
///
/// Returns the rewritten record and the original↔shifted value pair for the
/// audit trail. The rewrite preserves the byte length of the record and the
/// exact width of the startdate field; starttime bytes are copied
/// bit-identically.
///
/// Applying the same offset twice keeps shifting the date; idempotence
/// guarding belongs to the orchestration layer, not the codec.
///
/// # Errors
///
/// - `EdfveilError::MalformedHeader` if the date/time fields do not parse
///   or the date is not calendar-valid.
/// - `EdfveilError::FormatInvariant` if the shifted year falls outside the
///   representable 1985-2084 range, or the serialized field width would
///   differ from the original.
pub fn shift_start_date(
    header: &HeaderRecord,
    offset: DayOffset,
) -> Result<(HeaderRecord, HeaderShift)> {
    let original_date = header.start_date()?;
    let original_time = header.start_time()?;

    let new_date = original_date
        .checked_add_signed(Duration::days(i64::from(offset.days())))
        .ok_or_else(|| {
            EdfveilError::FormatInvariant(format!(
                "shifting {original_date} by {} days leaves the supported calendar",
                offset.days()
            ))
        })?;

    if new_date.year() < layout::MIN_YEAR || new_date.year() > layout::MAX_YEAR {
        return Err(EdfveilError::FormatInvariant(format!(
            "shifted startdate {new_date} is outside the EDF-representable range {}-{}",
            layout::MIN_YEAR,
            layout::MAX_YEAR
        )));
    }

    let serialized = format_edf_date(new_date);
    if serialized.len() != layout::DATE_FIELD_LEN {
        return Err(EdfveilError::FormatInvariant(format!(
            "serialized startdate '{serialized}' is {} bytes, field width is {}",
            serialized.len(),
            layout::DATE_FIELD_LEN
        )));
    }

    let mut bytes = header.bytes.clone();
    bytes[layout::START_DATE_FIELD].copy_from_slice(serialized.as_bytes());

    if bytes.len() != header.bytes.len() {
        return Err(EdfveilError::FormatInvariant(
            "rewritten header changed byte length".to_string(),
        ));
    }

    let shift = HeaderShift {
        original_date,
        original_time,
        new_date,
        offset,
    };

    Ok((HeaderRecord { bytes }, shift))
}

/// Parses an EDF `dd.mm.yy` date string
///
/// Two-digit years pivot at 85: `85`-`99` are 1985-1999, `00`-`84` are
/// 2000-2084.
pub fn parse_edf_date(raw: &str) -> Result<NaiveDate> {
    let malformed = |detail: &str| {
        EdfveilError::MalformedHeader(format!("startdate '{}': {detail}", raw.trim()))
    };

    let parts: Vec<&str> = raw.trim().split('.').collect();
    if parts.len() != 3 {
        return Err(malformed("expected dd.mm.yy"));
    }

    let day: u32 = parts[0].parse().map_err(|_| malformed("day is not numeric"))?;
    let month: u32 = parts[1].parse().map_err(|_| malformed("month is not numeric"))?;
    let yy: u32 = parts[2].parse().map_err(|_| malformed("year is not numeric"))?;
    if yy > 99 {
        return Err(malformed("year has more than two digits"));
    }

    let year = if yy >= layout::YEAR_PIVOT {
        1900 + yy as i32
    } else {
        2000 + yy as i32
    };

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| malformed("not a valid calendar date"))
}

/// Parses an EDF `hh.mm.ss` time string
pub fn parse_edf_time(raw: &str) -> Result<NaiveTime> {
    let malformed = |detail: &str| {
        EdfveilError::MalformedHeader(format!("starttime '{}': {detail}", raw.trim()))
    };

    let parts: Vec<&str> = raw.trim().split('.').collect();
    if parts.len() != 3 {
        return Err(malformed("expected hh.mm.ss"));
    }

    let hour: u32 = parts[0].parse().map_err(|_| malformed("hour is not numeric"))?;
    let minute: u32 = parts[1].parse().map_err(|_| malformed("minute is not numeric"))?;
    let second: u32 = parts[2].parse().map_err(|_| malformed("second is not numeric"))?;

    NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| malformed("not a valid time of day"))
}

/// Formats a date as EDF `dd.mm.yy`, zero padded
pub fn format_edf_date(date: NaiveDate) -> String {
    format!("{:02}.{:02}.{:02}", date.day(), date.month(), date.year() % 100)
}

fn field_str<'a>(bytes: &'a [u8], range: std::ops::Range<usize>, name: &str) -> Result<&'a str> {
    std::str::from_utf8(&bytes[range])
        .map_err(|_| EdfveilError::MalformedHeader(format!("{name} field is not ASCII")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    /// Synthetic EDF file: 256-byte header plus a little signal data
    fn sample_edf(patient: &str, date: &str, time: &str) -> Vec<u8> {
        let mut bytes = vec![b' '; 300];
        bytes[0..8].copy_from_slice(b"0       ");
        bytes[8..8 + patient.len()].copy_from_slice(patient.as_bytes());
        bytes[168..176].copy_from_slice(date.as_bytes());
        bytes[176..184].copy_from_slice(time.as_bytes());
        bytes
    }

    #[test]
    fn test_rejects_short_file() {
        let err = HeaderRecord::from_bytes(vec![0u8; 100]).unwrap_err();
        assert!(matches!(err, EdfveilError::MalformedHeader(_)));
    }

    #[test_case("01.03.19", 2019, 3, 1 ; "post-2000 date")]
    #[test_case("31.12.99", 1999, 12, 31 ; "late nineties")]
    #[test_case("01.01.85", 1985, 1, 1 ; "pivot year is 1985")]
    #[test_case("31.12.84", 2084, 12, 31 ; "84 is 2084")]
    fn test_parse_edf_date(raw: &str, year: i32, month: u32, day: u32) {
        let date = parse_edf_date(raw).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(year, month, day).unwrap());
    }

    #[test_case("31.04.19" ; "day 31 in april")]
    #[test_case("29.02.19" ; "feb 29 in a non-leap year")]
    #[test_case("xx.03.19" ; "non-numeric day")]
    #[test_case("01.03" ; "missing year")]
    #[test_case("01.03.2019" ; "four-digit year")]
    fn test_parse_edf_date_invalid(raw: &str) {
        assert!(parse_edf_date(raw).is_err());
    }

    #[test]
    fn test_shift_basic_scenario() {
        // identity 5WPR, offset +37: 2019-03-01 -> 2019-04-07, time untouched
        let record =
            HeaderRecord::from_bytes(sample_edf("5WPR", "01.03.19", "08.15.30")).unwrap();
        let offset = DayOffset::new(37).unwrap();

        let (shifted, audit) = shift_start_date(&record, offset).unwrap();

        assert_eq!(audit.original_date, NaiveDate::from_ymd_opt(2019, 3, 1).unwrap());
        assert_eq!(audit.new_date, NaiveDate::from_ymd_opt(2019, 4, 7).unwrap());
        assert_eq!(&shifted.as_bytes()[168..176], b"07.04.19");
        assert_eq!(shifted.start_time_bytes(), record.start_time_bytes());
        assert_eq!(shifted.len(), record.len());
    }

    #[test]
    fn test_shift_leap_day_backwards() {
        // identity 5Y4Z, offset -400: 2020-02-29 lands on 2019-01-25 exactly
        let record =
            HeaderRecord::from_bytes(sample_edf("5Y4Z", "29.02.20", "23.59.59")).unwrap();
        let offset = DayOffset::new(-400).unwrap();

        let (shifted, audit) = shift_start_date(&record, offset).unwrap();

        assert_eq!(audit.new_date, NaiveDate::from_ymd_opt(2019, 1, 25).unwrap());
        assert_eq!(&shifted.as_bytes()[168..176], b"25.01.19");
    }

    #[test]
    fn test_shift_across_year_boundary() {
        let record =
            HeaderRecord::from_bytes(sample_edf("AAAA", "30.12.18", "00.00.01")).unwrap();
        let (_, audit) = shift_start_date(&record, DayOffset::new(3).unwrap()).unwrap();
        assert_eq!(audit.new_date, NaiveDate::from_ymd_opt(2019, 1, 2).unwrap());
    }

    #[test]
    fn test_shift_preserves_non_date_bytes() {
        let original = sample_edf("BBBB", "15.06.21", "12.00.00");
        let record = HeaderRecord::from_bytes(original.clone()).unwrap();
        let (shifted, _) = shift_start_date(&record, DayOffset::new(100).unwrap()).unwrap();

        let out = shifted.as_bytes();
        assert_eq!(&out[..168], &original[..168]);
        assert_eq!(&out[176..], &original[176..]);
    }

    #[test]
    fn test_shift_out_of_representable_range() {
        let record =
            HeaderRecord::from_bytes(sample_edf("CCCC", "01.06.84", "12.00.00")).unwrap();
        // 2084-06-01 plus three years exceeds the dd.mm.yy range
        let err = shift_start_date(&record, DayOffset::new(1095).unwrap()).unwrap_err();
        assert!(matches!(err, EdfveilError::FormatInvariant(_)));
    }

    #[test]
    fn test_shift_is_not_idempotent() {
        let record =
            HeaderRecord::from_bytes(sample_edf("DDDD", "01.03.19", "08.15.30")).unwrap();
        let offset = DayOffset::new(10).unwrap();

        let (once, _) = shift_start_date(&record, offset).unwrap();
        let (twice, audit) = shift_start_date(&once, offset).unwrap();

        assert_ne!(once.as_bytes(), twice.as_bytes());
        assert_eq!(audit.new_date, NaiveDate::from_ymd_opt(2019, 3, 21).unwrap());
    }

    #[test]
    fn test_patient_id_trims_field_padding() {
        let record =
            HeaderRecord::from_bytes(sample_edf("5WPR", "01.03.19", "08.15.30")).unwrap();
        assert_eq!(record.patient_id().unwrap().as_str(), "5WPR");
    }

    #[test]
    fn test_format_edf_date_zero_pads() {
        let date = NaiveDate::from_ymd_opt(2005, 4, 3).unwrap();
        assert_eq!(format_edf_date(date), "03.04.05");
    }
}
