use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::error::TypeError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const TIMESTAMP_FORMAT_ISO: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Largest declared length of a `char(n)` column; values are padded to it.
pub const MAX_CHAR_LENGTH: u32 = 16 * 1024 * 1024;

/// Declared type of a column.
///
/// Values travel as text; each type validates a raw string and produces
/// its canonical spelling. An empty string is the null value and passes
/// every type unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColumnType {
    Boolean,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    /// Fixed-point decimal with `precision` total digits, `scale` of them fractional
    Numeric { precision: u16, scale: u16 },
    /// Fixed-length text, right-padded with spaces
    Char(u32),
    /// Variable-length text with an upper bound in characters
    Varchar(u32),
    Text,
    Date,
    Time,
    Timestamp,
}

impl ColumnType {
    /// Validates `raw` and returns its canonical form.
    ///
    /// # Arguments
    /// * `raw` - Candidate value as supplied by the caller
    ///
    /// # Returns
    /// `Result<String, TypeError>` with the coerced value or the reason it was rejected.
    pub fn coerce(&self, raw: &str) -> Result<String, TypeError> {
        if raw.is_empty() {
            return Ok(String::new());
        }

        match *self {
            ColumnType::Boolean => self.coerce_bool(raw),
            ColumnType::SmallInt => self.coerce_int::<i16>(raw),
            ColumnType::Integer => self.coerce_int::<i32>(raw),
            ColumnType::BigInt => self.coerce_int::<i64>(raw),
            ColumnType::Real => {
                let value: f32 = raw.trim().parse().map_err(|_| self.invalid(raw))?;
                if !value.is_finite() {
                    return Err(self.out_of_range(raw));
                }
                Ok(value.to_string())
            }
            ColumnType::Double => {
                let value: f64 = raw.trim().parse().map_err(|_| self.invalid(raw))?;
                if !value.is_finite() {
                    return Err(self.out_of_range(raw));
                }
                Ok(value.to_string())
            }
            ColumnType::Numeric { precision, scale } => self.coerce_numeric(raw, precision, scale),
            ColumnType::Char(len) => {
                if len > MAX_CHAR_LENGTH {
                    return Err(self.out_of_range(raw));
                }
                let chars = raw.chars().count();
                if chars > len as usize {
                    return Err(self.too_long(chars));
                }
                let mut padded = String::with_capacity(raw.len() + (len as usize - chars));
                padded.push_str(raw);
                padded.extend(std::iter::repeat_n(' ', len as usize - chars));
                Ok(padded)
            }
            ColumnType::Varchar(len) => {
                let chars = raw.chars().count();
                if chars > len as usize {
                    return Err(self.too_long(chars));
                }
                Ok(raw.to_string())
            }
            ColumnType::Text => Ok(raw.to_string()),
            ColumnType::Date => NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
                .map(|d| d.format(DATE_FORMAT).to_string())
                .map_err(|_| self.invalid(raw)),
            ColumnType::Time => NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT)
                .map(|t| t.format(TIME_FORMAT).to_string())
                .map_err(|_| self.invalid(raw)),
            ColumnType::Timestamp => {
                let trimmed = raw.trim();
                NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
                    .or_else(|_| NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT_ISO))
                    .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
                    .map_err(|_| self.invalid(raw))
            }
        }
    }

    fn coerce_bool(&self, raw: &str) -> Result<String, TypeError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "on" | "1" => Ok("true".to_string()),
            "false" | "f" | "no" | "n" | "off" | "0" => Ok("false".to_string()),
            _ => Err(self.invalid(raw)),
        }
    }

    fn coerce_int<T>(&self, raw: &str) -> Result<String, TypeError>
    where
        T: FromStr<Err = std::num::ParseIntError> + ToString,
    {
        match raw.trim().parse::<T>() {
            Ok(value) => Ok(value.to_string()),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    Err(self.out_of_range(raw))
                }
                _ => Err(self.invalid(raw)),
            },
        }
    }

    fn coerce_numeric(&self, raw: &str, precision: u16, scale: u16) -> Result<String, TypeError> {
        let trimmed = raw.trim();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (unsigned, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(self.invalid(raw));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(self.invalid(raw));
        }

        let significant = int_part.trim_start_matches('0');
        let int_digits_allowed = usize::from(precision.saturating_sub(scale));
        if significant.len() > int_digits_allowed || frac_part.len() > usize::from(scale) {
            return Err(self.out_of_range(raw));
        }

        let mut out = String::with_capacity(significant.len() + usize::from(scale) + 3);
        let is_zero = significant.is_empty() && frac_part.bytes().all(|b| b == b'0');
        if negative && !is_zero {
            out.push('-');
        }
        if significant.is_empty() {
            out.push('0');
        } else {
            out.push_str(significant);
        }
        if scale > 0 {
            out.push('.');
            out.push_str(frac_part);
            out.extend(std::iter::repeat_n('0', usize::from(scale) - frac_part.len()));
        }
        Ok(out)
    }

    fn invalid(&self, raw: &str) -> TypeError {
        TypeError::InvalidFormat {
            type_name: self.to_string(),
            value: raw.to_string(),
        }
    }

    fn out_of_range(&self, raw: &str) -> TypeError {
        TypeError::OutOfRange {
            type_name: self.to_string(),
            value: raw.to_string(),
        }
    }

    fn too_long(&self, len: usize) -> TypeError {
        TypeError::TooLong {
            type_name: self.to_string(),
            len,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Boolean => f.write_str("boolean"),
            ColumnType::SmallInt => f.write_str("smallint"),
            ColumnType::Integer => f.write_str("integer"),
            ColumnType::BigInt => f.write_str("bigint"),
            ColumnType::Real => f.write_str("real"),
            ColumnType::Double => f.write_str("double"),
            ColumnType::Numeric { precision, scale } => write!(f, "numeric({precision},{scale})"),
            ColumnType::Char(len) => write!(f, "char({len})"),
            ColumnType::Varchar(len) => write!(f, "varchar({len})"),
            ColumnType::Text => f.write_str("text"),
            ColumnType::Date => f.write_str("date"),
            ColumnType::Time => f.write_str("time"),
            ColumnType::Timestamp => f.write_str("timestamp"),
        }
    }
}

impl FromStr for ColumnType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let unknown = || TypeError::UnknownType(s.to_string());

        let (name, args) = match normalized.split_once('(') {
            Some((name, rest)) => {
                let args = rest.strip_suffix(')').ok_or_else(unknown)?;
                (name.trim(), Some(args))
            }
            None => (normalized.as_str(), None),
        };

        let parse_args = |args: &str| -> Result<Vec<u32>, TypeError> {
            args.split(',')
                .map(|a| a.trim().parse::<u32>().map_err(|_| unknown()))
                .collect()
        };

        match (name, args) {
            ("boolean" | "bool", None) => Ok(ColumnType::Boolean),
            ("smallint" | "int2", None) => Ok(ColumnType::SmallInt),
            ("integer" | "int" | "int4", None) => Ok(ColumnType::Integer),
            ("bigint" | "int8", None) => Ok(ColumnType::BigInt),
            ("real" | "float4", None) => Ok(ColumnType::Real),
            ("double" | "double precision" | "float8", None) => Ok(ColumnType::Double),
            ("text", None) => Ok(ColumnType::Text),
            ("date", None) => Ok(ColumnType::Date),
            ("time", None) => Ok(ColumnType::Time),
            ("timestamp", None) => Ok(ColumnType::Timestamp),
            ("numeric" | "decimal", Some(args)) => {
                let args = parse_args(args)?;
                let narrow = |v: u32| u16::try_from(v).map_err(|_| unknown());
                match args.as_slice() {
                    [precision] => Ok(ColumnType::Numeric {
                        precision: narrow(*precision)?,
                        scale: 0,
                    }),
                    [precision, scale] => Ok(ColumnType::Numeric {
                        precision: narrow(*precision)?,
                        scale: narrow(*scale)?,
                    }),
                    _ => Err(unknown()),
                }
            }
            ("char" | "character", Some(args)) => match parse_args(args)?.as_slice() {
                [len] => Ok(ColumnType::Char(*len)),
                _ => Err(unknown()),
            },
            ("varchar" | "character varying", Some(args)) => match parse_args(args)?.as_slice() {
                [len] => Ok(ColumnType::Varchar(*len)),
                _ => Err(unknown()),
            },
            _ => Err(unknown()),
        }
    }
}

impl TryFrom<String> for ColumnType {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColumnType> for String {
    fn from(value: ColumnType) -> Self {
        value.to_string()
    }
}
