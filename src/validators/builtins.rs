//! XSD built-in primitive types
//!
//! The closed set of primitive datatypes the simple-type engine dispatches
//! on, the typed values produced by successful validation, and the
//! lexical-then-value checks for each kind.
//!
//! Reference: https://www.w3.org/TR/xmlschema-2/#built-in-primitive-datatypes

use crate::error::{Reporter, ValidationError};
use crate::locations::Location;
use crate::names;
use crate::namespaces::{PrefixResolver, QName};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::str::FromStr;

/// The XSD primitive datatypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    /// xs:string
    String,
    /// xs:boolean
    Boolean,
    /// xs:decimal
    Decimal,
    /// xs:float
    Float,
    /// xs:double
    Double,
    /// xs:QName
    QName,
    /// xs:anyURI
    AnyUri,
    /// xs:dateTime
    DateTime,
    /// xs:date
    Date,
    /// xs:time
    Time,
    /// xs:gYearMonth
    GYearMonth,
    /// xs:gYear
    GYear,
    /// xs:gMonthDay
    GMonthDay,
    /// xs:gDay
    GDay,
    /// xs:gMonth
    GMonth,
    /// xs:duration
    Duration,
    /// xs:base64Binary
    Base64Binary,
    /// xs:hexBinary
    HexBinary,
    /// xs:NOTATION
    Notation,
}

impl BuiltinKind {
    /// Every primitive kind, in XSD recommendation order
    pub const ALL: &'static [BuiltinKind] = &[
        BuiltinKind::String,
        BuiltinKind::Boolean,
        BuiltinKind::Decimal,
        BuiltinKind::Float,
        BuiltinKind::Double,
        BuiltinKind::Duration,
        BuiltinKind::DateTime,
        BuiltinKind::Time,
        BuiltinKind::Date,
        BuiltinKind::GYearMonth,
        BuiltinKind::GYear,
        BuiltinKind::GMonthDay,
        BuiltinKind::GDay,
        BuiltinKind::GMonth,
        BuiltinKind::HexBinary,
        BuiltinKind::Base64Binary,
        BuiltinKind::AnyUri,
        BuiltinKind::QName,
        BuiltinKind::Notation,
    ];

    /// Local name in the XSD namespace
    pub fn xsd_name(&self) -> &'static str {
        match self {
            BuiltinKind::String => "string",
            BuiltinKind::Boolean => "boolean",
            BuiltinKind::Decimal => "decimal",
            BuiltinKind::Float => "float",
            BuiltinKind::Double => "double",
            BuiltinKind::QName => "QName",
            BuiltinKind::AnyUri => "anyURI",
            BuiltinKind::DateTime => "dateTime",
            BuiltinKind::Date => "date",
            BuiltinKind::Time => "time",
            BuiltinKind::GYearMonth => "gYearMonth",
            BuiltinKind::GYear => "gYear",
            BuiltinKind::GMonthDay => "gMonthDay",
            BuiltinKind::GDay => "gDay",
            BuiltinKind::GMonth => "gMonth",
            BuiltinKind::Duration => "duration",
            BuiltinKind::Base64Binary => "base64Binary",
            BuiltinKind::HexBinary => "hexBinary",
            BuiltinKind::Notation => "NOTATION",
        }
    }
}

/// Typed value produced by successful builtin validation
#[derive(Debug, Clone, PartialEq)]
pub enum XsdValue {
    /// String-valued content
    String(String),
    /// xs:boolean
    Boolean(bool),
    /// xs:decimal
    Decimal(Decimal),
    /// xs:float
    Float(f32),
    /// xs:double
    Double(f64),
    /// Resolved xs:QName
    QName(QName),
    /// xs:anyURI
    Uri(String),
    /// xs:dateTime with optional timezone offset
    DateTime(NaiveDateTime, Option<FixedOffset>),
    /// xs:date with optional timezone offset
    Date(NaiveDate, Option<FixedOffset>),
    /// xs:time with optional timezone offset
    Time(NaiveTime, Option<FixedOffset>),
    /// Gregorian fragment (gYearMonth, gYear, gMonthDay, gDay, gMonth),
    /// kept in collapsed lexical form
    Gregorian(String),
    /// xs:duration as signed (months, seconds) components
    Duration {
        /// Year/month component in months
        months: i64,
        /// Day/time component in seconds
        seconds: Decimal,
    },
    /// Decoded binary content (hexBinary, base64Binary)
    Bytes(Vec<u8>),
    /// Items of a list-typed value
    List(Vec<XsdValue>),
}

impl XsdValue {
    /// Compare two values in the XSD value space. Values of different
    /// kinds, timestamps with mixed timezone presence, and durations whose
    /// components disagree in direction are incomparable.
    pub fn compare(&self, other: &XsdValue) -> Option<Ordering> {
        match (self, other) {
            (XsdValue::String(a), XsdValue::String(b)) => Some(a.cmp(b)),
            (XsdValue::Boolean(a), XsdValue::Boolean(b)) => Some(a.cmp(b)),
            (XsdValue::Decimal(a), XsdValue::Decimal(b)) => Some(a.cmp(b)),
            (XsdValue::Float(a), XsdValue::Float(b)) => a.partial_cmp(b),
            (XsdValue::Double(a), XsdValue::Double(b)) => a.partial_cmp(b),
            (XsdValue::QName(a), XsdValue::QName(b)) => {
                if a == b {
                    Some(Ordering::Equal)
                } else {
                    None
                }
            }
            (XsdValue::Uri(a), XsdValue::Uri(b)) => Some(a.cmp(b)),
            (XsdValue::Gregorian(a), XsdValue::Gregorian(b)) => {
                if a == b {
                    Some(Ordering::Equal)
                } else {
                    None
                }
            }
            (XsdValue::DateTime(a, za), XsdValue::DateTime(b, zb)) => match (za, zb) {
                (Some(za), Some(zb)) => {
                    let ua = *a - chrono::Duration::seconds(za.local_minus_utc() as i64);
                    let ub = *b - chrono::Duration::seconds(zb.local_minus_utc() as i64);
                    Some(ua.cmp(&ub))
                }
                (None, None) => Some(a.cmp(b)),
                _ => None,
            },
            (XsdValue::Date(a, za), XsdValue::Date(b, zb)) => match (za, zb) {
                (Some(_), Some(_)) | (None, None) => Some(a.cmp(b)),
                _ => None,
            },
            (XsdValue::Time(a, za), XsdValue::Time(b, zb)) => match (za, zb) {
                (Some(za), Some(zb)) => {
                    let ua = *a - chrono::Duration::seconds(za.local_minus_utc() as i64);
                    let ub = *b - chrono::Duration::seconds(zb.local_minus_utc() as i64);
                    Some(ua.cmp(&ub))
                }
                (None, None) => Some(a.cmp(b)),
                _ => None,
            },
            (
                XsdValue::Duration {
                    months: ma,
                    seconds: sa,
                },
                XsdValue::Duration {
                    months: mb,
                    seconds: sb,
                },
            ) => {
                let mo = ma.cmp(mb);
                let se = sa.cmp(sb);
                if mo == se || se == Ordering::Equal {
                    Some(mo)
                } else if mo == Ordering::Equal {
                    Some(se)
                } else {
                    None
                }
            }
            (XsdValue::Bytes(a), XsdValue::Bytes(b)) => Some(a.cmp(b)),
            (XsdValue::List(a), XsdValue::List(b)) => {
                if a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|(x, y)| x.compare(y) == Some(Ordering::Equal))
                {
                    Some(Ordering::Equal)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Equality in the value space
    pub fn eq_value(&self, other: &XsdValue) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

lazy_static! {
    static ref DECIMAL_RE: regex::Regex =
        regex::Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)$").unwrap();
    static ref FLOAT_RE: regex::Regex =
        regex::Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").unwrap();
    static ref DATETIME_RE: regex::Regex = regex::Regex::new(
        r"^-?\d{4,}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})?$"
    )
    .unwrap();
    static ref DATE_RE: regex::Regex =
        regex::Regex::new(r"^-?\d{4,}-\d{2}-\d{2}(Z|[+-]\d{2}:\d{2})?$").unwrap();
    static ref TIME_RE: regex::Regex =
        regex::Regex::new(r"^\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})?$").unwrap();
    static ref GYEAR_MONTH_RE: regex::Regex =
        regex::Regex::new(r"^-?\d{4,}-(0[1-9]|1[0-2])(Z|[+-]\d{2}:\d{2})?$").unwrap();
    static ref GYEAR_RE: regex::Regex =
        regex::Regex::new(r"^-?\d{4,}(Z|[+-]\d{2}:\d{2})?$").unwrap();
    static ref GMONTH_DAY_RE: regex::Regex =
        regex::Regex::new(r"^--(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])(Z|[+-]\d{2}:\d{2})?$")
            .unwrap();
    static ref GDAY_RE: regex::Regex =
        regex::Regex::new(r"^---(0[1-9]|[12]\d|3[01])(Z|[+-]\d{2}:\d{2})?$").unwrap();
    static ref GMONTH_RE: regex::Regex =
        regex::Regex::new(r"^--(0[1-9]|1[0-2])(Z|[+-]\d{2}:\d{2})?$").unwrap();
    static ref DURATION_RE: regex::Regex = regex::Regex::new(
        r"^(-)?P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?)?$"
    )
    .unwrap();
    static ref HEX_RE: regex::Regex = regex::Regex::new(r"^([0-9a-fA-F]{2})*$").unwrap();
    static ref URI_SCHEME_RE: regex::Regex =
        regex::Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap();
}

fn report(reporter: &mut Reporter, location: &Location, message: String) {
    reporter.report(ValidationError::new(message).with_location(location.clone()));
}

fn lexical_error(
    reporter: &mut Reporter,
    location: &Location,
    kind: BuiltinKind,
    lexical: &str,
) -> Option<XsdValue> {
    report(
        reporter,
        location,
        format!(
            "'{}' is not a valid value of type xs:{}",
            lexical,
            kind.xsd_name()
        ),
    );
    None
}

/// Split a trailing timezone designator off a lexical form
fn split_timezone(lexical: &str) -> (&str, Option<FixedOffset>) {
    if let Some(body) = lexical.strip_suffix('Z') {
        return (body, FixedOffset::east_opt(0));
    }
    if lexical.len() > 6 {
        let (body, tz) = lexical.split_at(lexical.len() - 6);
        let bytes = tz.as_bytes();
        if (bytes[0] == b'+' || bytes[0] == b'-') && bytes[3] == b':' {
            if let (Ok(hours), Ok(minutes)) = (tz[1..3].parse::<i32>(), tz[4..6].parse::<i32>()) {
                if (hours < 14 && minutes < 60) || (hours == 14 && minutes == 0) {
                    let mut secs = hours * 3600 + minutes * 60;
                    if bytes[0] == b'-' {
                        secs = -secs;
                    }
                    return (body, FixedOffset::east_opt(secs));
                }
            }
        }
    }
    (lexical, None)
}

fn parse_duration(lexical: &str) -> Option<XsdValue> {
    let captures = DURATION_RE.captures(lexical)?;
    // "P" alone and forms ending in "T" match the regex but are invalid
    if lexical.ends_with('P') || lexical.ends_with('T') {
        return None;
    }
    let negative = captures.get(1).is_some();
    // A present component with digits beyond i64 is out of lexical range
    let component = |idx: usize| -> Option<i64> {
        match captures.get(idx) {
            Some(m) => m.as_str().parse::<i64>().ok(),
            None => Some(0),
        }
    };

    let mut months = component(2)?.checked_mul(12)?.checked_add(component(3)?)?;
    let mut seconds = Decimal::from(component(4)?)
        .checked_mul(Decimal::from(86_400))?
        .checked_add(Decimal::from(component(5)?).checked_mul(Decimal::from(3_600))?)?
        .checked_add(Decimal::from(component(6)?).checked_mul(Decimal::from(60))?)?;
    if let Some(secs) = captures.get(7) {
        seconds = seconds.checked_add(Decimal::from_str(secs.as_str()).ok()?)?;
    }
    if negative {
        months = -months;
        seconds = -seconds;
    }
    Some(XsdValue::Duration { months, seconds })
}

/// Validate a lexical form against a primitive kind.
///
/// On success the typed value is returned; on failure one diagnostic is
/// reported and None is returned. Whitespace normalization is the caller's
/// responsibility.
pub fn validate_builtin(
    kind: BuiltinKind,
    lexical: &str,
    resolver: &dyn PrefixResolver,
    reporter: &mut Reporter,
    location: &Location,
) -> Option<XsdValue> {
    match kind {
        BuiltinKind::String => Some(XsdValue::String(lexical.to_string())),

        BuiltinKind::Boolean => match lexical {
            "true" | "1" => Some(XsdValue::Boolean(true)),
            "false" | "0" => Some(XsdValue::Boolean(false)),
            _ => lexical_error(reporter, location, kind, lexical),
        },

        BuiltinKind::Decimal => {
            if !DECIMAL_RE.is_match(lexical) {
                return lexical_error(reporter, location, kind, lexical);
            }
            match Decimal::from_str(lexical) {
                Ok(value) => Some(XsdValue::Decimal(value)),
                Err(_) => lexical_error(reporter, location, kind, lexical),
            }
        }

        BuiltinKind::Float => match lexical {
            "INF" => Some(XsdValue::Float(f32::INFINITY)),
            "-INF" => Some(XsdValue::Float(f32::NEG_INFINITY)),
            "NaN" => Some(XsdValue::Float(f32::NAN)),
            _ => {
                if !FLOAT_RE.is_match(lexical) {
                    return lexical_error(reporter, location, kind, lexical);
                }
                match lexical.parse::<f32>() {
                    Ok(value) => Some(XsdValue::Float(value)),
                    Err(_) => lexical_error(reporter, location, kind, lexical),
                }
            }
        },

        BuiltinKind::Double => match lexical {
            "INF" => Some(XsdValue::Double(f64::INFINITY)),
            "-INF" => Some(XsdValue::Double(f64::NEG_INFINITY)),
            "NaN" => Some(XsdValue::Double(f64::NAN)),
            _ => {
                if !FLOAT_RE.is_match(lexical) {
                    return lexical_error(reporter, location, kind, lexical);
                }
                match lexical.parse::<f64>() {
                    Ok(value) => Some(XsdValue::Double(value)),
                    Err(_) => lexical_error(reporter, location, kind, lexical),
                }
            }
        },

        BuiltinKind::QName => {
            if !names::is_valid_qname(lexical) {
                return lexical_error(reporter, location, kind, lexical);
            }
            let (prefix, local) = names::split_qname(lexical);
            match prefix {
                Some(prefix) => match resolver.resolve_prefix(prefix) {
                    Some(namespace) => Some(XsdValue::QName(QName::namespaced(namespace, local))),
                    None => {
                        report(
                            reporter,
                            location,
                            format!("Unbound namespace prefix '{}' in QName '{}'", prefix, lexical),
                        );
                        None
                    }
                },
                None => Some(XsdValue::QName(QName::new(
                    resolver.resolve_prefix(""),
                    local,
                ))),
            }
        }

        BuiltinKind::AnyUri => {
            if lexical
                .chars()
                .any(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '<' | '>'))
            {
                return lexical_error(reporter, location, kind, lexical);
            }
            if URI_SCHEME_RE.is_match(lexical) && url::Url::parse(lexical).is_err() {
                return lexical_error(reporter, location, kind, lexical);
            }
            Some(XsdValue::Uri(lexical.to_string()))
        }

        BuiltinKind::DateTime => {
            if !DATETIME_RE.is_match(lexical) {
                return lexical_error(reporter, location, kind, lexical);
            }
            let (body, offset) = split_timezone(lexical);
            match NaiveDateTime::parse_from_str(body, "%Y-%m-%dT%H:%M:%S%.f") {
                Ok(value) => Some(XsdValue::DateTime(value, offset)),
                Err(_) => lexical_error(reporter, location, kind, lexical),
            }
        }

        BuiltinKind::Date => {
            if !DATE_RE.is_match(lexical) {
                return lexical_error(reporter, location, kind, lexical);
            }
            let (body, offset) = split_timezone(lexical);
            match NaiveDate::parse_from_str(body, "%Y-%m-%d") {
                Ok(value) => Some(XsdValue::Date(value, offset)),
                Err(_) => lexical_error(reporter, location, kind, lexical),
            }
        }

        BuiltinKind::Time => {
            if !TIME_RE.is_match(lexical) {
                return lexical_error(reporter, location, kind, lexical);
            }
            let (body, offset) = split_timezone(lexical);
            match NaiveTime::parse_from_str(body, "%H:%M:%S%.f") {
                Ok(value) => Some(XsdValue::Time(value, offset)),
                Err(_) => lexical_error(reporter, location, kind, lexical),
            }
        }

        BuiltinKind::GYearMonth => gregorian(&GYEAR_MONTH_RE, kind, lexical, reporter, location),
        BuiltinKind::GYear => gregorian(&GYEAR_RE, kind, lexical, reporter, location),
        BuiltinKind::GMonthDay => gregorian(&GMONTH_DAY_RE, kind, lexical, reporter, location),
        BuiltinKind::GDay => gregorian(&GDAY_RE, kind, lexical, reporter, location),
        BuiltinKind::GMonth => gregorian(&GMONTH_RE, kind, lexical, reporter, location),

        BuiltinKind::Duration => match parse_duration(lexical) {
            Some(value) => Some(value),
            None => lexical_error(reporter, location, kind, lexical),
        },

        BuiltinKind::Base64Binary => {
            let stripped: String = lexical.chars().filter(|c| *c != ' ').collect();
            match BASE64.decode(stripped.as_bytes()) {
                Ok(bytes) => Some(XsdValue::Bytes(bytes)),
                Err(_) => lexical_error(reporter, location, kind, lexical),
            }
        }

        BuiltinKind::HexBinary => {
            if !HEX_RE.is_match(lexical) {
                return lexical_error(reporter, location, kind, lexical);
            }
            let bytes = lexical
                .as_bytes()
                .chunks(2)
                .map(|pair| u8::from_str_radix(std::str::from_utf8(pair).unwrap_or("zz"), 16))
                .collect::<Result<Vec<u8>, _>>();
            match bytes {
                Ok(bytes) => Some(XsdValue::Bytes(bytes)),
                Err(_) => lexical_error(reporter, location, kind, lexical),
            }
        }

        BuiltinKind::Notation => {
            reporter.report(
                ValidationError::info("xs:NOTATION values are accepted without validation")
                    .with_location(location.clone()),
            );
            Some(XsdValue::String(lexical.to_string()))
        }
    }
}

fn gregorian(
    pattern: &regex::Regex,
    kind: BuiltinKind,
    lexical: &str,
    reporter: &mut Reporter,
    location: &Location,
) -> Option<XsdValue> {
    if pattern.is_match(lexical) {
        Some(XsdValue::Gregorian(lexical.to_string()))
    } else {
        lexical_error(reporter, location, kind, lexical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCollector, Reporter};
    use crate::namespaces::NamespaceContext;

    fn check(kind: BuiltinKind, lexical: &str) -> (Option<XsdValue>, u64) {
        let collector = ErrorCollector::new();
        let mut reporter = Reporter::new(Box::new(collector));
        let resolver = NamespaceContext::new();
        let value = validate_builtin(
            kind,
            lexical,
            &resolver,
            &mut reporter,
            &Location::unknown(),
        );
        (value, reporter.error_count())
    }

    #[test]
    fn test_boolean() {
        assert_eq!(check(BuiltinKind::Boolean, "true").0, Some(XsdValue::Boolean(true)));
        assert_eq!(check(BuiltinKind::Boolean, "0").0, Some(XsdValue::Boolean(false)));
        let (value, errors) = check(BuiltinKind::Boolean, "TRUE");
        assert!(value.is_none());
        assert_eq!(errors, 1);
    }

    #[test]
    fn test_decimal() {
        assert!(check(BuiltinKind::Decimal, "-12.34").0.is_some());
        assert!(check(BuiltinKind::Decimal, "+0.5").0.is_some());
        assert!(check(BuiltinKind::Decimal, "1e3").0.is_none());
        assert!(check(BuiltinKind::Decimal, "abc").0.is_none());
    }

    #[test]
    fn test_double_special_values() {
        assert_eq!(
            check(BuiltinKind::Double, "INF").0,
            Some(XsdValue::Double(f64::INFINITY))
        );
        assert!(check(BuiltinKind::Double, "-1.5E2").0.is_some());
        assert!(check(BuiltinKind::Double, "+INF").0.is_none());
    }

    #[test]
    fn test_datetime_with_timezone() {
        let (value, _) = check(BuiltinKind::DateTime, "2024-03-01T10:30:00Z");
        assert!(matches!(value, Some(XsdValue::DateTime(_, Some(_)))));

        let (value, _) = check(BuiltinKind::DateTime, "2024-03-01T10:30:00");
        assert!(matches!(value, Some(XsdValue::DateTime(_, None))));

        assert!(check(BuiltinKind::DateTime, "2024-13-01T10:30:00").0.is_none());
        assert!(check(BuiltinKind::DateTime, "not-a-date").0.is_none());
    }

    #[test]
    fn test_datetime_timezone_normalization() {
        let (a, _) = check(BuiltinKind::DateTime, "2024-03-01T12:00:00+02:00");
        let (b, _) = check(BuiltinKind::DateTime, "2024-03-01T10:00:00Z");
        assert_eq!(a.unwrap().compare(&b.unwrap()), Some(Ordering::Equal));
    }

    #[test]
    fn test_datetime_mixed_timezone_incomparable() {
        let (a, _) = check(BuiltinKind::DateTime, "2024-03-01T12:00:00Z");
        let (b, _) = check(BuiltinKind::DateTime, "2024-03-01T12:00:00");
        assert_eq!(a.unwrap().compare(&b.unwrap()), None);
    }

    #[test]
    fn test_qname_resolution() {
        let collector = ErrorCollector::new();
        let mut reporter = Reporter::new(Box::new(collector));
        let mut resolver = NamespaceContext::new();
        resolver.add_prefix("p", "http://example.com/p");

        let value = validate_builtin(
            BuiltinKind::QName,
            "p:item",
            &resolver,
            &mut reporter,
            &Location::unknown(),
        );
        assert_eq!(
            value,
            Some(XsdValue::QName(QName::namespaced("http://example.com/p", "item")))
        );

        let value = validate_builtin(
            BuiltinKind::QName,
            "unbound:item",
            &resolver,
            &mut reporter,
            &Location::unknown(),
        );
        assert!(value.is_none());
        assert_eq!(reporter.error_count(), 1);
    }

    #[test]
    fn test_any_uri() {
        assert!(check(BuiltinKind::AnyUri, "http://example.com/a?b=c").0.is_some());
        assert!(check(BuiltinKind::AnyUri, "relative/path").0.is_some());
        assert!(check(BuiltinKind::AnyUri, "has space").0.is_none());
        assert!(check(BuiltinKind::AnyUri, "http://[broken").0.is_none());
    }

    #[test]
    fn test_duration() {
        let (value, _) = check(BuiltinKind::Duration, "P1Y2M3DT4H5M6.5S");
        match value {
            Some(XsdValue::Duration { months, seconds }) => {
                assert_eq!(months, 14);
                assert_eq!(seconds, Decimal::from_str("273906.5").unwrap());
            }
            other => panic!("unexpected value: {:?}", other),
        }

        let (value, _) = check(BuiltinKind::Duration, "-P1M");
        assert_eq!(
            value,
            Some(XsdValue::Duration {
                months: -1,
                seconds: Decimal::ZERO
            })
        );

        assert!(check(BuiltinKind::Duration, "P").0.is_none());
        assert!(check(BuiltinKind::Duration, "P1YT").0.is_none());
        assert!(check(BuiltinKind::Duration, "1Y").0.is_none());
    }

    #[test]
    fn test_duration_huge_components() {
        // a day count whose seconds exceed i64 still yields a value
        let (value, errors) = check(BuiltinKind::Duration, "P106751991167301D");
        match value {
            Some(XsdValue::Duration { months, seconds }) => {
                assert_eq!(months, 0);
                assert_eq!(
                    seconds,
                    Decimal::from(106_751_991_167_301i64) * Decimal::from(86_400)
                );
            }
            other => panic!("unexpected value: {:?}", other),
        }
        assert_eq!(errors, 0);

        // digits beyond i64 are out of range, not silently zero
        let (value, errors) = check(BuiltinKind::Duration, "P99999999999999999999Y");
        assert!(value.is_none());
        assert_eq!(errors, 1);

        assert!(check(BuiltinKind::Duration, "P9223372036854775807Y").0.is_none());
    }

    #[test]
    fn test_timezone_offset_range() {
        assert!(check(BuiltinKind::DateTime, "2024-03-01T10:30:00+14:00").0.is_some());
        assert!(check(BuiltinKind::DateTime, "2024-03-01T10:30:00-14:00").0.is_some());

        let (value, errors) = check(BuiltinKind::DateTime, "2024-03-01T10:30:00+14:30");
        assert!(value.is_none());
        assert_eq!(errors, 1);
        assert!(check(BuiltinKind::Time, "10:30:00-14:01").0.is_none());
        assert!(check(BuiltinKind::Date, "2024-03-01+15:00").0.is_none());
    }

    #[test]
    fn test_binary() {
        assert_eq!(
            check(BuiltinKind::HexBinary, "0aFF").0,
            Some(XsdValue::Bytes(vec![0x0a, 0xff]))
        );
        assert!(check(BuiltinKind::HexBinary, "0aF").0.is_none());
        assert_eq!(
            check(BuiltinKind::Base64Binary, "aGk=").0,
            Some(XsdValue::Bytes(b"hi".to_vec()))
        );
        assert!(check(BuiltinKind::Base64Binary, "!!!").0.is_none());
    }

    #[test]
    fn test_gregorian_forms() {
        assert!(check(BuiltinKind::GYearMonth, "2024-02").0.is_some());
        assert!(check(BuiltinKind::GYearMonth, "2024-13").0.is_none());
        assert!(check(BuiltinKind::GMonthDay, "--02-29").0.is_some());
        assert!(check(BuiltinKind::GDay, "---31Z").0.is_some());
        assert!(check(BuiltinKind::GMonth, "--00").0.is_none());
    }

    #[test]
    fn test_notation_reports_info_only() {
        let (value, errors) = check(BuiltinKind::Notation, "pub:picture");
        assert!(value.is_some());
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_duration_partial_order() {
        let p1m = XsdValue::Duration {
            months: 1,
            seconds: Decimal::ZERO,
        };
        let p30d = XsdValue::Duration {
            months: 0,
            seconds: Decimal::from(30 * 86_400),
        };
        let p2m = XsdValue::Duration {
            months: 2,
            seconds: Decimal::ZERO,
        };

        assert_eq!(p1m.compare(&p2m), Some(Ordering::Less));
        assert_eq!(p1m.compare(&p30d), None);
    }
}
