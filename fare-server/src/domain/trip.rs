//! Trip types and the weekend modes derived from them.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unknown trip type tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown trip type: {0}")]
pub struct UnknownTripType(pub String);

/// Weekday pattern a weekend-family trip must follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekendMode {
    /// Out Friday or Saturday, back Saturday or Sunday.
    Weekend,
    /// Out Thursday to Saturday, back Sunday or Monday.
    LongWeekend,
}

/// The kind of trip being searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripType {
    OneWay,
    Return,
    Weekend,
    LongWeekend,
}

impl TripType {
    /// Whether this trip has an inbound leg and therefore a stay window.
    pub fn is_return_family(self) -> bool {
        !matches!(self, TripType::OneWay)
    }

    /// The weekday pattern constraining this trip, if any.
    pub fn weekend_mode(self) -> Option<WeekendMode> {
        match self {
            TripType::Weekend => Some(WeekendMode::Weekend),
            TripType::LongWeekend => Some(WeekendMode::LongWeekend),
            TripType::OneWay | TripType::Return => None,
        }
    }

    /// The query-string tag for this trip type.
    pub fn as_str(self) -> &'static str {
        match self {
            TripType::OneWay => "oneWay",
            TripType::Return => "return",
            TripType::Weekend => "weekend",
            TripType::LongWeekend => "longWeekend",
        }
    }
}

impl FromStr for TripType {
    type Err = UnknownTripType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "oneWay" => Ok(TripType::OneWay),
            "return" => Ok(TripType::Return),
            "weekend" => Ok(TripType::Weekend),
            "longWeekend" => Ok(TripType::LongWeekend),
            other => Err(UnknownTripType(other.to_string())),
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_tags() {
        assert_eq!("oneWay".parse::<TripType>(), Ok(TripType::OneWay));
        assert_eq!("return".parse::<TripType>(), Ok(TripType::Return));
        assert_eq!("weekend".parse::<TripType>(), Ok(TripType::Weekend));
        assert_eq!("longWeekend".parse::<TripType>(), Ok(TripType::LongWeekend));
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert!("oneway".parse::<TripType>().is_err());
        assert!("Return".parse::<TripType>().is_err());
        assert!("".parse::<TripType>().is_err());
    }

    #[test]
    fn display_roundtrips() {
        for t in [
            TripType::OneWay,
            TripType::Return,
            TripType::Weekend,
            TripType::LongWeekend,
        ] {
            assert_eq!(t.to_string().parse::<TripType>(), Ok(t));
        }
    }

    #[test]
    fn derived_properties() {
        assert!(!TripType::OneWay.is_return_family());
        assert!(TripType::Return.is_return_family());
        assert!(TripType::Weekend.is_return_family());
        assert!(TripType::LongWeekend.is_return_family());

        assert_eq!(TripType::OneWay.weekend_mode(), None);
        assert_eq!(TripType::Return.weekend_mode(), None);
        assert_eq!(TripType::Weekend.weekend_mode(), Some(WeekendMode::Weekend));
        assert_eq!(
            TripType::LongWeekend.weekend_mode(),
            Some(WeekendMode::LongWeekend)
        );
    }
}
