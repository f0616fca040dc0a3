use std::{fmt, str::FromStr};

/// Lowest altitude, in centimetres (-100000.00m).
const MIN_ALTITUDE: i64 = -10_000_000;

/// Highest altitude, in centimetres (42849672.95m).
const MAX_ALTITUDE: i64 = 4_284_967_295;

/// Largest size or precision, in centimetres (90000000.00m).
const MAX_DISTANCE: u64 = 9_000_000_000;

/// Largest seconds value, in milliseconds (59.999s).
const MAX_SECONDS: u64 = 59_999;

/// Integer digits accepted for altitude and distance values.
const DISTANCE_DIGITS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "N" => Some(Hemisphere::North),
            "S" => Some(Hemisphere::South),
            "E" => Some(Hemisphere::East),
            "W" => Some(Hemisphere::West),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        }
    }

    fn axis(&self) -> Axis {
        match self {
            Hemisphere::North | Hemisphere::South => Axis::Latitude,
            Hemisphere::East | Hemisphere::West => Axis::Longitude,
        }
    }

    fn is_negative(&self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn max_degrees(&self) -> u64 {
        match self {
            Axis::Latitude => 90,
            Axis::Longitude => 180,
        }
    }

    fn degree_digits(&self) -> usize {
        match self {
            Axis::Latitude => 2,
            Axis::Longitude => 3,
        }
    }

    fn degrees(&self) -> LocField {
        match self {
            Axis::Latitude => LocField::LatitudeDegrees,
            Axis::Longitude => LocField::LongitudeDegrees,
        }
    }

    fn minutes(&self) -> LocField {
        match self {
            Axis::Latitude => LocField::LatitudeMinutes,
            Axis::Longitude => LocField::LongitudeMinutes,
        }
    }

    fn seconds(&self) -> LocField {
        match self {
            Axis::Latitude => LocField::LatitudeSeconds,
            Axis::Longitude => LocField::LongitudeSeconds,
        }
    }

    fn hemisphere(&self) -> LocField {
        match self {
            Axis::Latitude => LocField::LatitudeHemisphere,
            Axis::Longitude => LocField::LongitudeHemisphere,
        }
    }
}

/// The part of a LOC record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocField {
    LatitudeDegrees,
    LatitudeMinutes,
    LatitudeSeconds,
    LatitudeHemisphere,
    LongitudeDegrees,
    LongitudeMinutes,
    LongitudeSeconds,
    LongitudeHemisphere,
    Altitude,
    Size,
    HorizontalPrecision,
    VerticalPrecision,
}

impl fmt::Display for LocField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LocField::LatitudeDegrees => "latitude degrees",
            LocField::LatitudeMinutes => "latitude minutes",
            LocField::LatitudeSeconds => "latitude seconds",
            LocField::LatitudeHemisphere => "latitude hemisphere",
            LocField::LongitudeDegrees => "longitude degrees",
            LocField::LongitudeMinutes => "longitude minutes",
            LocField::LongitudeSeconds => "longitude seconds",
            LocField::LongitudeHemisphere => "longitude hemisphere",
            LocField::Altitude => "altitude",
            LocField::Size => "size",
            LocField::HorizontalPrecision => "horizontal precision",
            LocField::VerticalPrecision => "vertical precision",
        };
        f.write_str(name)
    }
}

const OPTIONAL_FIELDS: [LocField; 3] = [
    LocField::Size,
    LocField::HorizontalPrecision,
    LocField::VerticalPrecision,
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocError {
    #[error("missing {0}")]
    Missing(LocField),

    #[error("{field} {value:?} is not a number")]
    Malformed { field: LocField, value: String },

    #[error("{field} {value:?} has more than {decimals} decimal places")]
    TooPrecise {
        field: LocField,
        value: String,
        decimals: u32,
    },

    #[error("{field} {value:?} is out of range")]
    OutOfRange { field: LocField, value: String },

    #[error("{field} cannot be {found}")]
    WrongHemisphere { field: LocField, found: char },

    #[error("unexpected trailing data {0:?}")]
    TrailingData(String),
}

/// One axis of a LOC position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    degrees: u8,
    minutes: u8,
    milliseconds: u16,
    hemisphere: Hemisphere,
}

impl Coordinate {
    pub fn degrees(&self) -> u8 {
        self.degrees
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    /// Seconds, in thousandths.
    pub fn milliseconds(&self) -> u16 {
        self.milliseconds
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// Signed decimal degrees. South and West are negative.
    pub fn to_decimal_degrees(&self) -> f64 {
        let value = f64::from(self.degrees)
            + f64::from(self.minutes) / 60.0
            + f64::from(self.milliseconds) / 3_600_000.0;
        if self.hemisphere.is_negative() {
            -value
        } else {
            value
        }
    }
}

/// Parsed LOC content (RFC 1876 presentation format).
///
/// Distances are kept in centimetres, the resolution of the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loc {
    latitude: Coordinate,
    longitude: Coordinate,
    altitude: i64,
    size: Option<u64>,
    horizontal_precision: Option<u64>,
    vertical_precision: Option<u64>,
}

impl Loc {
    pub fn parse(text: &str) -> Result<Self, LocError> {
        let mut tokens = text.split_whitespace();

        let latitude = parse_coordinate(&mut tokens, Axis::Latitude)?;
        let longitude = parse_coordinate(&mut tokens, Axis::Longitude)?;

        let altitude = tokens
            .next()
            .ok_or(LocError::Missing(LocField::Altitude))
            .and_then(parse_altitude)?;

        let mut optional = [None; 3];
        for (slot, field) in optional.iter_mut().zip(OPTIONAL_FIELDS) {
            let Some(token) = tokens.next() else {
                break;
            };
            *slot = Some(parse_distance(token, field)?);
        }

        if let Some(extra) = tokens.next() {
            return Err(LocError::TrailingData(extra.to_owned()));
        }

        let [size, horizontal_precision, vertical_precision] = optional;
        Ok(Loc {
            latitude,
            longitude,
            altitude,
            size,
            horizontal_precision,
            vertical_precision,
        })
    }

    pub fn latitude(&self) -> &Coordinate {
        &self.latitude
    }

    pub fn longitude(&self) -> &Coordinate {
        &self.longitude
    }

    /// Altitude in centimetres.
    pub fn altitude(&self) -> i64 {
        self.altitude
    }

    /// Size in centimetres, if given.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn horizontal_precision(&self) -> Option<u64> {
        self.horizontal_precision
    }

    pub fn vertical_precision(&self) -> Option<u64> {
        self.vertical_precision
    }
}

impl FromStr for Loc {
    type Err = LocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Loc::parse(s)
    }
}

pub fn is_valid_loc(text: &str) -> bool {
    Loc::parse(text).is_ok()
}

/// Degrees, then up to two of minutes and seconds, then the hemisphere.
fn parse_coordinate<'a, I>(tokens: &mut I, axis: Axis) -> Result<Coordinate, LocError>
where
    I: Iterator<Item = &'a str>,
{
    let degrees_token = tokens.next().ok_or(LocError::Missing(axis.degrees()))?;
    let degrees = fixed_point(degrees_token, axis.degree_digits(), 0)
        .map_err(|error| error.into_loc(axis.degrees(), degrees_token, 0))?;
    if degrees > axis.max_degrees() {
        return Err(out_of_range(axis.degrees(), degrees_token));
    }

    let mut parts: [Option<&str>; 2] = [None, None];
    let hemisphere = loop {
        let token = tokens.next().ok_or(LocError::Missing(axis.hemisphere()))?;

        if let Some(hemisphere) = Hemisphere::from_token(token) {
            if hemisphere.axis() != axis {
                return Err(LocError::WrongHemisphere {
                    field: axis.hemisphere(),
                    found: hemisphere.letter(),
                });
            }
            break hemisphere;
        }

        let slot = parts
            .iter_mut()
            .find(|part| part.is_none())
            .ok_or(LocError::Missing(axis.hemisphere()))?;
        *slot = Some(token);
    };

    let minutes = match parts[0] {
        Some(token) => {
            let minutes = fixed_point(token, 2, 0)
                .map_err(|error| error.into_loc(axis.minutes(), token, 0))?;
            if minutes > 59 {
                return Err(out_of_range(axis.minutes(), token));
            }
            minutes
        }
        None => 0,
    };

    let milliseconds = match parts[1] {
        Some(token) => {
            let millis = fixed_point(token, 2, 3)
                .map_err(|error| error.into_loc(axis.seconds(), token, 3))?;
            if millis > MAX_SECONDS {
                return Err(out_of_range(axis.seconds(), token));
            }
            millis
        }
        None => 0,
    };

    // All three were range checked above.
    Ok(Coordinate {
        degrees: degrees as u8,
        minutes: minutes as u8,
        milliseconds: milliseconds as u16,
        hemisphere,
    })
}

fn parse_altitude(token: &str) -> Result<i64, LocError> {
    let field = LocField::Altitude;
    let unitless = token.strip_suffix('m').unwrap_or(token);
    let (negative, magnitude) = match unitless.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, unitless),
    };

    let centimetres = fixed_point(magnitude, DISTANCE_DIGITS, 2)
        .map_err(|error| error.into_loc(field, token, 2))?;
    let centimetres = i64::try_from(centimetres).map_err(|_| out_of_range(field, token))?;
    let altitude = if negative { -centimetres } else { centimetres };

    if !(MIN_ALTITUDE..=MAX_ALTITUDE).contains(&altitude) {
        return Err(out_of_range(field, token));
    }
    Ok(altitude)
}

fn parse_distance(token: &str, field: LocField) -> Result<u64, LocError> {
    let unitless = token.strip_suffix('m').unwrap_or(token);
    let centimetres = fixed_point(unitless, DISTANCE_DIGITS, 2)
        .map_err(|error| error.into_loc(field, token, 2))?;
    if centimetres > MAX_DISTANCE {
        return Err(out_of_range(field, token));
    }
    Ok(centimetres)
}

fn out_of_range(field: LocField, token: &str) -> LocError {
    LocError::OutOfRange {
        field,
        value: token.to_owned(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FixedPointError {
    Malformed,
    TooLong,
    TooPrecise,
}

impl FixedPointError {
    fn into_loc(self, field: LocField, token: &str, decimals: u32) -> LocError {
        let value = token.to_owned();
        match self {
            FixedPointError::Malformed => LocError::Malformed { field, value },
            FixedPointError::TooLong => LocError::OutOfRange { field, value },
            FixedPointError::TooPrecise => LocError::TooPrecise {
                field,
                value,
                decimals,
            },
        }
    }
}

/// Parse an unsigned decimal into an integer scaled by `10^decimals`.
///
/// At most `digits` integer digits and `decimals` fractional digits are
/// accepted. A fractional part, when present, needs at least one digit.
fn fixed_point(token: &str, digits: usize, decimals: u32) -> Result<u64, FixedPointError> {
    let (whole, fraction) = match token.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (token, None),
    };

    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole) || !fraction.is_none_or(is_digits) {
        return Err(FixedPointError::Malformed);
    }
    if whole.len() > digits {
        return Err(FixedPointError::TooLong);
    }

    let fraction = fraction.unwrap_or("");
    let scale = usize::try_from(decimals).map_err(|_| FixedPointError::TooLong)?;
    if fraction.len() > scale {
        return Err(FixedPointError::TooPrecise);
    }

    let padded = format!("{whole}{fraction:0<scale$}");
    padded.parse().map_err(|_| FixedPointError::TooLong)
}
