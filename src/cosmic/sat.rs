/*
    podyn, force models for precise orbit determination
    Copyright (C) 2026 podyn contributors

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use snafu::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Navigation system of a satellite, ordered as RINEX 3 lists them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SatSystem {
    GPS,
    Glonass,
    Galileo,
    BeiDou,
    QZSS,
    SBAS,
    IRNSS,
    /// Low Earth orbiters, e.g. altimetry or gravimetry missions tracked with GNSS receivers
    LEO,
}

impl SatSystem {
    /// RINEX 3 one-letter code of this system.
    pub fn code(&self) -> char {
        match self {
            Self::GPS => 'G',
            Self::Glonass => 'R',
            Self::Galileo => 'E',
            Self::BeiDou => 'C',
            Self::QZSS => 'J',
            Self::SBAS => 'S',
            Self::IRNSS => 'I',
            Self::LEO => 'L',
        }
    }

    pub fn from_code(code: char) -> Result<Self, SatIdError> {
        match code.to_ascii_uppercase() {
            'G' => Ok(Self::GPS),
            'R' => Ok(Self::Glonass),
            'E' => Ok(Self::Galileo),
            'C' => Ok(Self::BeiDou),
            'J' => Ok(Self::QZSS),
            'S' => Ok(Self::SBAS),
            'I' => Ok(Self::IRNSS),
            'L' => Ok(Self::LEO),
            _ => Err(SatIdError::UnknownSystem { code }),
        }
    }
}

impl fmt::Display for SatSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::GPS => "GPS",
            Self::Glonass => "GLONASS",
            Self::Galileo => "Galileo",
            Self::BeiDou => "BeiDou",
            Self::QZSS => "QZSS",
            Self::SBAS => "SBAS",
            Self::IRNSS => "IRNSS",
            Self::LEO => "LEO",
        };
        write!(f, "{name}")
    }
}

/// Identifies a satellite by its navigation system and number (e.g. PRN).
///
/// Ordering is by system first, then by number, so that maps keyed by `SatId` iterate a
/// constellation system by system.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SatId {
    pub system: SatSystem,
    pub prn: u16,
}

impl SatId {
    pub const fn new(system: SatSystem, prn: u16) -> Self {
        Self { system, prn }
    }
}

/// Displays the satellite as in RINEX 3 files, e.g. `G01`.
impl fmt::Display for SatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.system.code(), self.prn)
    }
}

impl FromStr for SatId {
    type Err = SatIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let code = chars.next().context(EmptySnafu)?;
        let system = SatSystem::from_code(code)?;
        let num = chars.as_str().trim();
        let prn = num.parse::<u16>().map_err(|_| SatIdError::InvalidNumber {
            repr: s.to_string(),
        })?;
        Ok(Self { system, prn })
    }
}

impl Serialize for SatId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SatId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SatIdError {
    #[snafu(display("empty satellite identifier"))]
    Empty,
    #[snafu(display("unknown satellite system code `{code}`"))]
    UnknownSystem { code: char },
    #[snafu(display("invalid satellite number in `{repr}`"))]
    InvalidNumber { repr: String },
}
