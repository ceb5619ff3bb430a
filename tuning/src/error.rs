/*
 * Copyright (c):
 * 2024 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of gt7-tuner.
 *
 * gt7-tuner is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * gt7-tuner is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with gt7-tuner. If not, see <https://www.gnu.org/licenses/>.
 */

use std::{error, fmt, result};
use std::fmt::{Display, Formatter};

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug)]
pub struct Error{
    kind: ErrorKind,
    details: String
}

impl Error {
    pub fn new(kind: ErrorKind, details: String) -> Error {
        Error{ kind, details }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.kind.as_str(), self.details)
    }
}

impl error::Error for Error {}

impl From<PropertyParseError> for Error {
    fn from(e: PropertyParseError) -> Self {
        Error::new(ErrorKind::ParseError, e.to_string())
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ErrorKind {
    ArgumentError,
    ParseError
}

impl ErrorKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ArgumentError => "argument error",
            ErrorKind::ParseError => "parse error"
        }
    }
}

#[derive(Debug)]
pub struct PropertyParseError {
    invalid_value: String
}

impl PropertyParseError {
    pub fn new(invalid_value: &str) -> PropertyParseError {
        PropertyParseError {
            invalid_value: String::from(invalid_value)
        }
    }
}

impl Display for PropertyParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown value '{}'", &self.invalid_value)
    }
}

impl error::Error for PropertyParseError {}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use crate::error::{Error, ErrorKind};
    use crate::vehicle::Drivetrain;

    #[test]
    fn parse_failures_convert() {
        let err: Error = Drivetrain::from_str("RWD").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::ParseError);
        assert_eq!(err.to_string(), "parse error - Unknown value 'RWD'");
    }
}
