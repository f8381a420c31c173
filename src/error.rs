use std::convert::From;
use std::error;
use std::fmt;
use std::io;
use std::num::ParseIntError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ErrorKind {
    InvalidDateInput,
    CommandParse,
    ConfigParse,
    IOError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    pub fn with_msg(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }

    pub fn invalid_date(msg: &str) -> Self {
        Error::new(ErrorKind::InvalidDateInput, msg)
    }

    pub fn is_invalid_date(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidDateInput)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            message: None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::from(ErrorKind::IOError(io_error))
    }
}

impl From<toml::de::Error> for Error {
    fn from(toml_error: toml::de::Error) -> Error {
        Error::new(ErrorKind::ConfigParse, &toml_error.to_string())
    }
}

impl From<ParseIntError> for Error {
    fn from(parse_error: ParseIntError) -> Error {
        Error::new(
            ErrorKind::InvalidDateInput,
            &format!("not an integer: {}", parse_error),
        )
    }
}

impl<E: std::fmt::Debug> From<nom::Err<E>> for Error {
    fn from(error: nom::Err<E>) -> Self {
        Error::new(
            ErrorKind::CommandParse,
            &format!("Error while parsing: {}", error),
        )
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        if let ErrorKind::IOError(err) = err.kind {
            err
        } else {
            let kind = &err.kind;
            io::Error::new(
                io::ErrorKind::InvalidInput,
                err.message.unwrap_or_else(|| kind.as_str()),
            )
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind.as_str(), msg),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

impl error::Error for Error {}

impl ErrorKind {
    pub fn as_str(&self) -> String {
        match self {
            ErrorKind::InvalidDateInput => "invalid date input".to_owned(),
            ErrorKind::CommandParse => "invalid command".to_owned(),
            ErrorKind::ConfigParse => "invalid config file".to_owned(),
            ErrorKind::IOError(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_message() {
        let err = Error::invalid_date("year 300000 out of range");
        assert_eq!(
            err.to_string(),
            "invalid date input: year 300000 out of range"
        );
        assert!(err.is_invalid_date());
    }

    #[test]
    fn parse_int_is_invalid_date() {
        let err: Error = "feb".parse::<i64>().unwrap_err().into();
        assert!(err.is_invalid_date());
    }

    #[test]
    fn into_io_error() {
        let io_err: io::Error = Error::from(ErrorKind::CommandParse).into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(io_err.to_string(), "invalid command");
    }
}
