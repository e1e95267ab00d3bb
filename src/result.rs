extern crate anyhow;
extern crate flexi_logger;
extern crate getopts;
extern crate image;
extern crate reqwest;
extern crate serde_json;
extern crate std;

pub type BoardResult<T> = std::result::Result<T, BoardError>;

#[derive(Debug)]
pub enum BoardError {
    FetchError(String),
    HttpError(reqwest::Error),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    ImageError(image::ImageError),
    MissingConfig(&'static str),
    MissingFile(std::path::PathBuf),
    UploadError(String),
    UsageError(getopts::Fail),
    LoggerError(flexi_logger::FlexiLoggerError),
    OtherError(anyhow::Error),
}

pub fn make_error(message: &str) -> BoardError {
    return BoardError::OtherError(anyhow::anyhow!(message.to_string()));
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            BoardError::FetchError(ref msg) => {
                return write!(f, "Fetch Error: {}", msg);
            },
            BoardError::HttpError(ref err) => {
                return write!(f, "HTTP Error: {}", err);
            },
            BoardError::IoError(ref err) => {
                return write!(f, "IO Error: {}", err);
            },
            BoardError::JsonError(ref err) => {
                return write!(f, "JSON Error: {}", err);
            },
            BoardError::ImageError(ref err) => {
                return write!(f, "Image Error: {}", err);
            },
            BoardError::MissingConfig(ref name) => {
                return write!(f, "Missing configuration: {} is not set", name);
            },
            BoardError::MissingFile(ref path) => {
                return write!(f, "File not found: '{}'", path.display());
            },
            BoardError::UploadError(ref msg) => {
                return write!(f, "Upload Error: {}", msg);
            },
            BoardError::UsageError(ref err) => {
                return write!(f, "Usage Error: {}", err);
            },
            BoardError::LoggerError(ref err) => {
                return write!(f, "Logger Error: {}", err);
            },
            BoardError::OtherError(ref err) => {
                return write!(f, "Error: {:#}", err);
            },
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            BoardError::HttpError(ref err) => Some(err),
            BoardError::IoError(ref err) => Some(err),
            BoardError::JsonError(ref err) => Some(err),
            BoardError::ImageError(ref err) => Some(err),
            BoardError::UsageError(ref err) => Some(err),
            BoardError::LoggerError(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BoardError {
    fn from(err: reqwest::Error) -> BoardError {
        return BoardError::HttpError(err);
    }
}

impl From<std::io::Error> for BoardError {
    fn from(err: std::io::Error) -> BoardError {
        return BoardError::IoError(err);
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> BoardError {
        return BoardError::JsonError(err);
    }
}

impl From<image::ImageError> for BoardError {
    fn from(err: image::ImageError) -> BoardError {
        return BoardError::ImageError(err);
    }
}

impl From<getopts::Fail> for BoardError {
    fn from(err: getopts::Fail) -> BoardError {
        return BoardError::UsageError(err);
    }
}

impl From<flexi_logger::FlexiLoggerError> for BoardError {
    fn from(err: flexi_logger::FlexiLoggerError) -> BoardError {
        return BoardError::LoggerError(err);
    }
}

impl From<anyhow::Error> for BoardError {
    fn from(err: anyhow::Error) -> BoardError {
        return BoardError::OtherError(err);
    }
}
