use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported product: {0}")]
    UnsupportedProduct(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid date range: end {end} is before start {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid bounding box: south {south} exceeds north {north}")]
    InvalidBoundingBox { south: f64, north: f64 },

    #[error("bounding box matches no grid cells on the {axis} axis")]
    EmptyRegion { axis: &'static str },

    #[error("coordinate axis {axis} is not monotonic")]
    NonMonotonicAxis { axis: &'static str },

    #[error("missing coordinate variable: {0}")]
    MissingCoordinate(String),

    #[error("credentials not found: set {0}")]
    MissingCredentials(&'static str),

    #[error("server returned status {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("netcdf error: {0}")]
    Netcdf(#[from] netcdf::Error),
}
