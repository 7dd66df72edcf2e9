#![forbid(unsafe_code)]

//! Client for NASA MERRA-2 reanalysis data.
//!
//! This crate covers the full fetch-and-reduce pipeline for the GES DISC
//! archive: a static product catalog, deterministic URL construction over a
//! date range (accounting for three-hourly, hourly, and monthly product
//! granularities), authenticated sequential downloads, and structure-preserving
//! subsetting of the resulting NetCDF files to a geographic bounding box and
//! variable list.
//!
//! **Quick start**
//! ```no_run
//! use std::path::Path;
//! use merra2_subset::{process_files, BoundingBox, Client, Credentials, DateRange};
//!
//! let range = DateRange::parse("2020-01-01", "2020-01-02")?;
//! let client = Client::new(Credentials::from_env()?)?;
//! let downloaded = client.download("M2T1NXFLX", range, Path::new("data"))?;
//!
//! let bbox = BoundingBox { north: 60.0, south: 30.0, east: 40.0, west: -10.0 };
//! let vars = vec!["PRECTOT".to_string(), "EVAP".to_string()];
//! let processed = process_files(&downloaded.files, Path::new("processed"), &bbox, &vars);
//! println!("{}/{} files processed", processed.files.len(), processed.attempted);
//! # Ok::<(), merra2_subset::Error>(())
//! ```
//!
//! Notes:
//! - Downloads require a NASA Earthdata login (`MERRA_USERNAME`/`MERRA_PASSWORD`).
//! - Failures local to one URL or one file are logged and skipped; batch
//!   operations report attempted vs succeeded counts.

pub mod catalog;
mod client;
mod config;
mod date;
mod error;
mod locator;
mod region;
mod subset;

pub use crate::catalog::{Granularity, ProductDescriptor};
pub use crate::client::{Client, DownloadOutcome};
pub use crate::config::{Credentials, Settings, TimeRange};
pub use crate::date::{parse_date, DateRange};
pub use crate::error::{Error, Result};
pub use crate::locator::locate;
pub use crate::region::{resolve, BoundingBox, IndexRange};
pub use crate::subset::{process_files, subset_file, ProcessOutcome};
