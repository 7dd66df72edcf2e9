use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::catalog::{self, Granularity, ProductDescriptor};
use crate::date::DateRange;
use crate::error::Result;

pub const SUBDAILY_PATTERN: &str =
    "{base}{yyyy}/{mm}/MERRA2_{stream}.{product}.{yyyymmdd}.{hh}00.nc4";
pub const MONTHLY_PATTERN: &str =
    "{base}{yyyy}/{mm}/MERRA2_{stream}.{product}.{yyyymm}.nc4";

/// MERRA-2 processing-stream token used in archive filenames.
pub const PROCESSING_STREAM: &str = "400";

fn format_url(pattern: &str, product: &ProductDescriptor, date: NaiveDate, hour: Option<u32>) -> String {
    let yyyy = format!("{:04}", date.year());
    let mm = format!("{:02}", date.month());
    let yyyymmdd = format!("{:04}{:02}{:02}", date.year(), date.month(), date.day());
    let yyyymm = format!("{:04}{:02}", date.year(), date.month());

    let mut url = pattern
        .replace("{base}", product.base_url)
        .replace("{product}", product.id)
        .replace("{stream}", PROCESSING_STREAM)
        .replace("{yyyy}", &yyyy)
        .replace("{mm}", &mm)
        .replace("{yyyymmdd}", &yyyymmdd)
        .replace("{yyyymm}", &yyyymm);

    if let Some(hour) = hour {
        url = url.replace("{hh}", &format!("{hour:02}"));
    }

    url
}

/// Build the ordered list of archive URLs covering `range` for a product.
///
/// Sub-daily products emit one URL per time step per day (8 for three-hourly,
/// 24 for hourly); monthly products emit exactly one URL per distinct
/// (year, month) in the range. Output is chronological and deterministic.
pub fn locate(product_id: &str, range: DateRange) -> Result<Vec<String>> {
    let product = catalog::lookup(product_id)?;

    let mut urls = Vec::new();
    let mut seen_months: BTreeSet<(i32, u32)> = BTreeSet::new();

    for day in range.days() {
        match product.granularity {
            Granularity::ThreeHourly => {
                for hour in (0..24u32).step_by(3) {
                    urls.push(format_url(SUBDAILY_PATTERN, product, day, Some(hour)));
                }
            }
            Granularity::Hourly => {
                for hour in 0..24u32 {
                    urls.push(format_url(SUBDAILY_PATTERN, product, day, Some(hour)));
                }
            }
            Granularity::Monthly => {
                if seen_months.insert((day.year(), day.month())) {
                    urls.push(format_url(MONTHLY_PATTERN, product, day, None));
                }
            }
        }
    }

    Ok(urls)
}
