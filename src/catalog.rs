use std::fmt;

use crate::error::{Error, Result};

/// How often a product publishes one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    ThreeHourly,
    Hourly,
    Monthly,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Granularity::ThreeHourly => "3-hour",
            Granularity::Hourly => "1-hour",
            Granularity::Monthly => "monthly",
        };
        f.write_str(s)
    }
}

/// Static metadata for one MERRA-2 product stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductDescriptor {
    pub id: &'static str,
    pub description: &'static str,
    pub granularity: Granularity,
    pub variables: &'static [&'static str],
    pub base_url: &'static str,
}

/// Built-in catalog (same products and GES DISC OPeNDAP locations as upstream).
const PRODUCTS: &[ProductDescriptor] = &[
    ProductDescriptor {
        id: "M2I3NPASM",
        description: "3-hourly instantaneous assimilated state on pressure levels",
        granularity: Granularity::ThreeHourly,
        variables: &["O3", "CO", "NO2", "T", "U", "V", "H", "PS"],
        base_url: "https://goldsmr4.gesdisc.eosdis.nasa.gov/opendap/MERRA2/M2I3NPASM.5.12.4/",
    },
    ProductDescriptor {
        id: "M2T1NXFLX",
        description: "1-hourly time-averaged single-level diagnostics",
        granularity: Granularity::Hourly,
        variables: &["PRECTOT", "EVAP", "LWGNT", "SWGNT"],
        base_url: "https://goldsmr4.gesdisc.eosdis.nasa.gov/opendap/MERRA2/M2T1NXFLX.5.12.4/",
    },
    ProductDescriptor {
        id: "M2T1NXAER",
        description: "1-hourly time-averaged aerosol diagnostics",
        granularity: Granularity::Hourly,
        variables: &["BCSMASS", "DUSMASS", "OCSMASS", "SO2SMASS"],
        base_url: "https://goldsmr4.gesdisc.eosdis.nasa.gov/opendap/MERRA2/M2T1NXAER.5.12.4/",
    },
    ProductDescriptor {
        id: "M2TMNXAER",
        description: "monthly mean aerosol diagnostics",
        granularity: Granularity::Monthly,
        variables: &["BCSMASS", "DUSMASS", "OCSMASS", "SO2SMASS", "TOTEXTTAU"],
        base_url: "https://goldsmr4.gesdisc.eosdis.nasa.gov/opendap/MERRA2_MONTHLY/M2TMNXAER.5.12.4/",
    },
    ProductDescriptor {
        id: "M2TMNXFLX",
        description: "monthly mean single-level diagnostics",
        granularity: Granularity::Monthly,
        variables: &["PRECTOT", "EVAP", "LWGNT", "SWGNT"],
        base_url: "https://goldsmr4.gesdisc.eosdis.nasa.gov/opendap/MERRA2_MONTHLY/M2TMNXFLX.5.12.4/",
    },
];

/// Look up a product by identifier.
///
/// Identifiers may carry a version suffix (e.g. `M2T1NXFLX.5.12.4`); matching
/// is on the root before the first `.`.
pub fn lookup(id: &str) -> Result<&'static ProductDescriptor> {
    let root = id.split('.').next().unwrap_or(id);
    PRODUCTS
        .iter()
        .find(|p| p.id == root)
        .ok_or_else(|| Error::UnsupportedProduct(id.to_string()))
}

/// All cataloged products, in fixed order.
pub fn list_all() -> &'static [ProductDescriptor] {
    PRODUCTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_product() {
        let p = lookup("M2T1NXFLX").unwrap();
        assert_eq!(p.granularity, Granularity::Hourly);
        assert!(p.variables.contains(&"PRECTOT"));
    }

    #[test]
    fn lookup_matches_root_before_version_suffix() {
        let p = lookup("M2I3NPASM.5.12.4").unwrap();
        assert_eq!(p.id, "M2I3NPASM");
    }

    #[test]
    fn lookup_unknown_product_fails() {
        assert!(matches!(
            lookup("M2NOPE"),
            Err(Error::UnsupportedProduct(_))
        ));
    }

    #[test]
    fn list_all_is_stable() {
        let ids: Vec<_> = list_all().iter().map(|p| p.id).collect();
        assert_eq!(
            ids,
            ["M2I3NPASM", "M2T1NXFLX", "M2T1NXAER", "M2TMNXAER", "M2TMNXFLX"]
        );
    }
}
