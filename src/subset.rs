use std::fs;
use std::path::{Path, PathBuf};

use netcdf::types::{BasicType, VariableType};
use netcdf::{File, FileMut, NcPutGet, Variable, VariableMut};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::region::{self, BoundingBox, IndexRange};

/// Names of the spatial axes in MERRA-2 files.
pub const LAT_AXIS: &str = "lat";
pub const LON_AXIS: &str = "lon";

/// Outcome of a batch subsetting pass.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub attempted: usize,
    pub files: Vec<PathBuf>,
}

/// Subset one NetCDF file to a bounding box and variable list.
///
/// The output replicates the source structure: every dimension (lat/lon
/// truncated to the resolved index ranges, unlimited dimensions kept
/// unlimited), all global attributes, and for each requested variable its
/// dtype, dimension list, and attributes. Variables carrying both spatial
/// axes are cut to the latRange x lonRange block; everything else is copied
/// in full. Requested variables absent from the source are skipped with a
/// warning.
///
/// Returns the path of the created file, named `processed_<source-name>`.
pub fn subset_file(
    input: &Path,
    output_dir: &Path,
    bbox: &BoundingBox,
    variables: &[String],
) -> Result<PathBuf> {
    let src = netcdf::open(input)?;

    let lats = coordinate_values(&src, LAT_AXIS)?;
    let lons = coordinate_values(&src, LON_AXIS)?;
    let (lat_range, lon_range) = region::resolve(&lats, &lons, bbox)?;

    fs::create_dir_all(output_dir)?;
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.nc4".to_string());
    let out_path = output_dir.join(format!("processed_{name}"));

    let mut dst = netcdf::create(&out_path)?;

    for dim in src.dimensions() {
        let dim_name = dim.name();
        if dim_name == LAT_AXIS {
            dst.add_dimension(&dim_name, lat_range.len())?;
        } else if dim_name == LON_AXIS {
            dst.add_dimension(&dim_name, lon_range.len())?;
        } else if dim.is_unlimited() {
            dst.add_unlimited_dimension(&dim_name)?;
        } else {
            dst.add_dimension(&dim_name, dim.len())?;
        }
    }

    for attr in src.attributes() {
        dst.add_attribute(attr.name(), attr.value()?)?;
    }

    for var_name in variables {
        let Some(var) = src.variable(var_name) else {
            warn!(variable = %var_name, file = %input.display(), "requested variable not in source, skipping");
            continue;
        };
        copy_variable(&mut dst, &var, lat_range, lon_range)?;
    }

    // Closing flushes; source and destination handles are released here on
    // every path, including early returns above.
    drop(dst);
    Ok(out_path)
}

/// Subset a batch of files, continuing past per-file failures.
///
/// Each failure is logged and the file skipped; the outcome reports how many
/// files were attempted and which outputs were produced.
pub fn process_files(
    inputs: &[PathBuf],
    output_dir: &Path,
    bbox: &BoundingBox,
    variables: &[String],
) -> ProcessOutcome {
    let mut files = Vec::new();
    for input in inputs {
        match subset_file(input, output_dir, bbox, variables) {
            Ok(path) => {
                info!(file = %path.display(), "processed");
                files.push(path);
            }
            Err(e) => {
                warn!(file = %input.display(), error = %e, "processing failed, skipping");
            }
        }
    }
    ProcessOutcome {
        attempted: inputs.len(),
        files,
    }
}

fn coordinate_values(file: &File, name: &str) -> Result<Vec<f64>> {
    let var = file
        .variable(name)
        .ok_or_else(|| Error::MissingCoordinate(name.to_string()))?;
    Ok(var.get_values(..)?)
}

fn copy_variable(
    dst: &mut FileMut,
    var: &Variable,
    lat_range: IndexRange,
    lon_range: IndexRange,
) -> Result<()> {
    match var.vartype() {
        VariableType::Basic(ty) => match ty {
            BasicType::Byte => copy_data::<i8>(dst, var, lat_range, lon_range),
            BasicType::Ubyte => copy_data::<u8>(dst, var, lat_range, lon_range),
            BasicType::Short => copy_data::<i16>(dst, var, lat_range, lon_range),
            BasicType::Ushort => copy_data::<u16>(dst, var, lat_range, lon_range),
            BasicType::Int => copy_data::<i32>(dst, var, lat_range, lon_range),
            BasicType::Uint => copy_data::<u32>(dst, var, lat_range, lon_range),
            BasicType::Int64 => copy_data::<i64>(dst, var, lat_range, lon_range),
            BasicType::Uint64 => copy_data::<u64>(dst, var, lat_range, lon_range),
            BasicType::Float => copy_data::<f32>(dst, var, lat_range, lon_range),
            BasicType::Double => copy_data::<f64>(dst, var, lat_range, lon_range),
            #[allow(unreachable_patterns)]
            other => {
                warn!(variable = %var.name(), vartype = ?other, "unsupported variable type, skipping");
                Ok(())
            }
        },
        other => {
            warn!(variable = %var.name(), vartype = ?other, "unsupported variable type, skipping");
            Ok(())
        }
    }
}

fn copy_data<T: NcPutGet + Copy>(
    dst: &mut FileMut,
    var: &Variable,
    lat_range: IndexRange,
    lon_range: IndexRange,
) -> Result<()> {
    let dim_names: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
    let dim_refs: Vec<&str> = dim_names.iter().map(String::as_str).collect();
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();

    let name = var.name();
    let mut out = dst.add_variable::<T>(&name, &dim_refs)?;
    for attr in var.attributes() {
        out.put_attribute(attr.name(), attr.value()?)?;
    }

    if shape.contains(&0) {
        // Nothing to copy from an empty record dimension.
        return Ok(());
    }

    let spatial = dim_names.iter().any(|d| d == LAT_AXIS) && dim_names.iter().any(|d| d == LON_AXIS);
    let (data, out_shape): (Vec<T>, Vec<usize>) = if spatial {
        let ranges: Vec<IndexRange> = dim_names
            .iter()
            .zip(&shape)
            .map(|(d, &len)| match d.as_str() {
                n if n == LAT_AXIS => lat_range,
                n if n == LON_AXIS => lon_range,
                _ => IndexRange { min: 0, max: len - 1 },
            })
            .collect();
        let out_shape = ranges.iter().map(IndexRange::len).collect();
        (read_block(var, &shape, &ranges)?, out_shape)
    } else {
        (var.get_values(..)?, shape)
    };

    put_block(&mut out, &data, &out_shape)
}

/// Read only the selected hyperslab. Ranks above four (unseen in MERRA-2)
/// fall back to a full read cut in memory.
fn read_block<T: NcPutGet + Copy>(
    var: &Variable,
    shape: &[usize],
    ranges: &[IndexRange],
) -> Result<Vec<T>> {
    let ext: Vec<std::ops::Range<usize>> = ranges.iter().map(|r| r.min..r.max + 1).collect();
    Ok(match ext.as_slice() {
        [a, b] => var.get_values((a.clone(), b.clone()))?,
        [a, b, c] => var.get_values((a.clone(), b.clone(), c.clone()))?,
        [a, b, c, d] => var.get_values((a.clone(), b.clone(), c.clone(), d.clone()))?,
        _ => {
            let full: Vec<T> = var.get_values(..)?;
            extract_block(&full, shape, ranges)
        }
    })
}

/// Write one full block with explicit extents, so that a record dimension of
/// a freshly created file grows to fit instead of staying at length zero.
fn put_block<T: NcPutGet>(var: &mut VariableMut, data: &[T], shape: &[usize]) -> Result<()> {
    match shape {
        [a] => var.put_values(data, 0..*a)?,
        [a, b] => var.put_values(data, (0..*a, 0..*b))?,
        [a, b, c] => var.put_values(data, (0..*a, 0..*b, 0..*c))?,
        [a, b, c, d] => var.put_values(data, (0..*a, 0..*b, 0..*c, 0..*d))?,
        _ => var.put_values(data, ..)?,
    }
    Ok(())
}

/// Extract the rectangular sub-block selected by per-dimension inclusive
/// ranges from a row-major array.
fn extract_block<T: Copy>(data: &[T], shape: &[usize], ranges: &[IndexRange]) -> Vec<T> {
    if shape.is_empty() {
        return data.to_vec();
    }

    let mut strides = vec![1usize; shape.len()];
    for i in (0..shape.len() - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }

    let last = shape.len() - 1;
    let out_len: usize = ranges.iter().map(IndexRange::len).product();
    let mut out = Vec::with_capacity(out_len);

    // Odometer over the outer dimensions; the innermost range is contiguous
    // and copied as a slice.
    let mut idx: Vec<usize> = ranges[..last].iter().map(|r| r.min).collect();
    'outer: loop {
        let base: usize = idx.iter().zip(&strides).map(|(i, s)| i * s).sum();
        let start = base + ranges[last].min;
        out.extend_from_slice(&data[start..start + ranges[last].len()]);

        for d in (0..last).rev() {
            if idx[d] < ranges[d].max {
                idx[d] += 1;
                continue 'outer;
            }
            idx[d] = ranges[d].min;
        }
        break;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(min: usize, max: usize) -> IndexRange {
        IndexRange { min, max }
    }

    #[test]
    fn extract_block_full_extent_is_identity() {
        let data: Vec<i32> = (0..24).collect();
        let shape = [2, 3, 4];
        let ranges = [r(0, 1), r(0, 2), r(0, 3)];
        assert_eq!(extract_block(&data, &shape, &ranges), data);
    }

    #[test]
    fn extract_block_cuts_inner_rectangle() {
        // 3x4 grid, values row*10 + col.
        let data: Vec<i32> = (0..3).flat_map(|i| (0..4).map(move |j| i * 10 + j)).collect();
        let shape = [3, 4];
        let ranges = [r(1, 2), r(1, 2)];
        assert_eq!(extract_block(&data, &shape, &ranges), vec![11, 12, 21, 22]);
    }

    #[test]
    fn extract_block_keeps_leading_dims_full() {
        // (time=2, lat=2, lon=3), cut lon to 1..=2.
        let data: Vec<i32> = (0..12).collect();
        let shape = [2, 2, 3];
        let ranges = [r(0, 1), r(0, 1), r(1, 2)];
        assert_eq!(
            extract_block(&data, &shape, &ranges),
            vec![1, 2, 4, 5, 7, 8, 10, 11]
        );
    }

    #[test]
    fn extract_block_one_dimensional() {
        let data = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(extract_block(&data, &[4], &[r(1, 2)]), vec![20.0, 30.0]);
    }
}
