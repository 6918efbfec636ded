//! Rotating flat lists of points, in memory and as JSON files.
//!
//! A point file is a JSON array of `{"x": .., "y": .., "z": ..}` objects.

use std::io::Write;
use std::path::Path;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::error::{GeomError, GeomResult};
use crate::io::{new_input_file, new_output_file};
use crate::rotation::Rotation;
use crate::vector::Vec3;

/// One point as it appears in a point file.
#[derive(Serialize, Deserialize, PartialEq, Clone, Copy, Default, Debug)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<PointRecord> for Vec3 {
    fn from(p: PointRecord) -> Vec3 {
        Vec3::new(p.x, p.y, p.z)
    }
}

impl From<Vec3> for PointRecord {
    fn from(v: Vec3) -> PointRecord {
        PointRecord { x: v.x, y: v.y, z: v.z }
    }
}

/// Rotates every point by `rotation`, keeping the input order.
pub fn transform_points(points: &[PointRecord], rotation: &Rotation) -> Vec<PointRecord> {
    points.iter()
        .map(|&p| rotation.rotate(p.into()).into())
        .collect()
}

pub fn read_points(path: &Path) -> GeomResult<Vec<PointRecord>> {
    let reader = new_input_file(path)?;
    let points: Vec<PointRecord> = serde_json::from_reader(reader)
        .map_err(|err| GeomError::PointParseError(path.to_path_buf(), err))?;
    debug!("read {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Writes `points` as pretty JSON indented by four spaces.
pub fn write_points(path: &Path, points: &[PointRecord]) -> GeomResult<()> {
    let mut writer = new_output_file(path)?;
    let mut ser = serde_json::Serializer::with_formatter(
        &mut writer,
        PrettyFormatter::with_indent(b"    "),
    );
    points.serialize(&mut ser)
        .map_err(|err| GeomError::PointWriteError(path.to_path_buf(), err))?;
    writer.flush()
        .map_err(|err| GeomError::FileWriteError(path.to_path_buf(), err))?;
    debug!("wrote {} points to {}", points.len(), path.display());
    Ok(())
}

/// Reads `input`, rotates every point and writes the result to `output`.
/// Returns the number of points written.
pub fn transform_file(input: &Path, output: &Path, rotation: &Rotation) -> GeomResult<usize> {
    let points = read_points(input)?;
    trace!("rotating by {rotation}");
    let rotated = transform_points(&points, rotation);
    write_points(output, &rotated)?;
    Ok(rotated.len())
}
