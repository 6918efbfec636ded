use std::{
    fmt,
    path::PathBuf,
};

use clap::Parser;
use log::warn;

use crate::{
    error::{GeomError, GeomResult},
    quaternion::{Quaternion, UNIT_TOLERANCE},
    rotation::Rotation,
    space::InnerSpace,
    vector::Vec3,
};

/// Half turn about the x axis.
pub const DEFAULT_ROTATION: Quaternion = Quaternion::new(0.0, 1.0, 0.0, 0.0);


/// Command line arguments.
#[derive(Parser, Clone, Debug)]
#[command(name = "quatgeom", version, about = "Rotate a JSON list of points by a fixed quaternion")]
pub struct Args {
    /// JSON file holding an array of {x, y, z} points
    #[arg(short, long, default_value = "input_points.json")]
    pub input: PathBuf,

    /// Where to write the rotated points
    #[arg(short, long, default_value = "output_points.json")]
    pub output: PathBuf,

    /// Rotation as a quaternion, scalar first
    #[arg(
        long,
        num_args = 4,
        value_names = ["W", "X", "Y", "Z"],
        allow_negative_numbers = true,
        conflicts_with_all = ["axis", "angle"],
    )]
    pub quat: Option<Vec<f64>>,

    /// Rotation axis, used with --angle
    #[arg(
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true,
        requires = "angle",
    )]
    pub axis: Option<Vec<f64>>,

    /// Rotation angle about --axis, in radians unless --degrees is given
    #[arg(long, allow_negative_numbers = true, requires = "axis")]
    pub angle: Option<f64>,

    /// Read --angle as degrees
    #[arg(long, requires = "angle")]
    pub degrees: bool,
}


/// Resolved settings for one batch run.
#[derive(Clone, Debug)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rotation: Rotation,
}
impl Config {
    /// Resolve the rotation described by the arguments.
    pub fn from_args(args: Args) -> GeomResult<Config> {
        let rotation = match (args.quat, args.axis, args.angle) {
            (Some(q), _, _) => match q.as_slice() {
                &[w, x, y, z] => rotation_from_quaternion(Quaternion::new(w, x, y, z))?,
                _ => {
                    return Err(GeomError::InvalidRotation(
                        format!("expected 4 quaternion components, got {}", q.len())
                    ));
                }
            },
            (None, Some(axis), Some(angle)) => match axis.as_slice() {
                &[x, y, z] => {
                    let angle = if args.degrees { angle.to_radians() } else { angle };
                    let axis = Vec3::new(x, y, z);
                    Rotation::from_axis_angle(axis, angle).map_err(|_| {
                        GeomError::InvalidRotation(format!("axis {axis} has zero length"))
                    })?
                }
                _ => {
                    return Err(GeomError::InvalidRotation(
                        format!("expected 3 axis components, got {}", axis.len())
                    ));
                }
            },
            _ => Rotation::from_quaternion(DEFAULT_ROTATION)?,
        };

        Ok(Config {
            input: args.input,
            output: args.output,
            rotation,
        })
    }
}
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "
            \rInput:    {}
            \rOutput:   {}
            \rRotation: {}",
            self.input.display(),
            self.output.display(),
            self.rotation,
        )
    }
}

fn rotation_from_quaternion(q: Quaternion) -> GeomResult<Rotation> {
    let rotation = Rotation::from_quaternion(q).map_err(|_| {
        GeomError::InvalidRotation(format!("quaternion {q} has zero length"))
    })?;
    if let Some(msg) = renormalize_warning(q) {
        warn!("{msg}");
    }
    Ok(rotation)
}

/// Message to log when `q` is usable but has to be renormalized.
fn renormalize_warning(q: Quaternion) -> Option<String> {
    let magnitude = q.magnitude();
    if magnitude == 0.0 || q.is_unit(UNIT_TOLERANCE) {
        return None;
    }
    Some(format!("quaternion {q} is not unit length (magnitude {magnitude}), normalizing"))
}
