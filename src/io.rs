use std::{
    fs::File,
    path::Path,
    io::{BufReader, BufWriter, ErrorKind},
};

use crate::error::{GeomError, GeomResult};


/// Takes a file path and returns an input file wrapped in a BufReader.
pub fn new_input_file(path: &Path) -> GeomResult<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::with_capacity(4096, file)),
        Err(err) => {
            match err.kind() {
                ErrorKind::PermissionDenied => {
                    Err(GeomError::AccessDenied(path.to_path_buf()))
                }
                _ => {
                    Err(GeomError::FileOpenError(path.to_path_buf(), err))
                }
            }
        }
    }
}

/// Takes a file path and returns an output file wrapped in a BufWriter,
/// truncating anything already there.
pub fn new_output_file(path: &Path) -> GeomResult<BufWriter<File>> {
    match File::create(path) {
        Ok(file) => Ok(BufWriter::with_capacity(4096, file)),
        Err(err) => {
            match err.kind() {
                ErrorKind::PermissionDenied => {
                    Err(GeomError::AccessDenied(path.to_path_buf()))
                }
                _ => {
                    Err(GeomError::FileCreateError(path.to_path_buf(), err))
                }
            }
        }
    }
}
