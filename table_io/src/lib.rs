//! Reading and writing hand-ranks tables.
//!
//! A table file is a 32-bit little-endian entry count followed by that many
//! 32-bit little-endian signed integers. The bulk payload is moved in a
//! single read or write through the vector's byte view; only the header goes
//! through per-field serialization. Assumes a little-endian host.

use std::fs::File;
use std::io::prelude::*;
use std::mem::size_of;
use std::slice;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableFileError {
    #[error("table file i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("table payload is {bytes} bytes, not a multiple of {element} byte entries")]
    TruncatedPayload { bytes: usize, element: usize },
    #[error("table declares {declared} entries but the file holds {actual}")]
    LengthMismatch { declared: usize, actual: usize },
}

/// Extends `File` with count-prefixed table reads and writes.
pub trait TableIO {
    fn write_table(&mut self, data: &[i32]) -> Result<(), TableFileError>;
    fn read_table(&mut self) -> Result<Vec<i32>, TableFileError>;
}

impl TableIO for File {
    /// Writes the entry count followed by the entries as raw bytes.
    fn write_table(&mut self, data: &[i32]) -> Result<(), TableFileError> {
        self.write_i32::<LittleEndian>(data.len() as i32)?;
        let bytes = unsafe {
            slice::from_raw_parts(data.as_ptr() as *const u8, data.len() * size_of::<i32>())
        };
        self.write_all(bytes)?;
        Ok(())
    }

    /// Reads a whole table, validating the declared count against the
    /// payload length.
    fn read_table(&mut self) -> Result<Vec<i32>, TableFileError> {
        let declared = self.read_i32::<LittleEndian>()? as usize;
        let mut payload = Vec::new();
        self.read_to_end(&mut payload)?;
        if payload.len() % size_of::<i32>() != 0 {
            return Err(TableFileError::TruncatedPayload {
                bytes: payload.len(),
                element: size_of::<i32>(),
            });
        }
        let actual = payload.len() / size_of::<i32>();
        if actual != declared {
            return Err(TableFileError::LengthMismatch { declared, actual });
        }
        // an aligned destination buffer; the payload is copied into its
        // byte view rather than transmuted in place
        let mut data = vec![0i32; declared];
        let view = unsafe {
            slice::from_raw_parts_mut(data.as_mut_ptr() as *mut u8, declared * size_of::<i32>())
        };
        view.copy_from_slice(&payload);
        Ok(data)
    }
}
