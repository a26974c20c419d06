use std::mem;

use byteorder::{LittleEndian, WriteBytesExt};
use cast::From as _0;

use crate::traits::Data;

macro_rules! impl_data {
    ($($ty:ty),+) => {
        $(
            impl Data for $ty {
                fn f64(self) -> f64 {
                    f64::cast(self)
                }
            }

            impl<'a> Data for &'a $ty {
                fn f64(self) -> f64 {
                    f64::cast(*self)
                }
            }
        )+
    }
}

impl_data!(f32, f64, i16, i32, i64, i8, isize, u16, u32, u64, u8, usize);

/// Two-column matrix of doubles in the little-endian wire form gnuplot reads
/// from an inline `'-' binary` data block.
#[derive(Clone)]
pub struct Matrix {
    bytes: Vec<u8>,
    nrows: usize,
}

impl Matrix {
    pub fn new<I, A, B>(rows: I) -> Matrix
    where
        I: Iterator<Item = (A, B)>,
        A: Data,
        B: Data,
    {
        let bytes_per_row = 2 * mem::size_of::<f64>();
        let mut bytes = Vec::with_capacity(rows.size_hint().0 * bytes_per_row);

        let mut nrows = 0;
        for (a, b) in rows {
            nrows += 1;
            // Writing into a Vec cannot fail.
            bytes.write_f64::<LittleEndian>(a.f64()).unwrap();
            bytes.write_f64::<LittleEndian>(b.f64()).unwrap();
        }

        Matrix { bytes, nrows }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn ncols(&self) -> usize {
        2
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }
}
