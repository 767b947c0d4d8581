//! Raw matrix samples

/// Number of driven columns
pub const MATRIX_COLS: usize = 8;

/// Number of sensed rows (8 expander inputs + 1 GPIO line)
pub const MATRIX_ROWS: usize = 9;

/// Number of physical positions
pub const KEY_COUNT: usize = MATRIX_ROWS * MATRIX_COLS;

/// One full scan of the matrix
///
/// Bit `r` of `columns[c]` is the electrical level at row `r`, column `c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatrixSample {
    columns: [u16; MATRIX_COLS],
}

impl MatrixSample {
    /// A sample with every position low
    pub const fn new() -> Self {
        Self {
            columns: [0; MATRIX_COLS],
        }
    }

    /// Store the row levels read while `col` was driven
    pub fn set_column(&mut self, col: usize, rows: u16) {
        if let Some(c) = self.columns.get_mut(col) {
            *c = rows & ((1 << MATRIX_ROWS) - 1);
        }
    }

    /// Row levels read for `col`
    pub fn column(&self, col: usize) -> u16 {
        self.columns.get(col).copied().unwrap_or(0)
    }

    /// Set a single position
    pub fn set(&mut self, row: usize, col: usize, level: bool) {
        if row < MATRIX_ROWS {
            if let Some(c) = self.columns.get_mut(col) {
                if level {
                    *c |= 1 << row;
                } else {
                    *c &= !(1 << row);
                }
            }
        }
    }

    /// Level (0 or 1) at a position
    pub fn level(&self, row: usize, col: usize) -> u8 {
        if row >= MATRIX_ROWS {
            return 0;
        }
        ((self.column(col) >> row) & 1) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_read() {
        let mut sample = MatrixSample::new();
        sample.set(8, 3, true);
        sample.set(0, 7, true);
        assert_eq!(sample.level(8, 3), 1);
        assert_eq!(sample.level(0, 7), 1);
        assert_eq!(sample.level(0, 3), 0);

        sample.set(8, 3, false);
        assert_eq!(sample.level(8, 3), 0);
    }

    #[test]
    fn test_set_column_masks_unused_bits() {
        let mut sample = MatrixSample::new();
        sample.set_column(2, 0xFFFF);
        assert_eq!(sample.column(2), 0x01FF);
    }

    #[test]
    fn test_out_of_range_is_low() {
        let sample = MatrixSample::new();
        assert_eq!(sample.level(MATRIX_ROWS, 0), 0);
        assert_eq!(sample.level(0, MATRIX_COLS), 0);
    }
}
