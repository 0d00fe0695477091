// Copyright (c) 2026 rezky_nightky

use thiserror::Error;

pub const MIN_ROWS: u16 = 4;
pub const MIN_COLS: u16 = 4;

#[derive(Debug, Error)]
pub enum RainError {
    #[error("screen too short: {rows} rows, need at least {min}")]
    TooShort { rows: u16, min: u16 },

    #[error("screen too narrow: {cols} columns, need at least {min}")]
    TooNarrow { cols: u16, min: u16 },

    #[error("terminal I/O: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RainError>;

pub fn check_size(rows: u16, cols: u16) -> Result<()> {
    if rows < MIN_ROWS {
        return Err(RainError::TooShort {
            rows,
            min: MIN_ROWS,
        });
    }
    if cols < MIN_COLS {
        return Err(RainError::TooNarrow {
            cols,
            min: MIN_COLS,
        });
    }
    Ok(())
}
