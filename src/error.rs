use thiserror::Error;

use crate::ScreenSize;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Terminal is {have_cols}x{have_rows} but {need_cols}x{need_rows} is needed")]
    TerminalTooSmall {
        need_cols: ScreenSize,
        need_rows: ScreenSize,
        have_cols: ScreenSize,
        have_rows: ScreenSize,
    },

    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
}
