use std::fmt::{Debug, Display};

/// User-facing error. The message is the whole payload; no structured codes
/// cross the boundary.
pub struct PressError(pub String);

impl Display for PressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for PressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PressError").field(&self.0).finish()
    }
}

impl std::error::Error for PressError {}

#[macro_export]
macro_rules! ip_err {
    ($($arg:tt)*) => {
        $crate::error::PressError(format!(
            "imgpress: {} @ {}:{}:{}",
            format_args!($($arg)*),
            file!(),
            line!(),
            column!()
        ))
    };
}

#[macro_export]
macro_rules! ip_try {
    ($expr:expr $(,)?) => {
        match $expr {
            std::result::Result::Ok(val) => val,
            std::result::Result::Err(err) => {
                return std::result::Result::Err($crate::ip_err!("{err}"));
            }
        }
    };
}
