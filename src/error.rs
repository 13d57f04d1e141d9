use thiserror::Error;

/// Errors produced at the fallible edges of the crate: style attribute
/// resolution and rasterization.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid color value for `{attr}`: {value:?}")]
    InvalidColor { attr: String, value: String },
    #[error("invalid dimension value for `{attr}`: {value:?}")]
    InvalidDimension { attr: String, value: String },
    #[error("unknown style attribute `{0}`")]
    UnknownAttribute(String),
    #[error("cannot rasterize an empty {width}x{height} surface")]
    EmptySurface { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
