use crate::dtype::DType;

/// Errors raised while converting a value into an array.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CastError {
    /// The conversion primitive returned an element type other than the one
    /// requested, and the mismatch is not one that is corrected silently.
    #[error(
        "conversion did not return the data type we asked for ({requested} #{requested_num}), \
         instead it returned type {produced} #{produced_num}: asarray may need to be extended \
         to handle this data type as well"
    )]
    TypeMismatch {
        requested: DType,
        requested_num: u8,
        produced: DType,
        produced_num: u8,
    },

    #[error("unknown data type '{0}'")]
    UnknownDType(String),

    #[error("setting an array element with a sequence: inconsistent shapes {expected:?} and {found:?}")]
    Ragged {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("cannot reinterpret {from} array of shape {shape:?} as {to}")]
    Layout {
        from: DType,
        to: DType,
        shape: Vec<usize>,
    },

    #[error("cannot read {actual} array as {expected}")]
    Access { expected: DType, actual: DType },

    #[error("not array-like: {0}")]
    InvalidInput(String),
}

/// Errors raised while loading a [`Config`](crate::config::Config).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid floatX value '{0}': expected float32 or float64")]
    InvalidFloatX(String),
}
