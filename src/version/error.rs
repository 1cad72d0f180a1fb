use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error(
        "version with suffix detected: '{0}' (suffixes such as -rc1, -beta or -alpha are not supported; use a release version like 'v11.0.0')"
    )]
    SuffixNotSupported(String),

    #[error("invalid version format: '{0}' (expected 'vX.Y.Z' or 'X.Y.Z')")]
    Malformed(String),

    #[error(
        "invalid version format: '{version}' (all components must be non-negative integers, got '{component}')"
    )]
    NonIntegerComponent { version: String, component: String },

    #[error("failed to compare versions '{left}' and '{right}': {source}")]
    Comparison {
        left: String,
        right: String,
        source: Box<VersionError>,
    },
}
