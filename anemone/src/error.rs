/*
 * anemone/src/error.rs
 *
 * Purpose: Error taxonomy for the container layer. Every variant is a
 * configuration or programming error; a raw slot that maps to no symbol is
 * not an error and is reported as `None` by the resolver instead.
 */

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnemoneError {
    /// The template bounds have no matching container kind.
    #[error("no valid container kind exists for a {width}x{height} template")]
    UnsupportedShape { width: usize, height: usize },

    #[error("container definition `{0}` is already registered")]
    AlreadyRegistered(&'static str),

    #[error("container definition `{0}` must be registered before use")]
    NotRegistered(String),

    /// The registry has no owner left (or never had one).
    #[error("container registry is inactive; attach an owner before using it")]
    Inactive,
}

pub type Result<T, E = AnemoneError> = std::result::Result<T, E>;
