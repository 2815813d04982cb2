/// Rejected [`crate::WindowOptions`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Items must occupy some space along the scroll axis.
    #[error("item extent must be greater than zero")]
    ZeroItemExtent,
}
