/// Rejected engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Window(#[from] vlist::ConfigError),
    #[error("a container is required")]
    MissingContainer,
    #[error("an item renderer is required")]
    MissingRenderer,
}

/// Failure of a [`crate::ListEngine`] operation, generic over the renderer's error.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    /// Two items of one collection share a key. Nothing was changed.
    #[error("duplicate item key at index {index} (first seen at index {first})")]
    DuplicateKey { index: usize, first: usize },

    /// The renderer failed for the item at `index`. Nodes bound before the failure keep
    /// their bindings; `index` stays unrendered until the next reconcile.
    #[error("rendering item {index} failed")]
    Render {
        index: usize,
        #[source]
        source: E,
    },
}
