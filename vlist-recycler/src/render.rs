/// Produces and refreshes view nodes for items.
///
/// `render` creates a fresh node. `rebind` points a recycled node at a different item and
/// is what keeps the number of `render` calls proportional to the viewport instead of the
/// scroll distance. Neither may depend on state left behind by earlier calls: the engine
/// calls them in whatever order recycling dictates.
///
/// Interactive parts of a node (a selection checkbox, say) are the renderer's business.
pub trait ItemRenderer<T> {
    type Node;
    type Error;

    fn render(&mut self, item: &T) -> Result<Self::Node, Self::Error>;

    fn rebind(&mut self, node: &mut Self::Node, item: &T) -> Result<(), Self::Error>;
}

/// An [`ItemRenderer`] built from a pair of closures. See [`renderer_fn`].
#[derive(Clone, Debug)]
pub struct FnRenderer<R, B> {
    render: R,
    rebind: B,
}

/// Builds an [`ItemRenderer`] from a `render` and a `rebind` closure.
pub fn renderer_fn<T, N, E, R, B>(render: R, rebind: B) -> FnRenderer<R, B>
where
    R: FnMut(&T) -> Result<N, E>,
    B: FnMut(&mut N, &T) -> Result<(), E>,
{
    FnRenderer { render, rebind }
}

impl<T, N, E, R, B> ItemRenderer<T> for FnRenderer<R, B>
where
    R: FnMut(&T) -> Result<N, E>,
    B: FnMut(&mut N, &T) -> Result<(), E>,
{
    type Node = N;
    type Error = E;

    fn render(&mut self, item: &T) -> Result<N, E> {
        (self.render)(item)
    }

    fn rebind(&mut self, node: &mut N, item: &T) -> Result<(), E> {
        (self.rebind)(node, item)
    }
}
