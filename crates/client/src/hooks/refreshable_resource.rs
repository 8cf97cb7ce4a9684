use std::{future::Future, marker::PhantomData};

use dioxus::{
    hooks::{use_context, use_context_provider, use_resource, Resource},
    signals::{ReadableExt, Signal, WritableExt},
};

/// Handle that re-runs the resource registered for `T` by an ancestor's
/// [`use_refreshable_resource`].
pub struct RefreshHandle<T> {
    generation: Signal<u64>,
    _marker: PhantomData<T>,
}

impl<T> Clone for RefreshHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RefreshHandle<T> {}

impl<T: 'static> RefreshHandle<T> {
    /// Re-run the resource.
    pub fn refresh(&mut self) {
        *self.generation.write() += 1;
    }
}

/// A hook that wraps `use_resource` and puts a [`RefreshHandle`] for `T` into
/// the context, so descendants can re-run the resource after they change
/// whatever it reads.
///
/// ### Example
///
/// ```rust,ignore
/// // The portal reads the on-chain counter once per refresh.
/// let total: Resource<Option<U256>> = use_refreshable_resource(move || {
///     let client = client.clone();
///     async move { client.total_waves().await.ok() }
/// });
///
/// // The wave form, a child component, bumps it after a mined wave.
/// let mut refresh = use_refresh_resource::<Option<U256>>();
/// refresh.refresh();
/// ```
pub fn use_refreshable_resource<T, F>(mut future: impl FnMut() -> F + 'static) -> Resource<T>
where
    T: 'static,
    F: Future<Output = T> + 'static,
{
    let handle = use_context_provider(|| RefreshHandle::<T> {
        generation: Signal::new(0),
        _marker: PhantomData,
    });
    use_resource(move || {
        handle.generation.read();
        future()
    })
}

/// See `use_refreshable_resource`.
pub fn use_refresh_resource<T: 'static>() -> RefreshHandle<T> {
    use_context::<RefreshHandle<T>>()
}
