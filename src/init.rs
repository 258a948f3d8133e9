use crate::layer::LogrLayer;
use crate::logger::Logger;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Error returned by [`init_tracing`].
#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Route all `tracing` events in the process to `logger`.
///
/// **Parameters**
/// - `logger`: the backend selected at startup, usually a
///   [`Backend`](crate::backend::Backend) built from configuration.
///
/// **Effects**
///
/// Installs a [`Registry`] combined with [`LogrLayer`] as the global
/// default subscriber. Events are forwarded synchronously; nothing is
/// buffered or filtered.
///
/// **Returns**
/// - `Err(InitError::AlreadyInitialized)` if another global subscriber
///   was installed first.
pub fn init_tracing<L>(logger: L) -> Result<(), InitError>
where
    L: Logger + 'static,
{
    let subscriber = Registry::default().with(LogrLayer::new(logger));
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
