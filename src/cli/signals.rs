//! Interrupt handling
//!
//! Ctrl+C and SIGTERM end the run immediately. In-flight downloads are
//! abandoned where they stand; partial files are left on disk.

use tokio::signal;
use tracing::warn;

/// Printed when a run is interrupted
pub const INTERRUPT_MESSAGE: &str = "Received interrupt signal, terminating...";

/// Signal that ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    CtrlC,
    Terminate,
}

impl Interrupt {
    /// Name of the signal as users know it
    pub fn signal_name(&self) -> &'static str {
        match self {
            Interrupt::CtrlC => "SIGINT",
            Interrupt::Terminate => "SIGTERM",
        }
    }
}

/// Resolve once Ctrl+C or SIGTERM arrives
///
/// A handler that cannot be installed never fires; the run then simply
/// cannot be interrupted through that signal.
pub async fn shutdown_signal() -> Interrupt {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => Interrupt::CtrlC,
        _ = terminate => Interrupt::Terminate,
    }
}
