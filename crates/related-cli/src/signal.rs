//! Ctrl-C handling.

use std::thread;

use related_core::Interrupt;

/// Set `interrupt` when the process receives Ctrl-C.
///
/// The listener runs on a single-threaded runtime in a background thread so
/// the scan itself stays blocking. If the handler cannot be installed the
/// default signal behaviour applies.
pub fn install(interrupt: &Interrupt) {
    let interrupt = interrupt.clone();
    let spawned = thread::Builder::new()
        .name("ctrl-c".into())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_io()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    tracing::warn!(error = %e, "cannot start signal runtime");
                    return;
                }
            };

            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        tracing::debug!("ctrl-c received");
                        interrupt.trigger();
                    }
                    Err(e) => tracing::warn!(error = %e, "cannot listen for ctrl-c"),
                }
            });
        });

    if let Err(e) = spawned {
        tracing::warn!(error = %e, "cannot spawn signal thread");
    }
}
