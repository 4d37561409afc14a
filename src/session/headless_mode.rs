//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::render::text::render_report;
use std::error::Error;

/// Runs the watch loop without a terminal UI
///
/// Each render pass is logged and its text report printed to stdout, until Ctrl+C.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.source, session.interval.as_secs());

    let mut shutdown_receiver = session.shutdown_sender.subscribe();

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    loop {
        tokio::select! {
            Some(report) = session.report_receiver.recv() => {
                log::log!(log::Level::from(report.event.log_level), "{}", report.event.msg);
                println!("{}", render_report(&report.document));
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    print_session_shutdown();
    let _ = session.join_handle.await;
    print_session_exit_success();

    Ok(())
}
