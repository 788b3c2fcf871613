use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

use tracing::{info, warn};

use crate::cache::IssueCache;
use crate::controller::MenuController;
use crate::error::LilError;
use crate::launcher::Launcher;
use crate::menu::MenuAction;
use crate::refresh::RefreshOutcome;
use crate::surface::MenuSurface;
use crate::types::Issue;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Read the snapshot from a previous run. Absence is silent, anything else
/// is worth a warning; both mean "no cache".
pub fn load_snapshot(cache: &IssueCache) -> Option<Vec<Issue>> {
    match cache.load() {
        Ok(issues) => Some(issues),
        Err(err) if err.is_not_found() => None,
        Err(err) => {
            warn!(%err, "failed to load cached issues");
            None
        }
    }
}

/// Drive the menu until the user quits.
///
/// `outcomes` delivers the single result of the background refresh; it is
/// only ever applied here, on the thread that owns the surface.
pub fn run_loop<S: MenuSurface>(
    controller: &mut MenuController<S>,
    launcher: &Launcher,
    outcomes: Receiver<RefreshOutcome>,
) {
    let mut outcomes = Some(outcomes);

    loop {
        match controller.surface_mut().next_action(POLL_INTERVAL) {
            Some(MenuAction::Quit) => {
                info!("quit requested");
                return;
            }
            Some(MenuAction::Open(link)) => launcher.activate(&link),
            None => {}
        }

        if let Some(rx) = &outcomes {
            match rx.try_recv() {
                Ok(Ok(issues)) => {
                    controller.show_fresh(&issues);
                    outcomes = None;
                }
                Ok(Err(err)) => {
                    warn!(%err, "error fetching issues");
                    controller.show_error(&err);
                    outcomes = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    warn!("refresh worker exited without a result");
                    controller.show_error(&LilError::RefreshAborted);
                    outcomes = None;
                }
            }
        }
    }
}

/// Paint the cached snapshot, start one refresh, and run the UI loop.
pub fn run<S, F>(
    controller: &mut MenuController<S>,
    launcher: &Launcher,
    cache: &IssueCache,
    start_refresh: F,
) -> Result<(), LilError>
where
    S: MenuSurface,
    F: FnOnce(mpsc::Sender<RefreshOutcome>) -> std::io::Result<()>,
{
    controller.show_startup(load_snapshot(cache));

    let (tx, rx) = mpsc::channel();
    start_refresh(tx)?;
    controller.refresh_started();

    run_loop(controller, launcher, rx);
    Ok(())
}
