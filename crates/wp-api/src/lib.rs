use std::cell::RefCell;

use wp_core::{WaypointError, WpValue};
use wp_engine::{Signal, WaypointContext};

thread_local! {
    // One lazily created context per OS thread. The slot is empty while a
    // top-level point is running on this thread, which doubles as the
    // re-entrancy detector.
    static CONTEXT: RefCell<Option<WaypointContext>> = RefCell::new(Some(WaypointContext::new()));
}

pub fn run_point<F>(body: F) -> Result<WpValue, WaypointError>
where
    F: FnOnce(&mut WaypointContext) -> Result<WpValue, Signal>,
{
    enter(|context| context.point(body))
}

pub fn run_named_point<F>(name: &str, body: F) -> Result<WpValue, WaypointError>
where
    F: FnOnce(&mut WaypointContext) -> Result<WpValue, Signal>,
{
    enter(|context| context.named_point(name, body))
}

pub fn context_is_idle() -> bool {
    CONTEXT.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(WaypointContext::is_idle)
            .unwrap_or(false)
    })
}

fn enter<F>(operation: F) -> Result<WpValue, WaypointError>
where
    F: FnOnce(&mut WaypointContext) -> Result<WpValue, Signal>,
{
    let Some(mut context) = CONTEXT.with(|cell| cell.borrow_mut().take()) else {
        return Err(WaypointError::new(
            "API_CONTEXT_REENTRANT",
            "A top-level point is already running on this thread; nest points through the context argument.",
        ));
    };
    let result = operation(&mut context);
    CONTEXT.with(|cell| *cell.borrow_mut() = Some(context));
    result.map_err(signal_to_error)
}

fn signal_to_error(signal: Signal) -> WaypointError {
    match signal {
        Signal::Fault(error) => error,
        Signal::Jump { point, .. } => WaypointError::new(
            "API_STRAY_JUMP",
            format!("Jump to point {} escaped the outermost boundary.", point),
        ),
    }
}
