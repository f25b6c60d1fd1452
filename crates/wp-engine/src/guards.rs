use wp_core::{Exception, ExceptionClass, WaypointError};

use crate::context::{Frame, Signal, WaypointContext};

impl WaypointContext {
    pub fn ensure<F>(&mut self, cleanup: F) -> Result<(), Signal>
    where
        F: FnOnce(&mut WaypointContext) -> Result<(), Signal> + 'static,
    {
        self.require_live_point("ensure")?;
        self.push_frame(Frame::Ensure {
            cleanup: Box::new(cleanup),
        });
        Ok(())
    }

    pub fn rescue<F>(&mut self, matchers: Vec<ExceptionClass>, handler: F) -> Result<(), Signal>
    where
        F: FnOnce(&mut WaypointContext, &Exception) -> Result<(), Signal> + 'static,
    {
        self.require_live_point("rescue")?;
        let matchers = if matchers.is_empty() {
            vec![ExceptionClass::error()]
        } else {
            matchers
        };
        self.push_frame(Frame::Rescue {
            matchers,
            handler: Box::new(handler),
        });
        Ok(())
    }

    fn require_live_point(&self, operation: &str) -> Result<(), Signal> {
        if self.nearest_return().is_some() {
            return Ok(());
        }
        Err(Signal::Fault(WaypointError::new(
            "ENGINE_NO_RESUMPTION_POINT",
            format!("No active resumption point for {}.", operation),
        )))
    }
}
