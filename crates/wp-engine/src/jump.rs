use wp_core::{WaypointError, WpValue};

use crate::context::{Signal, WaypointContext};

impl WaypointContext {
    pub fn jump_nearest(&mut self, value: WpValue) -> Result<WpValue, Signal> {
        Err(self.jump_signal(value))
    }

    pub fn jump_named(&mut self, name: &str, value: WpValue) -> Result<WpValue, Signal> {
        let depth = self.depth_of(name)?;
        self.names.remove(name);
        // Every point between the jump site and the named target consults
        // this marker and re-propagates instead of returning.
        self.pending_unwind_depth = Some(depth);
        self.jump_nearest(value)
    }

    pub(crate) fn jump_signal(&mut self, value: WpValue) -> Signal {
        let Some((index, point)) = self.nearest_return() else {
            return Signal::Fault(WaypointError::new(
                "ENGINE_NO_RESUMPTION_POINT",
                "nowhere to return to",
            ));
        };
        match self.unwind_from(index) {
            Ok(_) => Signal::Jump { point, value },
            Err(signal) => signal,
        }
    }
}
