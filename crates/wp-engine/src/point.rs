use wp_core::{WaypointError, WpValue};

use crate::context::{Frame, Signal, WaypointContext};

impl WaypointContext {
    pub fn point<F>(&mut self, body: F) -> Result<WpValue, Signal>
    where
        F: FnOnce(&mut WaypointContext) -> Result<WpValue, Signal>,
    {
        self.register_point(None, body)
    }

    pub fn named_point<F>(&mut self, name: &str, body: F) -> Result<WpValue, Signal>
    where
        F: FnOnce(&mut WaypointContext) -> Result<WpValue, Signal>,
    {
        self.register_point(Some(name), body)
    }

    fn register_point<F>(&mut self, name: Option<&str>, body: F) -> Result<WpValue, Signal>
    where
        F: FnOnce(&mut WaypointContext) -> Result<WpValue, Signal>,
    {
        let depth = self.frames.len();
        if let Some(name) = name {
            self.register_name(name, depth)?;
        }
        let point = self.next_point_id();
        self.push_frame(Frame::Return {
            point,
            name: name.map(str::to_string),
        });

        let outcome = body(self);
        let result = self.settle_point(point, outcome);
        if depth == 0 {
            // Outermost registration: nothing may leak into the next
            // top-level invocation on this context.
            self.reset();
        }
        result
    }

    fn settle_point(
        &mut self,
        point: u64,
        outcome: Result<WpValue, Signal>,
    ) -> Result<WpValue, Signal> {
        let value = match outcome {
            Ok(value) => {
                // Normal completion: unwind down to and including this
                // call's own return frame, unless a raise already consumed it.
                if let Some(index) = self.find_return_index(point) {
                    self.unwind_from(index)?;
                }
                value
            }
            Err(Signal::Jump {
                point: target,
                value,
            }) if target == point => {
                // The jump site already unwound to this frame.
                value
            }
            Err(signal) => {
                // A fault, or a jump addressed to an enclosing point whose
                // own frame was already consumed. Ensure actions still run
                // if this frame is live; a signal produced by a cleanup
                // supersedes the one in flight.
                if let Some(index) = self.find_return_index(point) {
                    self.unwind_from(index)?;
                }
                return Err(signal);
            }
        };

        // Named-jump threading: keep jumping outward until the stack is back
        // at the depth recorded by jump_named.
        if let Some(depth) = self.pending_unwind_depth {
            if self.frames.len() > depth {
                return Err(self.jump_signal(value));
            }
            self.pending_unwind_depth = None;
        }

        // The only place the internal exception representation re-enters the
        // host error channel.
        if let Some(exception) = self.current_exception.take() {
            return Err(Signal::Fault(WaypointError::unhandled(exception)));
        }

        Ok(value)
    }
}
