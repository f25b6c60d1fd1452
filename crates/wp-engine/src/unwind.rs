use crate::context::{Frame, FrameKind, Signal, WaypointContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CleanupOutcome {
    Completed,
    Rescued,
}

impl WaypointContext {
    pub(crate) fn unwind_from(&mut self, index: usize) -> Result<CleanupOutcome, Signal> {
        let slice: Vec<Frame> = self.frames.drain(index..).collect();
        for frame in &slice {
            self.forget_name_of(frame);
        }
        self.run_cleanup(slice)
    }

    // Partition the unwound slice into maximal contiguous runs of one frame
    // kind and process runs most-recently-pushed first, keeping push order
    // inside each run.
    pub(crate) fn run_cleanup(&mut self, frames: Vec<Frame>) -> Result<CleanupOutcome, Signal> {
        let kinds: Vec<FrameKind> = frames.iter().map(Frame::kind).collect();
        let mut slots: Vec<Option<Frame>> = frames.into_iter().map(Some).collect();

        let mut runs: Vec<(usize, usize)> = Vec::new();
        let mut start = 0;
        for index in 1..=kinds.len() {
            if index == kinds.len() || kinds[index] != kinds[start] {
                runs.push((start, index));
                start = index;
            }
        }

        for &(run_start, run_end) in runs.iter().rev() {
            match kinds[run_start] {
                FrameKind::Return => {}
                FrameKind::Ensure => {
                    for slot in &mut slots[run_start..run_end] {
                        if let Some(Frame::Ensure { cleanup }) = slot.take() {
                            // Runs against the stack as it exists right now;
                            // the unwound slice is already off the live stack.
                            cleanup(self)?;
                        }
                    }
                }
                FrameKind::Rescue => {
                    let Some(exception) = self.current_exception.clone() else {
                        continue;
                    };
                    for index in run_start..run_end {
                        let matched = matches!(
                            slots[index].as_ref(),
                            Some(Frame::Rescue { matchers, .. })
                                if matchers.iter().any(|class| exception.is_a(class))
                        );
                        if !matched {
                            continue;
                        }
                        let Some(Frame::Rescue { handler, .. }) = slots[index].take() else {
                            continue;
                        };
                        // Frames below the matched rescue were never executed;
                        // they go back on the live stack as if never unwound.
                        self.restore_frames(&mut slots[..index]);
                        handler(self, &exception)?;
                        return Ok(CleanupOutcome::Rescued);
                    }
                }
            }
        }

        Ok(CleanupOutcome::Completed)
    }

    fn restore_frames(&mut self, slots: &mut [Option<Frame>]) {
        for slot in slots.iter_mut() {
            let Some(frame) = slot.take() else { continue };
            if let Frame::Return {
                name: Some(name), ..
            } = &frame
            {
                self.names.insert(name.clone(), self.frames.len());
            }
            self.frames.push(frame);
        }
    }
}
