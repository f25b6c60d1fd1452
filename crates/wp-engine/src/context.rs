use std::collections::BTreeMap;
use std::fmt;

use wp_core::{Exception, ExceptionClass, WaypointError, WpValue};

pub(crate) type CleanupFn = Box<dyn FnOnce(&mut WaypointContext) -> Result<(), Signal>>;
pub(crate) type HandlerFn = Box<dyn FnOnce(&mut WaypointContext, &Exception) -> Result<(), Signal>>;

// The propagation channel standing in for first-class continuations: a jump
// is an Err(Signal::Jump) threaded up through ordinary returns until the
// point call with the matching identity intercepts it.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Jump { point: u64, value: WpValue },
    Fault(WaypointError),
}

impl From<WaypointError> for Signal {
    fn from(error: WaypointError) -> Self {
        Self::Fault(error)
    }
}

pub(crate) enum Frame {
    Return {
        point: u64,
        name: Option<String>,
    },
    Ensure {
        cleanup: CleanupFn,
    },
    Rescue {
        matchers: Vec<ExceptionClass>,
        handler: HandlerFn,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameKind {
    Return,
    Ensure,
    Rescue,
}

impl Frame {
    pub(crate) fn kind(&self) -> FrameKind {
        match self {
            Self::Return { .. } => FrameKind::Return,
            Self::Ensure { .. } => FrameKind::Ensure,
            Self::Rescue { .. } => FrameKind::Rescue,
        }
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Return { point, name } => formatter
                .debug_struct("Return")
                .field("point", point)
                .field("name", name)
                .finish(),
            Self::Ensure { .. } => formatter.debug_struct("Ensure").finish_non_exhaustive(),
            Self::Rescue { matchers, .. } => formatter
                .debug_struct("Rescue")
                .field(
                    "matchers",
                    &matchers.iter().map(ExceptionClass::name).collect::<Vec<_>>(),
                )
                .finish_non_exhaustive(),
        }
    }
}

pub struct WaypointContext {
    pub(crate) frames: Vec<Frame>,
    pub(crate) names: BTreeMap<String, usize>,
    pub(crate) current_exception: Option<Exception>,
    pub(crate) pending_unwind_depth: Option<usize>,
    pub(crate) point_counter: u64,
}

impl Default for WaypointContext {
    fn default() -> Self {
        Self::new()
    }
}

impl WaypointContext {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            names: BTreeMap::new(),
            current_exception: None,
            pending_unwind_depth: None,
            point_counter: 1,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.frames.is_empty()
            && self.names.is_empty()
            && self.current_exception.is_none()
            && self.pending_unwind_depth.is_none()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn current_exception(&self) -> Option<&Exception> {
        self.current_exception.as_ref()
    }

    pub(crate) fn reset(&mut self) {
        self.frames.clear();
        self.names.clear();
        self.current_exception = None;
        self.pending_unwind_depth = None;
        self.point_counter = 1;
    }

    pub(crate) fn next_point_id(&mut self) -> u64 {
        let point = self.point_counter;
        self.point_counter += 1;
        point
    }

    pub(crate) fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub(crate) fn register_name(&mut self, name: &str, depth: usize) -> Result<(), Signal> {
        if self.names.contains_key(name) {
            return Err(Signal::Fault(WaypointError::new(
                "ENGINE_DUPLICATE_POINT",
                format!("Point \"{}\" is already registered.", name),
            )));
        }
        self.names.insert(name.to_string(), depth);
        Ok(())
    }

    pub(crate) fn depth_of(&self, name: &str) -> Result<usize, Signal> {
        self.names.get(name).copied().ok_or_else(|| {
            Signal::Fault(WaypointError::new(
                "ENGINE_UNKNOWN_POINT",
                format!("Point \"{}\" is not registered.", name),
            ))
        })
    }

    pub(crate) fn forget_name_of(&mut self, frame: &Frame) {
        if let Frame::Return {
            name: Some(name), ..
        } = frame
        {
            self.names.remove(name);
        }
    }

    pub(crate) fn find_return_index(&self, point: u64) -> Option<usize> {
        self.frames.iter().position(
            |frame| matches!(frame, Frame::Return { point: candidate, .. } if *candidate == point),
        )
    }

    pub(crate) fn nearest_return(&self) -> Option<(usize, u64)> {
        self.frames
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, frame)| match frame {
                Frame::Return { point, .. } => Some((index, *point)),
                _ => None,
            })
    }
}
