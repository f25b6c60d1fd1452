use wp_core::{Exception, ExceptionClass, WaypointError, WpValue};

use crate::context::{Frame, Signal, WaypointContext};
use crate::unwind::CleanupOutcome;

#[derive(Debug, Clone)]
pub enum RaiseArg {
    Exception(Exception),
    Class(ExceptionClass),
    Text(String),
    Value(WpValue),
}

impl WaypointContext {
    pub fn raise(&mut self) -> Result<(), Signal> {
        self.raise_with(Vec::new())
    }

    pub fn raise_message(&mut self, message: impl Into<String>) -> Result<(), Signal> {
        self.raise_with(vec![RaiseArg::Text(message.into())])
    }

    pub fn raise_class(&mut self, class: ExceptionClass) -> Result<(), Signal> {
        self.raise_with(vec![RaiseArg::Class(class)])
    }

    pub fn raise_class_message(
        &mut self,
        class: ExceptionClass,
        message: impl Into<String>,
    ) -> Result<(), Signal> {
        self.raise_with(vec![RaiseArg::Class(class), RaiseArg::Text(message.into())])
    }

    pub fn raise_exception(&mut self, exception: Exception) -> Result<(), Signal> {
        self.raise_with(vec![RaiseArg::Exception(exception)])
    }

    pub fn raise_with(&mut self, args: Vec<RaiseArg>) -> Result<(), Signal> {
        let exception = self.make_exception(args)?;
        self.current_exception = Some(exception);

        // The outermost return frame becomes the fallback target: the place
        // an unrescued exception finally surfaces as a host error.
        let fallback = match self.frames.first() {
            Some(Frame::Return { point, .. }) => Some(*point),
            _ => None,
        };
        if fallback.is_some() {
            let frame = self.frames.remove(0);
            self.forget_name_of(&frame);
        }

        let slice: Vec<Frame> = self.frames.drain(..).collect();
        self.names.clear();

        match self.run_cleanup(slice)? {
            CleanupOutcome::Rescued => Ok(()),
            CleanupOutcome::Completed => match fallback {
                Some(point) => Err(Signal::Jump {
                    point,
                    value: WpValue::Null,
                }),
                // Nowhere to propagate; the exception stays in the slot.
                None => Ok(()),
            },
        }
    }

    fn make_exception(&self, args: Vec<RaiseArg>) -> Result<Exception, Signal> {
        let count = args.len();
        if count > 2 {
            return Err(Signal::Fault(WaypointError::new(
                "ENGINE_ARGUMENT_COUNT",
                format!("raise accepts at most two arguments, got {}.", count),
            )));
        }

        let mut args = args.into_iter();
        let first = args.next();
        let second = args.next();
        match (first, second) {
            (None, _) => Ok(self
                .current_exception
                .clone()
                .unwrap_or_else(|| Exception::of_class(ExceptionClass::error()))),
            (Some(RaiseArg::Exception(exception)), None) => Ok(exception),
            (Some(RaiseArg::Class(class)), None) => {
                Self::require_exception_class(&class)?;
                Ok(Exception::of_class(class))
            }
            (Some(RaiseArg::Text(message)), None) => {
                Ok(Exception::new(ExceptionClass::error(), message))
            }
            (Some(RaiseArg::Value(value)), None) => Err(Signal::Fault(WaypointError::new(
                "ENGINE_NOT_AN_EXCEPTION_TYPE",
                format!("Cannot raise a {} value.", value.type_name()),
            ))),
            (Some(head), Some(message)) => {
                let message = Self::message_text(message);
                match head {
                    RaiseArg::Class(class) => {
                        Self::require_exception_class(&class)?;
                        Ok(Exception::new(class, message))
                    }
                    RaiseArg::Exception(exception) => {
                        Ok(Exception::new(exception.class().clone(), message))
                    }
                    RaiseArg::Text(_) | RaiseArg::Value(_) => {
                        Err(Signal::Fault(WaypointError::new(
                            "ENGINE_NOT_AN_EXCEPTION_TYPE",
                            "First raise argument must be an exception class or instance."
                                .to_string(),
                        )))
                    }
                }
            }
        }
    }

    fn require_exception_class(class: &ExceptionClass) -> Result<(), Signal> {
        if class.is_exception() {
            return Ok(());
        }
        Err(Signal::Fault(WaypointError::new(
            "ENGINE_NOT_AN_EXCEPTION_TYPE",
            format!("Class \"{}\" is not an exception type.", class.name()),
        )))
    }

    fn message_text(arg: RaiseArg) -> String {
        match arg {
            RaiseArg::Text(text) => text,
            RaiseArg::Value(value) => value.to_text(),
            RaiseArg::Exception(exception) => exception.message().to_string(),
            RaiseArg::Class(class) => class.name().to_string(),
        }
    }
}

#[cfg(test)]
mod synthesis_tests {
    use super::*;

    fn fault_code(result: Result<Exception, Signal>) -> String {
        match result {
            Err(Signal::Fault(error)) => error.code,
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn zero_args_without_prior_exception_builds_the_generic_default() {
        let context = WaypointContext::new();
        let exception = context.make_exception(Vec::new()).expect("default");
        assert_eq!(exception.class().name(), "Error");
        assert_eq!(exception.message(), "Error");
    }

    #[test]
    fn zero_args_reuses_the_in_flight_exception() {
        let mut context = WaypointContext::new();
        let io = ExceptionClass::error().subclass("IoError");
        context.current_exception = Some(Exception::new(io.clone(), "disk gone"));
        let exception = context.make_exception(Vec::new()).expect("rethrow");
        assert_eq!(exception.class(), &io);
        assert_eq!(exception.message(), "disk gone");
    }

    #[test]
    fn one_text_arg_wraps_into_the_generic_class() {
        let context = WaypointContext::new();
        let exception = context
            .make_exception(vec![RaiseArg::Text("x".to_string())])
            .expect("text");
        assert_eq!(exception.class().name(), "Error");
        assert_eq!(exception.message(), "x");
    }

    #[test]
    fn one_class_arg_instantiates_with_class_name_message() {
        let context = WaypointContext::new();
        let io = ExceptionClass::error().subclass("IoError");
        let exception = context
            .make_exception(vec![RaiseArg::Class(io.clone())])
            .expect("class");
        assert_eq!(exception.class(), &io);
        assert_eq!(exception.message(), "IoError");
    }

    #[test]
    fn class_and_message_args_instantiate_with_that_message() {
        let context = WaypointContext::new();
        let io = ExceptionClass::error().subclass("IoError");
        let exception = context
            .make_exception(vec![
                RaiseArg::Class(io.clone()),
                RaiseArg::Text("late".to_string()),
            ])
            .expect("class and message");
        assert_eq!(exception.class(), &io);
        assert_eq!(exception.message(), "late");
    }

    #[test]
    fn exception_and_message_args_reinstantiate_the_class() {
        let context = WaypointContext::new();
        let io = ExceptionClass::error().subclass("IoError");
        let exception = context
            .make_exception(vec![
                RaiseArg::Exception(Exception::new(io.clone(), "old")),
                RaiseArg::Text("new".to_string()),
            ])
            .expect("exception and message");
        assert_eq!(exception.class(), &io);
        assert_eq!(exception.message(), "new");
    }

    #[test]
    fn value_message_is_rendered_as_text() {
        let context = WaypointContext::new();
        let exception = context
            .make_exception(vec![
                RaiseArg::Class(ExceptionClass::error()),
                RaiseArg::Value(WpValue::Number(42.0)),
            ])
            .expect("rendered message");
        assert_eq!(exception.message(), "42");
    }

    #[test]
    fn non_exception_class_is_rejected() {
        let context = WaypointContext::new();
        let widget = ExceptionClass::non_exception("Widget");
        let code = fault_code(context.make_exception(vec![RaiseArg::Class(widget)]));
        assert_eq!(code, "ENGINE_NOT_AN_EXCEPTION_TYPE");
    }

    #[test]
    fn plain_value_is_rejected() {
        let context = WaypointContext::new();
        let code = fault_code(context.make_exception(vec![RaiseArg::Value(WpValue::Bool(true))]));
        assert_eq!(code, "ENGINE_NOT_AN_EXCEPTION_TYPE");
    }

    #[test]
    fn text_first_of_two_args_is_rejected() {
        let context = WaypointContext::new();
        let code = fault_code(context.make_exception(vec![
            RaiseArg::Text("a".to_string()),
            RaiseArg::Text("b".to_string()),
        ]));
        assert_eq!(code, "ENGINE_NOT_AN_EXCEPTION_TYPE");
    }

    #[test]
    fn more_than_two_args_is_rejected() {
        let context = WaypointContext::new();
        let code = fault_code(context.make_exception(vec![
            RaiseArg::Text("a".to_string()),
            RaiseArg::Text("b".to_string()),
            RaiseArg::Text("c".to_string()),
        ]));
        assert_eq!(code, "ENGINE_ARGUMENT_COUNT");
    }
}
