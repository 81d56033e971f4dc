use colored::Colorize;

/// Log and status sink provided by the CI host.
pub trait ActionsCore {
    fn info(&self, message: &str);

    fn error(&self, message: &str);

    /// Emit `message` as an error and flag the step as failed.
    fn set_failed(&self, message: &str);

    /// Register a value the host must redact from all later log output.
    fn set_secret(&self, value: &str);
}

/// Writes GitHub Actions workflow commands to stdout.
#[derive(Debug, Default)]
pub struct GitHubActionsCore;

impl GitHubActionsCore {
    pub fn new() -> Self {
        Self
    }
}

impl ActionsCore for GitHubActionsCore {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        println!("::error::{}", escape_data(message));
    }

    fn set_failed(&self, message: &str) {
        self.error(message);
    }

    fn set_secret(&self, value: &str) {
        if !value.is_empty() {
            println!("::add-mask::{}", escape_data(value));
        }
    }
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Prefixed logger over an [`ActionsCore`] sink.
pub struct Logger<'a> {
    core: &'a dyn ActionsCore,
    debug: bool,
    prefix: String,
}

impl<'a> Logger<'a> {
    pub fn new(core: &'a dyn ActionsCore, debug: bool, prefix: impl Into<String>) -> Self {
        Self {
            core,
            debug,
            prefix: prefix.into(),
        }
    }

    /// No-op unless debug output was requested.
    pub fn debug(&self, message: &str) {
        if self.debug {
            let line = format!("DEBUG {}", self.decorate(message));
            self.core.info(&line.dimmed().to_string());
        }
    }

    pub fn info(&self, message: &str) {
        self.core.info(&self.decorate(message));
    }

    pub fn error(&self, message: &str) {
        self.core.error(&self.decorate(message));
    }

    fn decorate(&self, message: &str) -> String {
        if self.prefix.is_empty() {
            message.to_string()
        } else {
            format!("{} : {}", self.prefix, message)
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::ActionsCore;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum CoreEvent {
        Info(String),
        Error(String),
        Failed(String),
        Secret(String),
    }

    /// Records every call so tests can assert on the exact log stream.
    #[derive(Debug, Default)]
    pub struct RecordingCore {
        events: RefCell<Vec<CoreEvent>>,
    }

    impl RecordingCore {
        pub fn events(&self) -> Vec<CoreEvent> {
            self.events.borrow().clone()
        }

        pub fn errors(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    CoreEvent::Error(msg) => Some(msg),
                    _ => None,
                })
                .collect()
        }

        pub fn failures(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    CoreEvent::Failed(msg) => Some(msg),
                    _ => None,
                })
                .collect()
        }

        pub fn infos(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    CoreEvent::Info(msg) => Some(msg),
                    _ => None,
                })
                .collect()
        }
    }

    impl ActionsCore for RecordingCore {
        fn info(&self, message: &str) {
            self.events
                .borrow_mut()
                .push(CoreEvent::Info(message.to_string()));
        }

        fn error(&self, message: &str) {
            self.events
                .borrow_mut()
                .push(CoreEvent::Error(message.to_string()));
        }

        fn set_failed(&self, message: &str) {
            self.events
                .borrow_mut()
                .push(CoreEvent::Failed(message.to_string()));
        }

        fn set_secret(&self, value: &str) {
            self.events
                .borrow_mut()
                .push(CoreEvent::Secret(value.to_string()));
        }
    }
}
