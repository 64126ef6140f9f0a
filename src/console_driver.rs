use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use codespan_reporting::term::{self, Config, DisplayStyle};
use dexalloc_common::message::Messages;
use dexalloc_common::Driver;
use log::error;

pub struct ConsoleDriver {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: Config,
    errors: usize,
}

impl ConsoleDriver {
    pub fn new(files: SimpleFiles<String, String>) -> Self {
        Self {
            files,
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: Config {
                display_style: DisplayStyle::Rich,
                ..Default::default()
            },
            errors: 0,
        }
    }

    /// The number of diagnostics reported so far.
    pub fn errors(&self) -> usize {
        self.errors
    }
}

impl Driver for ConsoleDriver {
    fn report(&mut self, messages: Messages) {
        for msg in messages.msgs {
            self.errors += 1;
            if let Err(e) = term::emit(&mut self.writer, &self.config, &self.files, &msg) {
                error!("unable to print diagnostic: {e}");
            }
        }
    }
}
