use codespan_reporting::diagnostic::{Diagnostic, Label};

use super::{MessageAdder, Span};

const UNEXPECTED: &str = "EP00";
const UNKNOWN_TYPE: &str = "EP01";
const UNKNOWN_OPCODE: &str = "EP02";
const UNKNOWN_BLOCK: &str = "EP03";
const DUPLICATE_BLOCK: &str = "EP04";
const REDEFINED_REGISTER: &str = "EP05";
const OUTSIDE_BLOCK: &str = "EP06";
const EMPTY_METHOD: &str = "EP07";
const MISSING_PREDECESSOR: &str = "EP08";
const REGISTER_TOO_LARGE: &str = "EP09";
const EARLY_TERMINATOR: &str = "EP10";

impl MessageAdder<'_> {
    pub fn parse_expected(&mut self, what: &str) {
        let labels = vec![Label::primary(self.at.file, self.at).with_message(format!("expected {what}"))];

        self.add(
            Diagnostic::error()
                .with_code(UNEXPECTED)
                .with_message(format!("expected {what}"))
                .with_labels(labels),
        );
    }

    pub fn parse_unknown_type(&mut self, name: &str) {
        let labels = vec![Label::primary(self.at.file, self.at)];
        let notes = vec![String::from(
            "known types are boolean, byte, char, short, int, float, long, double, and object",
        )];

        self.add(
            Diagnostic::error()
                .with_code(UNKNOWN_TYPE)
                .with_message(format!("unknown type '{name}'"))
                .with_labels(labels)
                .with_notes(notes),
        );
    }

    pub fn parse_unknown_opcode(&mut self, name: &str) {
        let labels = vec![Label::primary(self.at.file, self.at)];

        self.add(
            Diagnostic::error()
                .with_code(UNKNOWN_OPCODE)
                .with_message(format!("unknown opcode '{name}'"))
                .with_labels(labels),
        );
    }

    pub fn parse_unknown_block(&mut self, label: &str) {
        let labels = vec![Label::primary(self.at.file, self.at)];

        self.add(
            Diagnostic::error()
                .with_code(UNKNOWN_BLOCK)
                .with_message(format!("no block named '{label}' in this method"))
                .with_labels(labels),
        );
    }

    pub fn parse_duplicate_block(&mut self, label: &str, previous: Span) {
        let labels = vec![
            Label::primary(self.at.file, self.at),
            Label::secondary(previous.file, previous).with_message("previously declared here"),
        ];

        self.add(
            Diagnostic::error()
                .with_code(DUPLICATE_BLOCK)
                .with_message(format!("block '{label}' is declared twice"))
                .with_labels(labels),
        );
    }

    pub fn parse_redefined_register(&mut self, reg: &str) {
        let labels = vec![Label::primary(self.at.file, self.at)];
        let notes = vec![String::from(
            "every register may only have a single definition in SSA form",
        )];

        self.add(
            Diagnostic::error()
                .with_code(REDEFINED_REGISTER)
                .with_message(format!("register '{reg}' is defined more than once"))
                .with_labels(labels)
                .with_notes(notes),
        );
    }

    pub fn parse_outside_block(&mut self) {
        let labels = vec![Label::primary(self.at.file, self.at)];

        self.add(
            Diagnostic::error()
                .with_code(OUTSIDE_BLOCK)
                .with_message("instruction outside of a block")
                .with_labels(labels),
        );
    }

    pub fn parse_empty_method(&mut self, name: &str) {
        let labels = vec![Label::primary(self.at.file, self.at)];

        self.add(
            Diagnostic::error()
                .with_code(EMPTY_METHOD)
                .with_message(format!("method '{name}' has no blocks"))
                .with_labels(labels),
        );
    }

    pub fn parse_missing_predecessor(&mut self) {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message("expected '@' followed by a block name")];

        self.add(
            Diagnostic::error()
                .with_code(MISSING_PREDECESSOR)
                .with_message("phi operand without a predecessor block")
                .with_labels(labels),
        );
    }

    pub fn parse_register_too_large(&mut self, max: usize) {
        let labels = vec![Label::primary(self.at.file, self.at)];
        let notes = vec![format!("registers are numbered from v0 up to v{max}")];

        self.add(
            Diagnostic::error()
                .with_code(REGISTER_TOO_LARGE)
                .with_message("register number is too large")
                .with_labels(labels)
                .with_notes(notes),
        );
    }

    pub fn parse_early_terminator(&mut self, opcode: &str) {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message("more instructions follow in this block")];

        self.add(
            Diagnostic::error()
                .with_code(EARLY_TERMINATOR)
                .with_message(format!("'{opcode}' must be the last instruction of its block"))
                .with_labels(labels),
        );
    }
}
