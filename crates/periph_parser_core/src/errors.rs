//! Parser diagnostic types.
//!
//! Diagnostics are values, not `Result`s: the interpreter never fails. Every
//! byte, valid or not, leaves the state machine ready for the next one, and
//! anything worth telling the caller goes through
//! [`PageSink::report_error`](crate::PageSink::report_error).

use std::fmt::Display;

/// Diagnostic severity level.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorLevel {
    /// Informational (e.g. a recognized but unimplemented command)
    Info = 0,
    /// Potentially problematic input; parsing continues
    Warning = 1,
    /// Input that may produce incorrect output
    Error = 2,
}

impl ErrorLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl Display for ErrorLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parser diagnostics with context information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A recognized dispatch byte whose command is not implemented.
    UnimplementedCommand { context: &'static str, byte: u8 },
    /// An argument byte outside the range the command expects.
    MalformedArgument { command: &'static str, byte: u8 },
}

impl ParseError {
    /// Suggested severity for this diagnostic.
    pub fn level(&self) -> ErrorLevel {
        match self {
            Self::UnimplementedCommand { .. } => ErrorLevel::Info,
            Self::MalformedArgument { .. } => ErrorLevel::Warning,
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::UnimplementedCommand { context, byte } => {
                format!("Command not implemented: {} {}", context, print_char_value(*byte))
            }
            Self::MalformedArgument { command, byte } => {
                format!("Malformed argument for '{}': {}", command, print_char_value(*byte))
            }
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level(), self.description())
    }
}

/// Format a byte for human-readable diagnostics: hex plus the character
/// itself when it is printable ASCII.
pub fn print_char_value(byte: u8) -> String {
    match byte {
        0x20..=0x7E => format!("0x{:02X} ('{}')", byte, byte as char),
        _ => format!("0x{:02X}", byte),
    }
}
