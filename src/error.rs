use std::{error::Error, fmt};

use crate::core::{ProcessId, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Empty,
    NonPositiveBurst { pid: ProcessId },
    NegativeArrival { pid: ProcessId },
    NonPositiveQuantum,
    DuplicateId { pid: ProcessId },
    Malformed { line: usize, text: String },
    // Latest arrival plus total burst does not fit in Ticks
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    InvalidInput(InputError),
    // Work remains but nothing is runnable or waiting for admission
    Stalled { now: Ticks },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "at least one process is required"),
            Self::NonPositiveBurst { pid } => {
                write!(f, "process {pid} must have a burst time greater than 0")
            }
            Self::NegativeArrival { pid } => {
                write!(f, "process {pid} must have a non-negative arrival time")
            }
            Self::NonPositiveQuantum => write!(f, "time quantum must be greater than 0"),
            Self::DuplicateId { pid } => write!(f, "process id {pid} is used more than once"),
            Self::Malformed { line, text } => {
                write!(f, "entry {line}: cannot read a process from {text:?}")
            }
            Self::Overflow => write!(
                f,
                "latest arrival plus total burst time exceeds {}",
                Ticks::MAX
            ),
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::Stalled { now } => write!(f, "simulation stalled at t={now}"),
        }
    }
}

impl Error for InputError {}

impl Error for SimError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Stalled { .. } => None,
        }
    }
}

impl From<InputError> for SimError {
    fn from(err: InputError) -> Self {
        Self::InvalidInput(err)
    }
}
