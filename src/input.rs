//! Process lists from text: `ARRIVAL:BURST` command-line pairs and
//! `ARRIVAL BURST` input files. Ids are assigned 1, 2, ... in order.

use crate::{
    core::{ProcessId, Ticks},
    error::InputError,
    sim::process::{self, Process},
};

/// Parses one process from its two numeric fields.
pub fn parse_fields(
    pid: ProcessId,
    line: usize,
    arrival: &str,
    burst: &str,
) -> Result<Process, InputError> {
    let malformed = || InputError::Malformed {
        line,
        text: format!("{arrival} {burst}"),
    };
    let arrival: i64 = arrival.trim().parse().map_err(|_| malformed())?;
    let burst: i64 = burst.trim().parse().map_err(|_| malformed())?;

    if arrival < 0 {
        return Err(InputError::NegativeArrival { pid });
    }
    if burst <= 0 {
        return Err(InputError::NonPositiveBurst { pid });
    }
    Ok(Process::new(pid, arrival as Ticks, burst as Ticks))
}

/// Parses `ARRIVAL:BURST` pairs, one per process.
pub fn parse_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Vec<Process>, InputError> {
    let processes = pairs
        .iter()
        .zip(1..)
        .map(|(pair, pid)| {
            let pair = pair.as_ref();
            let (arrival, burst) = pair.split_once(':').ok_or_else(|| InputError::Malformed {
                line: pid as usize,
                text: pair.to_owned(),
            })?;
            parse_fields(pid, pid as usize, arrival, burst)
        })
        .collect::<Result<Vec<_>, _>>()?;

    process::validate(&processes)?;
    Ok(processes)
}

/// Parses an input file: one `ARRIVAL BURST` per line, `#` starts a comment.
pub fn parse_process_file(contents: &str) -> Result<Vec<Process>, InputError> {
    let mut processes = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        let line_no = index + 1;
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let (Some(arrival), Some(burst), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(InputError::Malformed {
                line: line_no,
                text: line.to_owned(),
            });
        };

        let pid = processes.len() as ProcessId + 1;
        processes.push(parse_fields(pid, line_no, arrival, burst)?);
    }

    process::validate(&processes)?;
    Ok(processes)
}
