//! Interactive menu: pick a policy, enter processes, see the report.
//! Invalid entries are reported and asked for again.

use std::io::{self, BufRead, Write};

use crate::{
    core::Ticks,
    policy::Policy,
    report,
    scheduler::Quantum,
    sim::Process,
};

const MENU: &str = "\nCPU Scheduling Algorithms
1. First-Come, First-Served (FCFS)
2. Shortest-Job-First (SJF)
3. Shortest-Remaining-Time (SRT)
4. Round Robin (RR)
5. Exit";

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    // None on end of input
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    /// Asks until an integer of at least `min` is entered.
    pub fn read_int(&mut self, prompt: &str, min: Ticks) -> io::Result<Option<Ticks>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match line.parse::<i64>() {
                Ok(value) if value >= min as i64 => return Ok(Some(value as Ticks)),
                Ok(_) => writeln!(
                    self.output,
                    "Error: Value must be at least {min}. Try again."
                )?,
                Err(_) => writeln!(self.output, "Error: Please enter a valid integer.")?,
            }
        }
    }

    fn read_choice(&mut self) -> io::Result<Option<u8>> {
        loop {
            let Some(line) = self.read_line("Select an option: ")? else {
                return Ok(None);
            };
            match line.parse::<u8>() {
                Ok(choice @ 1..=5) => return Ok(Some(choice)),
                _ => writeln!(
                    self.output,
                    "Error: Invalid choice. Please enter a number between 1 and 5."
                )?,
            }
        }
    }

    fn read_processes(&mut self) -> io::Result<Option<Vec<Process>>> {
        let Some(count) = self.read_int("Enter number of processes (≥ 1): ", 1)? else {
            return Ok(None);
        };

        let mut processes = Vec::new();
        for pid in 1..=count {
            let Some(arrival) = self.read_int(&format!("Enter arrival time of P{pid} (≥ 0): "), 0)?
            else {
                return Ok(None);
            };
            let Some(burst) = self.read_int(&format!("Enter burst time of P{pid} (> 0): "), 1)?
            else {
                return Ok(None);
            };
            processes.push(Process::new(pid, arrival, burst));
        }
        Ok(Some(processes))
    }

    /// Runs the menu until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.read_choice()? else {
                return Ok(());
            };
            if choice == 5 {
                writeln!(self.output, "Exiting program. Goodbye!")?;
                return Ok(());
            }

            let Some(processes) = self.read_processes()? else {
                return Ok(());
            };

            let policy = match choice {
                1 => Policy::Fcfs,
                2 => Policy::Sjf,
                3 => Policy::Srt,
                _ => {
                    let Some(quantum) = self.read_int("Enter time quantum (> 0): ", 1)? else {
                        return Ok(());
                    };
                    match Quantum::new(quantum) {
                        Ok(quantum) => Policy::RoundRobin(quantum),
                        Err(err) => {
                            writeln!(self.output, "Error: {err}")?;
                            continue;
                        }
                    }
                }
            };

            match policy.run(&processes) {
                Ok(schedule) => writeln!(self.output, "\n{}", report::render(&schedule))?,
                Err(err) => {
                    log::warn!("{policy} rejected input: {err}");
                    writeln!(self.output, "Error: {err}")?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str) -> String {
        let mut prompt = Prompt::new(Cursor::new(input.to_owned()), Vec::new());
        prompt.run().unwrap();
        String::from_utf8(prompt.into_output()).unwrap()
    }

    #[test]
    fn runs_round_robin_session() {
        let output = session("4\n2\n0\n5\n1\n3\n2\n5\n");

        assert!(output.contains("P1 (0-2) → P2 (2-4) → P1 (4-6) → P2 (6-7) → P1 (7-8)"));
        assert!(output.contains("Average Waiting Time: 3.00"));
        assert!(output.ends_with("Exiting program. Goodbye!\n"));
    }

    #[test]
    fn reprompts_on_invalid_entries() {
        let output = session("9\nabc\n1\n0\n1\n-1\n0\n0\n4\n5\n");

        assert_eq!(
            output
                .matches("Error: Invalid choice. Please enter a number between 1 and 5.")
                .count(),
            2
        );
        assert!(output.contains("Error: Value must be at least 1. Try again."));
        assert!(output.contains("Error: Value must be at least 0. Try again."));
        assert!(output.contains("P1 (0-4)"));
    }

    #[test]
    fn stops_quietly_at_end_of_input() {
        let output = session("2\n3\n0\n");
        assert!(output.ends_with("Enter burst time of P1 (> 0): "));
    }
}
