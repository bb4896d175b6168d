use std::{error::Error, fs, io};

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use cpu_sched_model::{
    Policy, Process, Quantum, input, logger,
    prompt::Prompt,
    report,
    scheduler::DEFAULT_QUANTUM,
    sim::{WorkloadConfig, bernoulli_processes},
};

fn cli() -> Command {
    Command::new("cpu_sched_model")
        .about("Simulates FCFS, SJF, SRT and Round Robin CPU scheduling")
        .arg(
            Arg::new("schedspec")
                .short('s')
                .long("schedspec")
                .value_parser(value_parser!(Policy))
                .help("Scheduler specification (F, J, S or R<num>)"),
        )
        .arg(
            Arg::new("process")
                .short('p')
                .long("process")
                .action(ArgAction::Append)
                .value_name("ARRIVAL:BURST")
                .help("Process to schedule; repeat for each process"),
        )
        .arg(
            Arg::new("inputfile")
                .short('i')
                .long("inputfile")
                .conflicts_with("process")
                .help("File with one `ARRIVAL BURST` process per line"),
        )
        .arg(
            Arg::new("random")
                .long("random")
                .value_parser(value_parser!(u64))
                .value_name("TICKS")
                .conflicts_with_all(["process", "inputfile"])
                .help("Generate Bernoulli arrivals over TICKS ticks"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(value_parser!(u64))
                .requires("random")
                .help("Seed for --random"),
        )
        .arg(
            Arg::new("compare")
                .long("compare")
                .action(ArgAction::SetTrue)
                .conflicts_with("schedspec")
                .help("Run every policy on the workload and summarise"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log scheduling decisions; repeat for more detail"),
        )
}

// None when no workload flags were given
fn load_processes(matches: &ArgMatches) -> Result<Option<Vec<Process>>, Box<dyn Error>> {
    if let Some(pairs) = matches.get_many::<String>("process") {
        let pairs: Vec<&String> = pairs.collect();
        return Ok(Some(input::parse_pairs(&pairs)?));
    }

    if let Some(path) = matches.get_one::<String>("inputfile") {
        let contents = fs::read_to_string(path)
            .map_err(|err| format!("Failed to open file: {path}: {err}"))?;
        return Ok(Some(input::parse_process_file(&contents)?));
    }

    if let Some(&ticks) = matches.get_one::<u64>("random") {
        let config = WorkloadConfig {
            ticks,
            seed: matches.get_one::<u64>("seed").copied().unwrap_or_default(),
            ..WorkloadConfig::default()
        };
        let processes = bernoulli_processes(&config);
        log::info!(
            "Generated {} processes over {} ticks (seed {})",
            processes.len(),
            config.ticks,
            config.seed
        );
        return Ok(Some(processes));
    }

    Ok(None)
}

fn main() -> Result<(), Box<dyn Error>> {
    let matches = cli().get_matches();
    logger::init(logger::level_for(matches.get_count("verbose")))?;

    let Some(processes) = load_processes(&matches)? else {
        let stdin = io::stdin();
        Prompt::new(stdin.lock(), io::stdout()).run()?;
        return Ok(());
    };

    if matches.get_flag("compare") {
        for policy in Policy::all(Quantum::new(DEFAULT_QUANTUM)?) {
            let schedule = policy.run(&processes)?;
            println!("{}", report::summary_line(&policy.to_string(), &schedule));
        }
        return Ok(());
    }

    let policy = matches
        .get_one::<Policy>("schedspec")
        .copied()
        .unwrap_or(Policy::Fcfs);
    let schedule = policy.run(&processes)?;
    print!("{}", report::render(&schedule));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn loads_processes_from_flags() {
        let matches = cli()
            .try_get_matches_from(["cpu_sched_model", "-s", "R3", "-p", "0:5", "-p", "1:3"])
            .unwrap();
        let processes = load_processes(&matches).unwrap().unwrap();

        assert_eq!(processes, Process::numbered(&[(0, 5), (1, 3)]));
        assert_eq!(
            matches.get_one::<Policy>("schedspec"),
            Some(&Policy::RoundRobin(Quantum::new(3).unwrap()))
        );
    }

    #[test]
    fn random_workload_is_seeded() {
        let args = ["cpu_sched_model", "--random", "40", "--seed", "3"];
        let first = load_processes(&cli().try_get_matches_from(args).unwrap())
            .unwrap()
            .unwrap();
        let second = load_processes(&cli().try_get_matches_from(args).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_bad_schedspec_and_missing_workload() {
        assert!(
            cli()
                .try_get_matches_from(["cpu_sched_model", "-s", "Q"])
                .is_err()
        );
        let matches = cli().try_get_matches_from(["cpu_sched_model"]).unwrap();
        assert!(load_processes(&matches).unwrap().is_none());
    }
}
