//! Leader failure suite
//!
//! Describes a small leader-failure sweep with derived records, prints the
//! column headers, a digest per run, and the CSV a plotting script would read.
//!
//! Run with: `cargo run -p fieldflat --example leader_failure`

use fieldflat::prelude::*;
use fieldflat::generate_csv_report;
use std::time::Duration;

#[derive(Record)]
struct ElectionOptions {
    ping_period: Duration,
    no_ping_timeout_min: Duration,
    no_ping_timeout_max: Duration,
}

#[derive(Record)]
struct LeaderOptions {
    resend_phase1as_period: Duration,
    resend_phase2as_period: Duration,
    send_chosen_watermark_every_n: u32,
    stutter: u32,
    election_options: ElectionOptions,
}

#[derive(Record)]
struct StringWorkload {
    size_mean: u32,
    size_std: u32,
}

#[derive(Record)]
struct Input {
    f: u32,
    num_client_procs: u32,
    num_clients_per_proc: u32,
    num_leaders: u32,
    num_acceptors: u32,
    num_replicas: u32,
    warmup_duration: Duration,
    duration: Duration,
    state_machine: String,
    #[record(leaf)]
    workload: StringWorkload,
    leader_options: LeaderOptions,
    #[record(skip)]
    #[allow(dead_code)]
    profiled: bool,
}

#[derive(Record)]
struct LatencyOutput {
    median_ms: f64,
    p90_ms: f64,
    p99_ms: f64,
}

#[derive(Record)]
struct Output {
    #[record(rename = "latency")]
    write_latency: LatencyOutput,
    throughput_1s: Option<f64>,
    recovery_time: Duration,
}

fn input(f: u32, num_client_procs: u32) -> Input {
    let n = 2 * f + 1;
    Input {
        f,
        num_client_procs,
        num_clients_per_proc: 1,
        num_leaders: f + 1,
        num_acceptors: n,
        num_replicas: n,
        warmup_duration: Duration::from_secs(10),
        duration: Duration::from_secs(35),
        state_machine: "Noop".to_string(),
        workload: StringWorkload {
            size_mean: 1,
            size_std: 0,
        },
        leader_options: LeaderOptions {
            resend_phase1as_period: Duration::from_secs(60),
            resend_phase2as_period: Duration::from_secs(60),
            send_chosen_watermark_every_n: 100,
            stutter: 1000,
            election_options: ElectionOptions {
                ping_period: Duration::from_secs(1),
                no_ping_timeout_min: Duration::from_secs(5),
                no_ping_timeout_max: Duration::from_secs(5),
            },
        },
        profiled: false,
    }
}

fn fake_run(input: &Input) -> Output {
    let load = f64::from(input.num_client_procs);
    let median_ms = 0.8 + 0.05 * load + 0.1 * f64::from(input.f);
    Output {
        write_latency: LatencyOutput {
            median_ms,
            p90_ms: median_ms * 1.7,
            p99_ms: median_ms * 3.1,
        },
        throughput_1s: (input.num_client_procs > 1).then(|| 1000.0 * load / median_ms),
        recovery_time: Duration::from_millis(1200 + 150 * u64::from(input.f)),
    }
}

fn main() -> anyhow::Result<()> {
    let inputs: Vec<Input> = [1, 2]
        .into_iter()
        .flat_map(|f| [1, 4].into_iter().map(move |procs| input(f, procs)))
        .collect();

    println!("Input columns:");
    for path in flatten_paths(&inputs[0])? {
        println!("  {}", path);
    }

    let summary = Summary::new()
        .fields(["f", "num_client_procs", "latency.median_ms", "throughput_1s"])
        .with_precision(4);

    let mut table = ResultsTable::new();
    for input in &inputs {
        let output = fake_run(input);
        table.push(input, &output)?;
        println!("{}", summary.render_row(&table.rows()[table.len() - 1])?);
    }

    println!("\n{}", to_mapping(&inputs[0].leader_options)?);
    println!("\n{}", generate_csv_report(&table)?);
    Ok(())
}
