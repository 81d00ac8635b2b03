// SPDX-License-Identifier: MIT

use clap::Parser;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

mod command;
mod loadtest;
mod protocol;
mod report;
mod scanner;
mod session;
mod tracker;

use protocol::ProtocolClient;
use tracker::UsedIdTracker;

#[derive(Parser)]
struct Args {
    /// Host the leader server listens on.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// TCP port of the leader server.
    #[arg(short, long, default_value_t = 6666)]
    port: u16,

    /// Root of the record store used to rebuild the used-id set.
    #[arg(short, long, default_value = "records")]
    records: PathBuf,

    /// Connect and read timeout, in seconds.
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,
}

fn main() -> io::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let ids = scanner::scan(&args.records);
    println!(
        "loaded {} used ids from {}",
        ids.len(),
        args.records.display()
    );
    let mut tracker = UsedIdTracker::new(ids);

    let client = ProtocolClient::new(
        &args.host,
        args.port,
        Duration::from_secs(args.timeout_secs),
    );

    println!("1 - manual SET / GET");
    println!("2 - automatic SET load test");
    println!("3 - record store report");

    match prompt("choice: ")?.as_str() {
        "1" => session::interactive_mode(&client, &mut tracker)?,
        "2" => {
            let count = match prompt("how many SET commands?: ")?.parse::<u64>() {
                Ok(count) => count,
                Err(_) => {
                    println!("invalid count");
                    return Ok(());
                }
            };
            session::load_test(&client, &mut tracker, count);
        }
        "3" => report::print_report(&args.records)?,
        other => println!("invalid selection: {other:?}"),
    }

    Ok(())
}

fn prompt(text: &str) -> io::Result<String> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
