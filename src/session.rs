// SPDX-License-Identifier: MIT

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use crate::command::{self, Command};
use crate::loadtest;
use crate::protocol::ProtocolClient;
use crate::tracker::UsedIdTracker;

/// Pause between load-test sends, matching the original client's pacing.
const LOAD_TEST_DELAY: Duration = Duration::from_millis(1);

/// Interactive prompt loop: one command fully handled (validate, send, print
/// the reply) before the next line is read. `exit` ends the session; local
/// rejections and network faults are printed and the loop continues.
pub fn interactive_mode(client: &ProtocolClient, tracker: &mut UsedIdTracker) -> io::Result<()> {
    println!("manual mode");
    println!("  SET <id> <message>");
    println!("  GET <id>");
    println!("type exit to quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") {
            break;
        }

        match command::validate(line, tracker) {
            Ok(cmd) => {
                // The server is authoritative for GET, so an unknown id is
                // only worth a note, not a refusal.
                if let Command::Get { id } = cmd {
                    if !tracker.contains(id) {
                        println!("note: id {id} is not in the local record store");
                    }
                }
                dispatch(client, &cmd);
            }
            Err(reject) => println!("error: {reject}"),
        }
    }
    Ok(())
}

/// Load-test loop: generates `count` sequential `SET` commands above the
/// current maximum id and sends them with a small pacing delay.
pub fn load_test(client: &ProtocolClient, tracker: &mut UsedIdTracker, count: u64) {
    let mut sent = 0;
    for cmd in loadtest::generate(tracker, count) {
        dispatch(client, &cmd);
        sent += 1;
        thread::sleep(LOAD_TEST_DELAY);
    }
    println!("{sent} SET commands sent");
}

fn dispatch(client: &ProtocolClient, cmd: &Command) {
    match client.send(&cmd.to_string()) {
        Ok(reply) => println!("server reply: {reply}"),
        Err(err) => println!("error: {err}"),
    }
}
