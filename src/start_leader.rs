// SPDX-License-Identifier: MIT

//! Launches the leader server in a separate terminal window so the client
//! can be driven from this one. The server command is whatever the operator
//! passes; there is no further contract beyond "the leader becomes reachable
//! at its host:port afterward".

use clap::Parser;

use std::io;
use std::path::PathBuf;
use std::process::Command;

#[derive(Parser)]
struct Args {
    /// Directory to launch the server from.
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Command line that starts the leader server.
    #[arg(required = true, trailing_var_arg = true)]
    server_command: Vec<String>,
}

fn main() -> io::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let dir = args.dir.canonicalize()?;
    let command_line = args.server_command.join(" ");

    if cfg!(target_os = "windows") {
        Command::new("cmd")
            .arg("/k")
            .args(&args.server_command)
            .current_dir(&dir)
            .spawn()?;
    } else if cfg!(target_os = "macos") {
        let script = format!(
            "tell application \"Terminal\"\n\
             do script \"cd {} && {}\"\n\
             activate\n\
             end tell",
            dir.display(),
            command_line,
        );
        Command::new("osascript").arg("-e").arg(script).spawn()?;
    } else if cfg!(target_os = "linux") {
        Command::new("gnome-terminal")
            .args(["--", "bash", "-c"])
            .arg(format!("cd {} && {}; exec bash", dir.display(), command_line))
            .spawn()?;
    } else {
        return Err(io::Error::other("unsupported operating system"));
    }

    println!("leader server started in a separate terminal");
    Ok(())
}
