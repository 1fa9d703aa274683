//! Print a bcrypt hash for the moderation admin account.
//!
//! Usage:
//!     cargo run -p admin-tools --bin generate_admin_hash [COST]
//!
//! The password is read from stdin twice. Put the output in `ADMIN_PASSWORD_HASH`.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn prompt(label: &str, lines: &mut impl Iterator<Item = io::Result<String>>) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    Ok(lines
        .next()
        .transpose()?
        .unwrap_or_default()
        .trim()
        .to_string())
}

fn main() -> io::Result<ExitCode> {
    let cost = match std::env::args().nth(1) {
        Some(raw) => match raw.parse::<u32>() {
            Ok(cost) if (4..=31).contains(&cost) => cost,
            _ => {
                eprintln!("cost must be a number between 4 and 31, got {}", raw);
                return Ok(ExitCode::FAILURE);
            }
        },
        None => bcrypt::DEFAULT_COST,
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let password = prompt("Admin password", &mut lines)?;
    if password.len() < 12 {
        eprintln!("password must be at least 12 characters");
        return Ok(ExitCode::FAILURE);
    }
    if prompt("Confirm password", &mut lines)? != password {
        eprintln!("passwords do not match");
        return Ok(ExitCode::FAILURE);
    }

    match bcrypt::hash(&password, cost) {
        Ok(hash) => {
            println!("ADMIN_PASSWORD_HASH=\"{}\"", hash);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("failed to hash password: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
