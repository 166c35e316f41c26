//! Stdin-backed operator prompts.
//!
//! Prompts write to stderr so stdout stays clean for the structured
//! result. Secret answers are passed straight into the pipeline and
//! never logged.

use std::io::{self, BufRead, Write};

use meridian_wallet::{DeviceAccount, Prompt, WalletError};

pub struct StdinPrompt;

fn ask(question: &str) -> Result<String, WalletError> {
    eprint!("{question}");
    io::stderr()
        .flush()
        .map_err(|e| WalletError::Prompt(e.to_string()))?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| WalletError::Prompt(e.to_string()))?;
    Ok(answer.trim_end_matches(['\r', '\n']).to_string())
}

impl Prompt for StdinPrompt {
    fn passphrase(&self) -> Result<String, WalletError> {
        ask("Enter your passphrase: ")
    }

    fn second_secret(&self) -> Result<String, WalletError> {
        ask("Enter your second secret (leave empty if none): ")
    }

    fn select_account(&self, accounts: &[DeviceAccount]) -> Result<usize, WalletError> {
        eprintln!("Device accounts:");
        for (i, account) in accounts.iter().enumerate() {
            eprintln!("  [{i}] {}", account.address);
        }
        let answer = ask("Select an account index: ")?;
        answer.trim().parse().map_err(|_| {
            WalletError::Validation(format!("not a valid account index: {answer}"))
        })
    }

    fn confirm(&self, summary: &str) -> Result<bool, WalletError> {
        let answer = ask(&format!("{summary} "))?;
        Ok(matches!(
            answer.trim().to_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}
