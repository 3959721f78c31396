use std::io::Write;

pub mod add_hub;
pub mod health;
pub mod hub;
pub mod hubs;
pub mod operators;
pub mod policies;
pub mod policy;
pub mod remove_hub;
pub mod spokes;
pub mod token;

/// y/N prompt shared by the destructive commands.
pub(crate) fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{}", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
