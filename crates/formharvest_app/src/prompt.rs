use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use formharvest_engine::Credentials;

/// Complete the credentials from the command line, asking for what is missing.
pub fn resolve_credentials(username: Option<String>, password: Option<String>) -> Result<Credentials> {
    let username = match username {
        Some(name) => name,
        None => {
            let stdin = io::stdin();
            prompt_line(&mut stdin.lock(), &mut io::stdout(), "Username: ")?
        }
    };
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ").context("failed to read password")?,
    };
    Ok(Credentials::new(username, password))
}

fn prompt_line(input: &mut impl BufRead, output: &mut impl Write, label: &str) -> Result<String> {
    write!(output, "{label}")?;
    output.flush()?;
    let mut line = String::new();
    input
        .read_line(&mut line)
        .with_context(|| format!("failed to read {}", label.trim_end_matches([':', ' '])))?;
    let value = line.trim().to_string();
    if value.is_empty() {
        bail!("no username given");
    }
    Ok(value)
}
