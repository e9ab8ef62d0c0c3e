// Interactive rollback menu
//
// Shown when bigctl runs without a subcommand. Reads one choice per line
// and keeps asking until it gets 1, 2, or 0. End of input counts as 0.

use std::io::{self, BufRead, Write};

use bigctl_api::BigIpClient;
use bigctl_core::{AutoApprove, MigrationMode};

use crate::cli::GlobalOpts;
use crate::commands::migrate;
use crate::config::Session;
use crate::error::CliError;

const MENU: &str = "\
[ Rollback servers from BigIP pools ]
[ 1 ] Add members to pools
[ 2 ] Remove members from pools
[ 0 ] Exit
>> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Run(MigrationMode),
    Exit,
}

/// Print the menu and read until a valid choice arrives.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<MenuChoice> {
    let mut line = String::new();
    loop {
        write!(out, "{MENU}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(MenuChoice::Exit);
        }

        match line.trim() {
            "1" => return Ok(MenuChoice::Run(MigrationMode::Add)),
            "2" => return Ok(MenuChoice::Run(MigrationMode::Remove)),
            "0" => return Ok(MenuChoice::Exit),
            other => writeln!(out, "Invalid option '{other}'\n")?,
        }
    }
}

/// Ask once, run the chosen batch, and return. Removals are not confirmed
/// per member here; picking option 2 is the confirmation.
pub async fn run(
    client: &BigIpClient,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let choice = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut out = io::stdout();
        prompt(&mut input, &mut out)?
    };

    match choice {
        MenuChoice::Exit => Ok(()),
        MenuChoice::Run(mode) => {
            migrate::run_batch(client, session, mode, &mut AutoApprove, global).await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn choose(input: &str) -> (MenuChoice, String) {
        let mut reader = input.as_bytes();
        let mut out = Vec::new();
        let choice = prompt(&mut reader, &mut out).unwrap_or_else(|e| panic!("{e}"));
        (choice, String::from_utf8(out).unwrap_or_default())
    }

    #[test]
    fn valid_choices() {
        assert_eq!(choose("1\n").0, MenuChoice::Run(MigrationMode::Add));
        assert_eq!(choose("2\n").0, MenuChoice::Run(MigrationMode::Remove));
        assert_eq!(choose("0\n").0, MenuChoice::Exit);
        assert_eq!(choose("  2  \r\n").0, MenuChoice::Run(MigrationMode::Remove));
    }

    #[test]
    fn invalid_input_reprompts() {
        let (choice, out) = choose("9\nadd\n\n1\n");
        assert_eq!(choice, MenuChoice::Run(MigrationMode::Add));
        assert_eq!(out.matches("[ 0 ] Exit").count(), 4);
        assert!(out.contains("Invalid option '9'"));
        assert!(out.contains("Invalid option 'add'"));
    }

    #[test]
    fn end_of_input_exits() {
        let (choice, out) = choose("7\n");
        assert_eq!(choice, MenuChoice::Exit);
        assert_eq!(out.matches(">> ").count(), 2);
    }
}
