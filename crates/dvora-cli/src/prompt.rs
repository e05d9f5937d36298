//! Interactive prompts used when the term or category is not given as a flag
//!
//! A terminal is read through rustyline; piped stdin falls back to plain
//! line reads so scripted runs keep working.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{bail, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::Category;

const BANNER: &str = r#"
 ______          _______ _______ _______
(  __  \|\     /(  ___  |  ____ |  ___  )
| (  \  ) )   ( | (   ) | (    )| (   ) |
| |   ) | |   | | |   | | (____)| (___) |
| |   | ( (   ) ) |   | |     __)  ___  |
| |   ) |\ \_/ /| |   | | (\ (  | (   ) |
| (__/  ) \   / | (___) | ) \ \_| )   ( |
(______/   \_/  (_______)/   \__//     \|
"#;

/// Source of trimmed input lines; `None` once input is closed
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Line editor on an interactive terminal
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for Terminal {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line.trim().to_string())),
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Plain buffered reader, used for piped stdin
pub struct Piped<R> {
    reader: R,
}

impl<R: BufRead> Piped<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for Piped<R> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Picks rustyline for a terminal and plain reads otherwise
pub fn open_input() -> Result<Box<dyn LineSource>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        Ok(Box::new(Terminal::new()?))
    } else {
        Ok(Box::new(Piped::new(stdin.lock())))
    }
}

/// Shows the banner and waits for enter
pub fn welcome(input: &mut dyn LineSource) -> Result<()> {
    println!("{}", BANNER);
    input.read_line("Welcome to Dvora, find your favorite movies and shows. Press enter to continue...")?;
    Ok(())
}

pub fn ask_term(input: &mut dyn LineSource) -> Result<String> {
    match input.read_line("Enter the movie or show to search for: ")? {
        Some(term) if !term.is_empty() => Ok(term),
        _ => bail!("no search term given"),
    }
}

/// Re-prompts until the answer is 1 or 2
pub fn ask_category(input: &mut dyn LineSource) -> Result<Category> {
    loop {
        println!("\nPlease choose an option:");
        println!("1) Use Shows File");
        println!("2) Use Movies File");

        let Some(answer) = input.read_line("Enter your choice (1 or 2): ")? else {
            bail!("input closed before a category was chosen");
        };
        match answer.parse::<u32>() {
            Ok(1) => return Ok(Category::Shows),
            Ok(2) => return Ok(Category::Movies),
            Ok(_) => println!("Invalid choice. Please enter 1 or 2."),
            Err(_) => println!("Invalid input. Please enter a number."),
        }
    }
}

pub fn wait_for_enter(input: &mut dyn LineSource) -> Result<()> {
    input.read_line("\nPress enter to exit...")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_term_trims() {
        let mut input = Piped::new(Cursor::new("  The Matrix \n"));
        assert_eq!(ask_term(&mut input).unwrap(), "The Matrix");
    }

    #[test]
    fn test_ask_term_empty_is_error() {
        let mut input = Piped::new(Cursor::new("\n"));
        assert!(ask_term(&mut input).is_err());
    }

    #[test]
    fn test_ask_category_reprompts() {
        let mut input = Piped::new(Cursor::new("abc\n7\n2\n"));
        assert_eq!(ask_category(&mut input).unwrap(), Category::Movies);
    }

    #[test]
    fn test_ask_category_eof() {
        let mut input = Piped::new(Cursor::new("x\n"));
        assert!(ask_category(&mut input).is_err());
    }

    #[test]
    fn test_welcome_consumes_one_line() {
        let mut input = Piped::new(Cursor::new("\nDune\n"));
        welcome(&mut input).unwrap();
        assert_eq!(ask_term(&mut input).unwrap(), "Dune");
    }

    #[test]
    fn test_welcome_tolerates_closed_input() {
        let mut input = Piped::new(Cursor::new(""));
        assert!(welcome(&mut input).is_ok());
    }
}
