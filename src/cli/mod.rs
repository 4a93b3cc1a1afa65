use std::fmt::Display;
use std::io::Write;

use crate::{
    error::{AppResult, EmptyResult},
    library::Library,
    models::{
        book::{bounded, MAX_GENRE_LEN},
        PopularityMode,
    },
};

pub mod input;
pub mod report;

pub use input::{LineSource, ReaderSource};

const MENU: &str = "\n--- Book Recommendation System ---
1. Display All Books
2. Add User
3. Display Users
4. Display Most Popular Books
5. Display Most Underrated Books
6. Recommend Books to a User
7. Exit";

/// Menu entries, numbered as shown to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ListBooks,
    AddUser,
    ListUsers,
    ListPopular,
    ListUnderrated,
    Recommend,
    Exit,
}

impl Command {
    pub fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(Command::ListBooks),
            2 => Some(Command::AddUser),
            3 => Some(Command::ListUsers),
            4 => Some(Command::ListPopular),
            5 => Some(Command::ListUnderrated),
            6 => Some(Command::Recommend),
            7 => Some(Command::Exit),
            _ => None,
        }
    }
}

/// Answer to a numeric prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reply {
    Number(i64),
    Invalid,
    Closed,
}

/// Prompt/print pair over an input source and an output sink
struct Console<S, W> {
    input: S,
    out: W,
}

impl<S: LineSource, W: Write> Console<S, W> {
    fn say(&mut self, message: impl Display) -> AppResult<()> {
        writeln!(self.out, "{}", message)?;
        Ok(())
    }

    /// Prints `prompt` and reads the answer with leading spaces removed
    fn ask(&mut self, prompt: &str) -> AppResult<Option<String>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        let line = self.input.next_line()?;
        Ok(line.map(|l| l.trim_start_matches(' ').to_string()))
    }

    fn ask_number(&mut self, prompt: &str) -> AppResult<Reply> {
        Ok(match self.ask(prompt)? {
            None => Reply::Closed,
            Some(line) => line
                .trim()
                .parse::<i64>()
                .map_or(Reply::Invalid, Reply::Number),
        })
    }

    /// Yes/no question answered with a number; anything non-zero is yes
    fn ask_yes_no(&mut self, prompt: &str, on_invalid: &str) -> AppResult<bool> {
        match self.ask_number(prompt)? {
            Reply::Number(n) => Ok(n != 0),
            Reply::Invalid => {
                self.say(on_invalid)?;
                Ok(false)
            }
            Reply::Closed => Ok(false),
        }
    }
}

/// Interactive menu loop over a [`Library`].
///
/// Runs one command at a time until the operator exits or input ends.
pub struct Session<'a, S, W> {
    library: &'a mut Library,
    console: Console<S, W>,
}

impl<'a, S: LineSource, W: Write> Session<'a, S, W> {
    pub fn new(library: &'a mut Library, input: S, out: W) -> Self {
        Self {
            library,
            console: Console { input, out },
        }
    }

    /// Runs the menu loop. Only I/O failures end it with an error.
    pub fn run(&mut self) -> AppResult<()> {
        loop {
            self.console.say(MENU)?;
            let choice = match self.console.ask_number("Enter your choice: ")? {
                Reply::Number(n) => n,
                Reply::Invalid => {
                    self.console.say("Invalid input! Please enter a number.")?;
                    continue;
                }
                Reply::Closed => return self.exit(),
            };

            match Command::from_choice(choice) {
                Some(Command::Exit) => return self.exit(),
                Some(command) => {
                    tracing::debug!(?command, "Running command");
                    self.execute(command)?;
                }
                None => self.console.say("Invalid choice! Please try again.")?,
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> AppResult<()> {
        match command {
            Command::ListBooks => self.list_books(),
            Command::AddUser => self.add_user(),
            Command::ListUsers => self.list_users(),
            Command::ListPopular => self.list_by_mode(PopularityMode::Popular),
            Command::ListUnderrated => self.list_by_mode(PopularityMode::Underrated),
            Command::Recommend => self.recommend(),
            Command::Exit => self.exit(),
        }
    }

    fn list_books(&mut self) -> AppResult<()> {
        if self.library.catalogue.is_empty() {
            return self.console.say("No books to display.");
        }
        report::book_table(
            &mut self.console.out,
            "All Books",
            self.library.catalogue.all(),
        )?;
        Ok(())
    }

    fn add_user(&mut self) -> AppResult<()> {
        if self.library.users.is_full() {
            return self.console.say("User limit reached! Cannot add more users.");
        }

        let id = match self.console.ask_number("Enter User ID (integer): ")? {
            Reply::Number(id) => id,
            Reply::Invalid => return self.console.say("Invalid input! User not added."),
            Reply::Closed => return Ok(()),
        };
        if let Err(e) = self.library.check_new_user(id) {
            return self.console.say(e);
        }

        let Some(name) = self.console.ask("Enter User Name: ")? else {
            return Ok(());
        };

        let mut wants_more = self.console.ask_yes_no(
            &format!(
                "Do you want to add preferred books for {}? (1: Yes, 0: No): ",
                name
            ),
            "Invalid input! Skipping preferences.",
        )?;

        let console = &mut self.console;
        let mut registration = match self.library.begin_registration(id, &name) {
            Ok(registration) => registration,
            Err(e) => return console.say(e),
        };

        while wants_more {
            if let Err(e) = registration.ensure_room() {
                console.say(e)?;
                break;
            }
            let book_id = match console.ask_number("Enter Preferred Book ID: ")? {
                Reply::Number(book_id) => book_id,
                Reply::Invalid => {
                    console.say("Invalid input! Please enter a valid Book ID.")?;
                    continue;
                }
                Reply::Closed => break,
            };

            match registration.add_preference(book_id) {
                Ok(book) => {
                    let message = format!("Added \"{}\" to {}'s preferences.", book.title, name);
                    console.say(message)?;
                }
                Err(e) => {
                    console.say(e)?;
                    continue;
                }
            }

            wants_more = console.ask_yes_no(
                "Do you want to add another preferred book? (1: Yes, 0: No): ",
                "Invalid input! Stopping preference addition.",
            )?;
        }

        registration.commit();
        console.say("User added successfully!")
    }

    fn list_users(&mut self) -> AppResult<()> {
        if self.library.users.is_empty() {
            return self.console.say("\nNo users to display.");
        }
        report::user_table(
            &mut self.console.out,
            self.library.users.iter(),
            &self.library.catalogue,
        )?;
        Ok(())
    }

    fn list_by_mode(&mut self, mode: PopularityMode) -> AppResult<()> {
        let catalogue = &self.library.catalogue;
        if catalogue.is_empty() {
            return self.console.say("No books available.");
        }

        let (title, empty_message) = match mode {
            PopularityMode::Popular => (
                "Most Popular Books",
                format!(
                    "No popular books found with popularity greater than {}.",
                    mode.threshold()
                ),
            ),
            PopularityMode::Underrated => (
                "Most Underrated Books",
                format!(
                    "No underrated books found with popularity less than or equal to {}.",
                    mode.threshold()
                ),
            ),
        };

        let out = &mut self.console.out;
        writeln!(out, "\n--- {} ---", title)?;
        report::book_header(out)?;
        let mut found = false;
        for book in catalogue.in_mode(mode) {
            report::book_row(out, book)?;
            found = true;
        }
        if !found {
            writeln!(out, "{}", empty_message)?;
        }
        report::book_footer(out)?;
        Ok(())
    }

    fn recommend(&mut self) -> AppResult<()> {
        let user_id = match self
            .console
            .ask_number("Enter User ID for recommendations: ")?
        {
            Reply::Number(id) => id,
            Reply::Invalid => return self.console.say("Invalid input! Please enter a number."),
            Reply::Closed => return Ok(()),
        };

        let (name, has_preferences) = match self.library.find_user(user_id) {
            Ok(user) => (user.name.clone(), !user.preferences().is_empty()),
            Err(e) => return self.console.say(e),
        };
        if !has_preferences {
            return self.console.say(EmptyResult::NoPreferences);
        }

        let Some(genre) = self
            .console
            .ask("Enter the genre you are interested in for recommendations: ")?
        else {
            return Ok(());
        };
        let genre = bounded(genre, MAX_GENRE_LEN);
        if !self.library.catalogue.has_genre(&genre) {
            return self.console.say(EmptyResult::GenreNotFound(genre));
        }

        let mode = match self.console.ask_number(
            "Do you want (1) Popular or (2) Underrated book recommendations? Enter 1 or 2: ",
        )? {
            Reply::Number(1) => PopularityMode::Popular,
            Reply::Number(2) => PopularityMode::Underrated,
            Reply::Number(_) => {
                self.console
                    .say("Invalid choice! Proceeding with popular recommendations by default.")?;
                PopularityMode::Popular
            }
            Reply::Invalid => {
                self.console
                    .say("Invalid input! Proceeding with popular recommendations by default.")?;
                PopularityMode::Popular
            }
            Reply::Closed => return Ok(()),
        };

        match self.library.recommend(user_id, &genre, mode) {
            Ok(picks) => {
                let catalogue = &self.library.catalogue;
                report::book_table(
                    &mut self.console.out,
                    &format!("Recommendations for {}", name),
                    picks.iter().filter_map(|&i| catalogue.get(i)),
                )?;
                Ok(())
            }
            Err(e) => self.console.say(e),
        }
    }

    fn exit(&mut self) -> AppResult<()> {
        self.console.say("Exiting...")?;
        self.library.shutdown();
        Ok(())
    }
}
