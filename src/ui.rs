// 🖥️ Console Menu - thin presentation layer over the registry
//
// Line-oriented: print the menu, read a choice, run it, repeat until "0"
// or end of input. Generic over reader/writer so tests can drive it.

use chrono::{Local, NaiveDate};
use std::io::{self, BufRead, Write};

use crate::error::RegistryError;
use crate::registry::AnimalRegistry;
use crate::species::{SpeciesCatalog, DATE_FORMAT};

// ============================================================================
// MENU
// ============================================================================

pub struct Menu<'a, R, W> {
    registry: &'a mut AnimalRegistry,
    catalog: &'a SpeciesCatalog,
    input: R,
    output: W,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(
        registry: &'a mut AnimalRegistry,
        catalog: &'a SpeciesCatalog,
        input: R,
        output: W,
    ) -> Self {
        Menu {
            registry,
            catalog,
            input,
            output,
            today: local_today,
        }
    }

    /// Override the clock used for the birth date fallback
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Run until the user picks "0" or input ends.
    pub fn run(mut self) -> io::Result<()> {
        if let Some(warning) = self.registry.startup_warning() {
            writeln!(
                self.output,
                "Could not load saved data ({}). Starting with an empty registry.",
                warning
            )?;
        }

        loop {
            self.print_menu()?;
            let Some(choice) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };

            match choice.as_str() {
                "1" => self.add_animal()?,
                "2" => self.list_commands()?,
                "3" => self.teach_command()?,
                "4" => self.list_by_birth_date()?,
                "5" => writeln!(self.output, "Total animals: {}", self.registry.count())?,
                "0" => {
                    writeln!(self.output, "Exiting...")?;
                    break;
                }
                _ => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }

        self.output.flush()
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "1. Add a new animal")?;
        writeln!(self.output, "2. List commands of an animal")?;
        writeln!(self.output, "3. Teach an animal a new command")?;
        writeln!(self.output, "4. List animals by birth date")?;
        writeln!(self.output, "5. Show total number of animals")?;
        writeln!(self.output, "0. Exit")?;
        write!(self.output, "Enter your choice: ")?;
        self.output.flush()
    }

    /// Next line without the trailing newline, `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    // ========================================================================
    // ACTIONS
    // ========================================================================

    fn add_animal(&mut self) -> io::Result<()> {
        let name = self.prompt("Enter the animal's name: ")?;
        let species_prompt = format!(
            "Enter the animal's species ({}): ",
            self.catalog.names().join("/")
        );
        let species = self.prompt(&species_prompt)?;
        let birth_date = self.prompt("Enter the birth date (YYYY-MM-DD): ")?;

        let today = (self.today)();
        match self
            .registry
            .add_new(self.catalog, &name, &species, &birth_date, today)
        {
            Ok(added) => {
                let date_fallback = added.date_fallback;
                let persist_error = added.persist_error.map(|e| e.to_string());
                if date_fallback {
                    writeln!(
                        self.output,
                        "Invalid date format. Using today's date ({}) as the birth date.",
                        today.format(DATE_FORMAT)
                    )?;
                }
                if let Some(e) = persist_error {
                    writeln!(self.output, "Warning: the animal was not saved to disk: {}", e)?;
                }
                writeln!(self.output, "Animal added successfully.")
            }
            Err(RegistryError::Creation(e)) => writeln!(self.output, "{}.", e),
            Err(e) => writeln!(self.output, "Error: {}", e),
        }
    }

    fn list_commands(&mut self) -> io::Result<()> {
        let name = self.prompt("Enter the animal's name: ")?;
        match self.registry.list_commands(&name) {
            Ok(commands) => {
                let owner = self
                    .registry
                    .find_by_name(&name)
                    .map(|a| a.name())
                    .unwrap_or(name.as_str());
                writeln!(self.output, "Commands for {}:", owner)?;
                for command in commands {
                    writeln!(self.output, "{}", command)?;
                }
                Ok(())
            }
            Err(_) => writeln!(self.output, "Animal not found."),
        }
    }

    fn teach_command(&mut self) -> io::Result<()> {
        let name = self.prompt("Enter the animal's name: ")?;
        if self.registry.find_by_name(&name).is_none() {
            return writeln!(self.output, "Animal not found.");
        }

        let command = self.prompt("Enter the new command: ")?;
        match self.registry.teach_command(&name, &command) {
            Ok(()) => {}
            Err(RegistryError::Store(e)) => {
                writeln!(self.output, "Warning: the command was not saved to disk: {}", e)?
            }
            Err(_) => return writeln!(self.output, "Animal not found."),
        }

        let owner = self
            .registry
            .find_by_name(&name)
            .map(|a| a.name().to_string())
            .unwrap_or(name);
        writeln!(self.output, "Command '{}' taught to {}", command, owner)
    }

    fn list_by_birth_date(&mut self) -> io::Result<()> {
        writeln!(self.output, "Animals sorted by birth date:")?;
        for animal in self.registry.sorted_by_birth_date() {
            writeln!(
                self.output,
                "Name: {}, Species: {}, Birth date: {}",
                animal.name(),
                animal.species(),
                animal.birth_date().format(DATE_FORMAT)
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use crate::store::JsonStore;
    use std::io::Cursor;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    /// Run a session against a fresh store and return (output, registry).
    fn run_session(script: &str) -> (String, AnimalRegistry, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = AnimalRegistry::open(JsonStore::new(dir.path().join("animals.json")));
        let catalog = SpeciesCatalog::from_config(&RegistryConfig::default().species);
        let mut output = Vec::new();

        Menu::new(
            &mut registry,
            &catalog,
            Cursor::new(script.as_bytes()),
            &mut output,
        )
        .with_today(fixed_today)
        .run()
        .unwrap();

        (String::from_utf8(output).unwrap(), registry, dir)
    }

    #[test]
    fn test_add_and_list_sorted() {
        let (out, registry, _dir) = run_session(
            "1\nRex\ndog\n2020-01-01\n1\nMilo\ncat\n2019-05-05\n4\n5\n0\n",
        );

        assert_eq!(registry.count(), 2);
        let milo = out.find("Name: Milo, Species: cat, Birth date: 2019-05-05").unwrap();
        let rex = out.find("Name: Rex, Species: dog, Birth date: 2020-01-01").unwrap();
        assert!(milo < rex);
        assert!(out.contains("Total animals: 2"));
        assert!(out.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_teach_then_list_commands() {
        let (out, registry, _dir) = run_session(
            "1\nRex\ndog\n2020-01-01\n3\nrex\nsit\n3\nREX\nstay\n2\nRex\n0\n",
        );

        assert!(out.contains("Command 'sit' taught to Rex"));
        assert!(out.contains("Commands for Rex:\nsit\nstay\n"));
        assert_eq!(registry.list_commands("Rex").unwrap(), ["sit", "stay"]);
    }

    #[test]
    fn test_unknown_species_and_missing_animal() {
        let (out, registry, _dir) =
            run_session("1\nPolly\nparrot\n2020-01-01\n2\nPolly\n3\nPolly\n0\n");

        assert!(out.contains("Unknown species: parrot."));
        assert_eq!(out.matches("Animal not found.").count(), 2);
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_bad_date_uses_today() {
        let (out, registry, _dir) = run_session("1\nHammy\nhamster\n15.06.2024x\n0\n");

        assert!(out.contains("Using today's date (2024-06-15)"));
        assert_eq!(
            registry.find_by_name("hammy").unwrap().birth_date(),
            fixed_today()
        );
    }

    #[test]
    fn test_invalid_choice_and_eof() {
        let (out, _registry, _dir) = run_session("9\n");

        assert!(out.contains("Invalid choice. Please try again."));
        assert!(!out.contains("Exiting..."));
    }

    #[test]
    fn test_startup_warning_shown() {
        let (out, _registry, _dir) = run_session("0\n");
        assert!(out.starts_with("Could not load saved data"));
    }
}
