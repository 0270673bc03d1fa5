// src/shell.rs

//! Interactive numbered menu.
//!
//! Reads choices line by line from any `BufRead` and writes prompts and
//! results to any `Write`.

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::pipeline::{filter_by_requirement, run_search, top_by_salary};
use crate::services::VacancyFetcher;
use crate::storage::VacancyStorage;
use crate::utils::http::HttpTransport;

const MENU: &str = "\n1. Enter a search query\n\
                    2. Show top N vacancies by salary\n\
                    3. Find vacancies by keyword in requirements\n\
                    4. Exit";

/// Menu session over a fetcher and a store.
pub struct Shell<'a, T> {
    fetcher: &'a VacancyFetcher<T>,
    storage: &'a dyn VacancyStorage,
    pages: u32,
}

impl<'a, T: HttpTransport> Shell<'a, T> {
    /// `pages` is how many result pages a menu search fetches.
    pub fn new(
        fetcher: &'a VacancyFetcher<T>,
        storage: &'a dyn VacancyStorage,
        pages: u32,
    ) -> Self {
        Self {
            fetcher,
            storage,
            pages,
        }
    }

    /// Run until the user exits or input ends.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<()> {
        loop {
            writeln!(output, "{MENU}")?;
            let Some(choice) = prompt(&mut input, &mut output, "Choose an action: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => {
                    let Some(query) = prompt(&mut input, &mut output, "Enter a search query: ")?
                    else {
                        break;
                    };
                    let summary = run_search(self.fetcher, self.storage, &query, self.pages);
                    writeln!(
                        output,
                        "Found {} vacancies, {} added.",
                        summary.mapped, summary.added
                    )?;
                }
                "2" => {
                    let Some(raw) =
                        prompt(&mut input, &mut output, "How many vacancies to show?: ")?
                    else {
                        break;
                    };
                    let n = match raw.parse::<usize>() {
                        Ok(n) if n > 0 => n,
                        _ => {
                            writeln!(output, "Please enter a valid positive number")?;
                            continue;
                        }
                    };
                    for vacancy in top_by_salary(self.storage.load(), n) {
                        writeln!(output, "\n{vacancy}")?;
                    }
                }
                "3" => {
                    let Some(keyword) = prompt(&mut input, &mut output, "Enter a keyword: ")?
                    else {
                        break;
                    };
                    let found = filter_by_requirement(self.storage.load(), &keyword);
                    if found.is_empty() {
                        writeln!(output, "No vacancies found.")?;
                    }
                    for vacancy in found {
                        writeln!(output, "\n{vacancy}")?;
                    }
                }
                "4" => break,
                _ => writeln!(output, "Invalid choice, try again.")?,
            }
        }
        Ok(())
    }
}

/// Print `message` and read one trimmed line; `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
