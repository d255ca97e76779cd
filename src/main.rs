mod prompt {
    use std::io::{self, BufRead, Write};
    use std::time::Instant;

    use degrees::{EntityStore, PersonId};

    pub enum Answer {
        Person(PersonId),
        NotFound,
        Eof,
    }

    fn read_line(input: &mut impl BufRead, output: &mut impl Write, label: &str) -> io::Result<Option<String>> {
        write!(output, "{}", label)?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None); // EOF
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks for a name and resolves it, asking again for an id when
    /// several people share the name.
    pub fn ask_person(
        store: &EntityStore,
        label: &str,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> io::Result<Answer> {
        let Some(name) = read_line(input, output, label)? else {
            return Ok(Answer::Eof);
        };
        let candidates = store.resolve_name(&name);
        match candidates.as_slice() {
            [] => Ok(Answer::NotFound),
            [person] => Ok(Answer::Person(person.id.clone())),
            _ => {
                writeln!(output, "Which '{}'?", name)?;
                for person in &candidates {
                    let birth = person.birth.map(|year| year.to_string()).unwrap_or_default();
                    writeln!(output, "ID: {}, Name: {}, Birth: {}", person.id, person.name, birth)?;
                }
                let Some(chosen) = read_line(input, output, "Intended Person ID: ")? else {
                    return Ok(Answer::Eof);
                };
                Ok(candidates
                    .iter()
                    .find(|person| person.id.as_str() == chosen)
                    .map(|person| Answer::Person(person.id.clone()))
                    .unwrap_or(Answer::NotFound))
            }
        }
    }

    /// One "<A> and <B> starred in <title>" line per step.
    pub fn render_path(store: &EntityStore, source: &PersonId, path: &degrees::Path) -> degrees::Result<Vec<String>> {
        let mut lines = Vec::with_capacity(path.len());
        let mut previous = store.person(source)?;
        for (i, step) in path.iter().enumerate() {
            let person = store.person(&step.person)?;
            let movie = store.movie(&step.movie)?;
            lines.push(format!("{}: {} and {} starred in {}", i + 1, previous.name, person.name, movie.title));
            previous = person;
        }
        Ok(lines)
    }

    /// Prompt loop; returns when input runs out.
    pub fn run(store: &EntityStore, input: &mut impl BufRead, output: &mut impl Write) -> anyhow::Result<()> {
        loop {
            let source = match ask_person(store, "1) Name: ", input, output)? {
                Answer::Person(id) => id,
                Answer::NotFound => {
                    writeln!(output, "Person not found.")?;
                    continue;
                }
                Answer::Eof => return Ok(()),
            };
            let target = match ask_person(store, "2) Name: ", input, output)? {
                Answer::Person(id) if id != source => id,
                Answer::Person(_) | Answer::NotFound => {
                    writeln!(output, "Person not found.")?;
                    continue;
                }
                Answer::Eof => return Ok(()),
            };

            let started = Instant::now();
            let path = degrees::find_path(store, &source, &target)?;
            tracing::info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                connected = path.is_some(),
                "search finished"
            );

            match path {
                None => writeln!(output, "Not connected.")?,
                Some(path) => {
                    writeln!(output, "{} degrees of separation.", path.len())?;
                    for line in render_path(store, &source, &path)? {
                        writeln!(output, "{}", line)?;
                    }
                }
            }
            writeln!(output)?;
        }
    }
}

use std::io;
use std::path::Path;

use anyhow::Context;

const DEFAULT_DIRECTORY: &str = "small";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [directory]", args[0]);
        std::process::exit(1);
    }
    let directory = args.get(1).map(String::as_str).unwrap_or(DEFAULT_DIRECTORY);

    println!("Loading data...");
    let store = degrees::data_loading::load_directory(Path::new(directory))
        .with_context(|| format!("failed to load data from '{}'", directory))?;
    println!("Data loaded.");

    let stdin = io::stdin();
    let stdout = io::stdout();
    prompt::run(&store, &mut stdin.lock(), &mut stdout.lock())
}
