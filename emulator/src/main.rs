mod render;
mod session;
mod store;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use render::Renderer;
use session::{Session, TranscriptLogger};
use store::FileStore;

const USAGE: &str = "Usage: emulator [--settings <file>] [--transcript <file>] [--plain]";

#[derive(Debug, Default)]
struct Options {
    settings: Option<PathBuf>,
    transcript: Option<PathBuf>,
    plain: bool,
}

fn main() -> io::Result<()> {
    let options = parse_options().unwrap_or_else(|err| {
        eprintln!("{err}");
        eprintln!("{USAGE}");
        process::exit(2);
    });

    let store = match options.settings {
        Some(path) => FileStore::open(path)?,
        None => FileStore::ephemeral(),
    };
    let transcript = options
        .transcript
        .as_deref()
        .map(TranscriptLogger::create)
        .transpose()?;
    let mut session = Session::new(store, Renderer::new(options.plain), transcript)?;

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    let mut line = String::new();

    writeln!(
        writer,
        "Countdown timer emulator ready. Type `help` for commands or `exit` to quit."
    )?;
    for frame_line in session.frame() {
        writeln!(writer, "{frame_line}")?;
    }

    loop {
        line.clear();
        write!(writer, "> ")?;
        writer.flush()?;

        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            writeln!(writer)?;
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if should_terminate(trimmed) {
            writeln!(writer, "Session closed.")?;
            break;
        }

        let responses = session.handle_command(trimmed)?;
        for response in responses {
            writeln!(writer, "{response}")?;
        }
        if session.is_closed() {
            break;
        }
    }

    session.close()
}

fn should_terminate(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

fn parse_options() -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        if let Some(value) = arg.strip_prefix("--settings=") {
            options.settings = Some(PathBuf::from(value));
        } else if arg == "--settings" {
            let value = args.next().ok_or("Expected value after --settings")?;
            options.settings = Some(PathBuf::from(value));
        } else if let Some(value) = arg.strip_prefix("--transcript=") {
            options.transcript = Some(PathBuf::from(value));
        } else if arg == "--transcript" {
            let value = args.next().ok_or("Expected value after --transcript")?;
            options.transcript = Some(PathBuf::from(value));
        } else if arg == "--plain" {
            options.plain = true;
        } else {
            return Err(format!("Unknown argument `{arg}`"));
        }
    }
    Ok(options)
}
