use crate::cli::{DataArgs, LlmArgs};
use airwise_chat::{ChatClient, ChatSession};
use airwise_core::Config;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub fn run(data: &DataArgs, llm: &LlmArgs, transcript: Option<PathBuf>) -> anyhow::Result<()> {
    let client = super::groq_client(llm)?;
    let dataset = super::load_dataset(data)?;

    if let Some(alert) = dataset.worst_city_alert() {
        println!("{}\n", alert.message());
    }

    let mut session = ChatSession::new(client, dataset.grounding(&Config::new()));
    if let Some(path) = transcript {
        session = session.with_transcript(path);
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    repl(&mut session, stdin.lock(), stdout.lock())
}

pub fn run_ask(
    question: &str,
    data: &DataArgs,
    llm: &LlmArgs,
    transcript: Option<PathBuf>,
) -> anyhow::Result<()> {
    let client = super::groq_client(llm)?;
    let dataset = super::load_dataset(data)?;

    let mut session = ChatSession::new(client, dataset.grounding(&Config::new()));
    if let Some(path) = transcript {
        session = session.with_transcript(path);
    }
    println!("{}", session.submit(question));
    Ok(())
}

/// Greeting, then one turn per line until exit, quit or EOF
pub fn repl<C: ChatClient>(
    session: &mut ChatSession<C>,
    input: impl BufRead,
    mut output: impl Write,
) -> anyhow::Result<()> {
    if let Some(greeting) = session.history().first() {
        writeln!(output, "{}", greeting.content)?;
    }

    let mut lines = input.lines();
    loop {
        write!(output, "\n> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("exit") || text.eq_ignore_ascii_case("quit") {
            break;
        }

        let reply = session.submit(text);
        writeln!(output, "{}", reply)?;
    }

    writeln!(output)?;
    Ok(())
}
