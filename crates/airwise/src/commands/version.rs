use airwise_chat::{DEFAULT_MODEL, GROQ_API_BASE};

pub fn run() -> anyhow::Result<()> {
    println!("{}", version_text());
    Ok(())
}

fn version_text() -> String {
    format!(
        "airwise {}\ndefault model: {} ({})",
        env!("CARGO_PKG_VERSION"),
        DEFAULT_MODEL,
        GROQ_API_BASE
    )
}
