//! Terminal front end for the onboarding wizard.

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roadmap_backend::wizard::{
    Author, CUSTOM_DURATION, HttpRoadmapApi, Message, PromptKind, Wizard, today,
};

#[derive(Parser, Debug)]
#[command(name = "roadmap-wizard")]
#[command(about = "Chat-style onboarding that generates a learning roadmap", long_about = None)]
struct Cli {
    /// Base URL of the roadmap server
    #[arg(long, env = "ROADMAP_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    server: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let api = HttpRoadmapApi::new(cli.server)?;

    let mut wizard = Wizard::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut rendered = 0;

    loop {
        rendered = render(&wizard, rendered);

        let Some(pending) = wizard.pending_prompt() else {
            break;
        };
        let id = pending.id;
        let Some(prompt) = pending.prompt.clone() else {
            break;
        };

        for (index, option) in prompt.options.iter().enumerate() {
            println!("  {}) {}", index + 1, option);
        }

        let Some(choice) = read_choice(&mut lines, &prompt.options).await? else {
            // stdin closed
            return Ok(());
        };

        match prompt.kind {
            PromptKind::Technology => {
                wizard.select_technology(id, &choice);
            }
            PromptKind::Duration => {
                let duration = if choice == CUSTOM_DURATION {
                    match read_line(&mut lines, "How long? (e.g. 10 days) ").await? {
                        Some(text) => text,
                        None => return Ok(()),
                    }
                } else {
                    choice
                };

                if let Some(request) = wizard.select_duration(id, &duration, today()) {
                    rendered = render(&wizard, rendered);
                    wizard.submit(&api, &request).await;
                }
            }
        }
    }

    Ok(())
}

/// Print messages added since the last call; a message still loading is
/// printed again once it resolves.
fn render(wizard: &Wizard, from: usize) -> usize {
    let messages = wizard.messages();
    let mut next = from;
    for message in &messages[from.min(messages.len())..] {
        print_message(message);
        if message.loading {
            break;
        }
        next += 1;
    }
    next
}

fn print_message(message: &Message) {
    match message.author {
        Author::Bot => println!("\nResponse: {}", message.content),
        Author::User => println!("\nYou: {}", message.content),
    }
}

async fn read_choice(
    lines: &mut Lines<BufReader<Stdin>>,
    options: &[String],
) -> Result<Option<String>, std::io::Error> {
    loop {
        let Some(input) = read_line(lines, "> ").await? else {
            return Ok(None);
        };

        if let Ok(index) = input.parse::<usize>() {
            if let Some(option) = index.checked_sub(1).and_then(|i| options.get(i)) {
                return Ok(Some(option.clone()));
            }
        }
        if let Some(option) = options.iter().find(|o| o.eq_ignore_ascii_case(&input)) {
            return Ok(Some(option.clone()));
        }

        eprintln!("Pick a number between 1 and {}", options.len());
    }
}

async fn read_line(
    lines: &mut Lines<BufReader<Stdin>>,
    prompt: &str,
) -> Result<Option<String>, std::io::Error> {
    loop {
        eprint!("{}", prompt);
        match lines.next_line().await? {
            Some(line) => {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    return Ok(Some(line));
                }
            }
            None => return Ok(None),
        }
    }
}
