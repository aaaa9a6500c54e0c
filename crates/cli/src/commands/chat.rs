use super::context::{Context, Overrides};
use super::render::{TerminalNotifier, format_bytes, print_turn, read_input};
use anyhow::Result;
use std::sync::Arc;
use studio_core::{Transcript, TurnId, TurnStatus};
use studio_orchestrator::{ActionError, ChatOrchestrator};

const GREETING: &str = "👋 Hi! I'm your AI website builder. Just tell me what kind of website you want to create and I'll build it for you!";

pub const EXAMPLE_PROMPTS: [&str; 4] = [
    "Create a tech blog about artificial intelligence and machine learning",
    "Build a portfolio website for a graphic designer",
    "Make a business website for a local restaurant with menu",
    "Create a documentation site for a software project",
];

/// One line typed at the chat prompt
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Empty,
    Quit,
    Help,
    Examples,
    Example(usize),
    Download(Option<TurnId>),
    Preview,
    Message(String),
}

fn parse_input(line: &str) -> std::result::Result<Input, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Empty);
    }
    let Some(command) = line.strip_prefix('/') else {
        return Ok(Input::Message(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();
    match (name, arg) {
        ("quit" | "exit" | "q", None) => Ok(Input::Quit),
        ("help" | "h", None) => Ok(Input::Help),
        ("examples", None) => Ok(Input::Examples),
        ("examples", Some(n)) => match n.parse::<usize>() {
            Ok(n) if (1..=EXAMPLE_PROMPTS.len()).contains(&n) => Ok(Input::Example(n - 1)),
            _ => Err(format!("Pick an example between 1 and {}", EXAMPLE_PROMPTS.len())),
        },
        ("download", None) => Ok(Input::Download(None)),
        ("download", Some(n)) => n
            .parse::<u64>()
            .map(|id| Input::Download(Some(TurnId(id))))
            .map_err(|_| format!("Not a turn number: {}", n)),
        ("preview", None) => Ok(Input::Preview),
        _ => Err(format!("Unknown command: /{}. Type /help for commands", command)),
    }
}

fn print_help() {
    println!("Describe the website you want and press Enter.");
    println!("   /examples        list example requests");
    println!("   /examples <n>    send example n");
    println!("   /download [turn] download the latest site (or the one built on [turn])");
    println!("   /preview         show the latest preview link");
    println!("   /quit            leave");
    println!();
}

fn print_examples() {
    println!("💡 Example requests:");
    for (i, example) in EXAMPLE_PROMPTS.iter().enumerate() {
        println!("   {}. \"{}\"", i + 1, example);
    }
    println!();
}

/// Run the conversational builder, or send one description when `message`
/// is given.
pub async fn run(overrides: &Overrides, message: Option<String>) -> Result<()> {
    let ctx = Context::load(overrides)?;
    let chat = ChatOrchestrator::new(
        ctx.backend.clone(),
        ctx.artifacts,
        Arc::new(TerminalNotifier),
        Transcript::with_greeting(GREETING),
    );

    if let Some(message) = message {
        let turn = chat.submit_text(message).await?;
        print_turn(&turn);
        if turn.status == TurnStatus::Failed {
            anyhow::bail!("Website was not created");
        }
        return Ok(());
    }

    println!("🏗️  Site Studio ({})", ctx.config.backend.api_base);
    println!("   Downloads go to: {}", chat.artifacts().download_dir().display());
    println!();
    for turn in chat.transcript().turns() {
        print_turn(turn);
    }
    print_help();

    loop {
        let Some(line) = read_input("> ")? else {
            break;
        };
        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(message) => {
                println!("{}\n", message);
                continue;
            }
        };

        match input {
            Input::Empty => {}
            Input::Quit => break,
            Input::Help => print_help(),
            Input::Examples => print_examples(),
            Input::Example(index) => {
                let example = EXAMPLE_PROMPTS[index];
                println!("> {}", example);
                send(&chat, example.to_string()).await?;
            }
            Input::Message(text) => send(&chat, text).await?,
            Input::Download(turn) => {
                let result = match turn {
                    Some(id) => chat.download_turn(id).await,
                    None => chat.download_latest().await,
                };
                match result {
                    Ok(saved) => println!("   📦 {} ({})\n", saved.path.display(), format_bytes(saved.bytes)),
                    Err(ActionError::Download(_)) => println!(),
                    Err(err) => println!("{}\n", err),
                }
            }
            Input::Preview => match chat.transcript().latest_site() {
                Some(site) => println!("🔗 {}\n", chat.artifacts().preview_url(&site.site_id)),
                None => println!("No website yet. Describe one first.\n"),
            },
        }
    }

    Ok(())
}

async fn send(chat: &ChatOrchestrator, text: String) -> Result<()> {
    match chat.submit_text(text).await {
        Ok(turn) => print_turn(&turn),
        Err(err) if err.is_local() => println!("{}\n", err),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_message() {
        assert_eq!(
            parse_input("  a blog about tea  ").unwrap(),
            Input::Message("a blog about tea".to_string())
        );
        assert_eq!(parse_input("   ").unwrap(), Input::Empty);
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_input("/quit").unwrap(), Input::Quit);
        assert_eq!(parse_input("/examples").unwrap(), Input::Examples);
        assert_eq!(parse_input("/examples 2").unwrap(), Input::Example(1));
        assert_eq!(parse_input("/download").unwrap(), Input::Download(None));
        assert_eq!(
            parse_input("/download 4").unwrap(),
            Input::Download(Some(TurnId(4)))
        );
        assert_eq!(parse_input("/preview").unwrap(), Input::Preview);
    }

    #[test]
    fn test_bad_commands() {
        assert!(parse_input("/examples 0").is_err());
        assert!(parse_input("/examples 9").is_err());
        assert!(parse_input("/download latest").is_err());
        assert!(parse_input("/deploy").is_err());
    }
}
