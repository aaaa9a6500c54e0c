use anyhow::Result;
use std::io::{self, Write};
use studio_core::{Role, Turn, TurnStatus};
use studio_orchestrator::{Notice, NoticeLevel, Notifier};

/// Prints notices as status lines on stderr
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("{}", notice_line(&notice));
    }
}

/// Prompt on stdout and read one trimmed line. `None` at end of input.
pub fn read_input(prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

pub fn notice_line(notice: &Notice) -> String {
    let marker = match notice.level {
        NoticeLevel::Info => "ℹ️ ",
        NoticeLevel::Success => "✅",
        NoticeLevel::Error => "❌",
    };
    format!("{} {}", marker, notice.message)
}

pub fn turn_block(turn: &Turn) -> String {
    let speaker = match (turn.role, turn.status) {
        (Role::User, _) => "you",
        (Role::Assistant, TurnStatus::Failed) => "studio (failed)",
        (Role::Assistant, TurnStatus::Pending) => "studio (working)",
        (Role::Assistant, _) => "studio",
    };
    let mut block = format!("[{}] {}\n", turn.created_at.format("%H:%M"), speaker);
    for line in turn.content.lines() {
        block.push_str("  ");
        block.push_str(line);
        block.push('\n');
    }
    block
}

pub fn print_turn(turn: &Turn) {
    println!("{}", turn_block(turn));
}

pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
