//! trace — line-oriented REPL for the TRACE talent-matching assistant.
//!
//! The terminal stand-in for the floating chat widget and the dashboard's
//! "find talent near me" flow. All protocol logic lives in the library; this
//! binary only reads lines, drives the session types, and renders turns and
//! candidate cards as text.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use trace_talent::api::{config, ApiClient, ApiError};
use trace_talent::session::{
    normalize_candidate, CandidateSummary, ChatSession, NearbyOutcome, NearbySearch, Role,
    SessionError, Turn,
};

#[tokio::main]
async fn main() -> Result<()> {
    trace_talent::init_tracing();

    let cwd = std::env::current_dir()?;
    let config = config::load_or_default(&cwd)?;
    let client = ApiClient::from_config(&config)?;

    let mut session = ChatSession::new();
    let mut nearby = NearbySearch::new();

    println!("TRACE talent assistant — backend at {}", client.base_url());
    println!("Commands: /nearby <location>[; skill]   /search <query>   /quit");
    if let Some(greeting) = session.transcript().first() {
        print_turn(greeting);
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if line == "/quit" || line == "/exit" {
            break;
        }

        if let Some(rest) = line.strip_prefix("/nearby") {
            run_nearby(&mut nearby, &client, rest).await;
        } else if let Some(query) = line.strip_prefix("/search") {
            run_search(&client, query.trim()).await;
        } else {
            run_chat(&mut session, &client, line).await;
        }
    }

    Ok(())
}

// ─── Chat ───────────────────────────────────────────────────────────────────

async fn run_chat(session: &mut ChatSession, client: &ApiClient, text: &str) {
    match session.submit(client, text).await {
        Ok(turn) => print_turn(turn),
        Err(SessionError::RequestInFlight) => {
            println!("(still working on the previous message)");
        }
        Err(e) => println!("({e})"),
    }
}

// ─── Nearby ─────────────────────────────────────────────────────────────────

async fn run_nearby(nearby: &mut NearbySearch, client: &ApiClient, args: &str) {
    // `/nearby Tamil Nadu; react`: everything before the optional `;` is the
    // location, everything after is the skill filter.
    let mut parts = args.splitn(2, ';');
    let location = parts.next().unwrap_or_default().trim();
    let skill = parts.next().map(str::trim).filter(|s| !s.is_empty());

    match nearby.find_nearby(client, location, None, skill).await {
        Ok(NearbyOutcome::Updated { count }) => {
            let label = nearby.location_label().unwrap_or(location);
            println!("📍 {count} candidates near {label}");
            for candidate in nearby.results() {
                print_candidate(candidate);
            }
        }
        Ok(NearbyOutcome::Rejected { message }) => println!("{message}"),
        Ok(NearbyOutcome::Unavailable) => {
            println!("(the backend could not be reached; keeping previous results)");
        }
        Err(e) => println!("({e})"),
    }
}

// ─── Search ─────────────────────────────────────────────────────────────────

async fn run_search(client: &ApiClient, query: &str) {
    if query.is_empty() {
        println!("(usage: /search <query>)");
        return;
    }
    match client.search(query).await {
        Ok(reply) => {
            let candidates: Vec<CandidateSummary> =
                reply.candidates.iter().map(normalize_candidate).collect();
            println!("{} candidates for '{query}'", candidates.len());
            for candidate in &candidates {
                print_candidate(candidate);
            }
        }
        Err(e @ ApiError::ConnectionFailed { .. }) => println!("({e})"),
        Err(e) => println!("(search failed: {e})"),
    }
}

// ─── Rendering ──────────────────────────────────────────────────────────────

fn print_turn(turn: &Turn) {
    let speaker = match turn.role {
        Role::User => "you",
        Role::Assistant => "trace",
    };
    println!("{speaker} ▸ {}", turn.content);
    for candidate in &turn.payload {
        print_candidate(candidate);
    }
}

fn print_candidate(candidate: &CandidateSummary) {
    let name = candidate.name.as_deref().unwrap_or("(unnamed)");
    let role = candidate.role.as_deref().unwrap_or("Developer");
    let badge = if candidate.verified { " ✔" } else { "" };

    print!("  • {name}{badge} — {role}");
    if let Some(location) = candidate.location.as_deref() {
        print!(" ({location})");
    }
    println!();

    if !candidate.skills.is_empty() {
        println!("    {}", candidate.top_skills().join(", "));
    }
    println!("    {} {:.0} Match", score_meter(candidate.score), candidate.score);
    if let Some(link) = candidate.linkedin.as_deref().or(candidate.github.as_deref()) {
        println!("    {link}");
    }
}

/// Ten-slot meter; the score is already clamped into [0, 100].
fn score_meter(score: f64) -> String {
    let filled = (score / 10.0).round() as usize;
    let filled = filled.min(10);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(10 - filled))
}
