use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use chrono::TimeZone;

use parley_app::config::{Config, Settings};
use parley_app::session::{ChatSession, SessionError};
use parley_capabilities::{BackendConfig, CapabilityClient};
use parley_core::engine::ChatEngine;
use parley_memory::{ChatTurn, Sender, TranscriptStore};
use parley_providers::GeminiClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                       Parley Chat Client                         ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let config = if Config::exists() {
        let cfg = Config::load()?;
        cfg.validate()?;
        cfg
    } else {
        let cfg = Config::default();
        cfg.save()?;
        println!("ℹ️  Wrote default config.yaml. Add API keys there or via PARLEY_* environment variables");
        cfg
    };

    let keys = config.keys.resolved();
    if keys.gemini_api_key.is_empty() {
        eprintln!("⚠️  No Gemini API key configured; plain chat replies will fail until one is set");
    }

    let capabilities = CapabilityClient::new(BackendConfig {
        news_api_key: keys.news_api_key.clone(),
        numverify_api_key: keys.numverify_api_key.clone(),
        abstract_api_key: keys.abstract_api_key.clone(),
        google_api_key: keys.google_api_key.clone(),
        search_engine_id: keys.search_engine_id.clone(),
        youtube_api_key: keys.youtube_api_key.clone(),
    });
    let responder = GeminiClient::new(keys.gemini_api_key.clone());
    let engine = ChatEngine::new(Arc::new(capabilities), Arc::new(responder));
    let store = TranscriptStore::new(&config.transcripts_dir);

    let mut session = ChatSession::open(
        engine,
        store,
        config.settings.clone(),
        config.chat_id.clone(),
    )
    .await?;

    println!("Chat: {}", session.title());
    if !session.turns().is_empty() {
        println!("Resuming {} saved messages:\n", session.turns().len());
        for turn in session.turns() {
            print_turn(turn, &config.settings);
        }
    }
    println!("Type a message, or '/help' for commands.\n");

    loop {
        print!("you> ");
        io::stdout().flush().ok();

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "exit" | "quit" | "/exit" => break,
            "help" | "/help" => {
                print_help();
                continue;
            }
            "/new" => {
                match session.new_chat().await {
                    Ok(()) => println!("✅ Started a new chat\n"),
                    Err(e) => eprintln!("❌ Failed to start a new chat: {}\n", e),
                }
                continue;
            }
            "/settings" => {
                print_settings(&config.settings);
                continue;
            }
            "/retry" => {
                let title_before = session.title().to_string();
                match session.retry().await {
                    Ok(reply) => {
                        print_reply(&reply, &config.settings);
                        if session.title() != title_before {
                            println!("📝 Chat titled: {}\n", session.title());
                        }
                    }
                    Err(SessionError::NothingToRetry) => println!("ℹ️  Nothing to retry.\n"),
                    Err(e) => report_error(e),
                }
                continue;
            }
            _ => {}
        }

        let title_before = session.title().to_string();
        let outcome = session.submit(line).await;
        match outcome {
            Ok(reply) => {
                print_reply(&reply, &config.settings);
                if session.title() != title_before {
                    println!("📝 Chat titled: {}\n", session.title());
                }
            }
            Err(e) => report_error(e),
        }
    }

    println!("👋 Goodbye!");
    Ok(())
}

fn report_error(e: SessionError) {
    tracing::error!("Turn failed: {}", e);
    eprintln!("❌ An error occurred. Please try again ('/retry').\n");
}

fn print_reply(reply: &str, settings: &Settings) {
    if settings.show_timestamps {
        let stamp = chrono::Local::now().format("%l:%M %p");
        println!("\nparley [{}]> {}\n", stamp, reply);
    } else {
        println!("\nparley> {}\n", reply);
    }
}

fn print_turn(turn: &ChatTurn, settings: &Settings) {
    let speaker = match turn.sender {
        Sender::User => "you",
        Sender::Bot => "parley",
    };
    if settings.show_timestamps {
        let stamp = format_epoch(turn.timestamp);
        println!("{} [{}]> {}", speaker, stamp, turn.text);
    } else {
        println!("{}> {}", speaker, turn.text);
    }
}

fn format_epoch(epoch: i64) -> String {
    chrono::Local
        .timestamp_opt(epoch, 0)
        .single()
        .map(|dt| dt.format("%l:%M %p").to_string())
        .unwrap_or_else(|| epoch.to_string())
}

fn print_help() {
    println!();
    println!("Commands:");
    println!("  /new        start a new chat (replaces the current log)");
    println!("  /retry      resend the last message that failed");
    println!("  /settings   show the active settings");
    println!("  exit        quit");
    println!();
    println!("Shortcuts understood in messages:");
    println!("  news about <topic>");
    println!("  verify phone <number>");
    println!("  screenshot of <url>");
    println!("  search for <query>");
    println!("  search youtube for <query>");
    println!();
}

fn print_settings(settings: &Settings) {
    println!();
    println!("Settings (config.yaml):");
    println!("  ai_response_length: {:?}", settings.ai_response_length);
    println!("  show_timestamps:    {}", settings.show_timestamps);
    println!("  save_chats_locally: {}", settings.save_chats_locally);
    println!("  sound_enabled:      {}", settings.sound_enabled);
    println!("  language:           {}", settings.language);
    println!();
}
