//! CLI command implementations

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::{AuthClient, Session, SessionStore};
use crate::cli::args::{AuthCommand, CacheCommand, ConfigCommand, ProfilesCommand};
use crate::config::Settings;
use crate::fathom::{FathomClient, MeetingData};
use crate::profiles::{NewProfile, ProfileRegistry, ProfileUpdate, SummaryProfile};
use crate::storage::{Database, KeyValueStore};
use crate::summary::{MeetingSession, SummaryCache, SummaryService, SummaryState};

/// Open the device-local store
pub fn open_store(settings: &Settings) -> Result<Arc<dyn KeyValueStore>> {
    let db = Database::open(settings).with_context(|| {
        format!(
            "Failed to open local store at {}",
            settings.database_path().display()
        )
    })?;
    Ok(Arc::new(db))
}

fn fathom_client(settings: &Settings) -> Result<FathomClient> {
    FathomClient::from_settings(&settings.fathom).context("Failed to set up recording platform client")
}

/// Build a meeting session for a recording, fetching it from the platform.
pub async fn open_meeting_session(
    settings: &Settings,
    recording: u64,
) -> Result<(MeetingSession, MeetingData)> {
    let store = open_store(settings)?;
    let service = Arc::new(SummaryService::from_settings(settings, store.clone())?);
    let client = fathom_client(settings)?;

    let data = client
        .load_recording(recording)
        .await
        .with_context(|| format!("Failed to load recording {}", recording))?;

    let owner = SessionStore::new(store).load();
    let session = MeetingSession::new(service, owner, data.context());
    Ok((session, data))
}

/// List recorded meetings
pub async fn list_meetings(settings: &Settings, cursor: Option<String>, json: bool) -> Result<()> {
    let client = fathom_client(settings)?;
    let page = client
        .list_meetings(cursor.as_deref())
        .await
        .context("Failed to list meetings")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if page.items.is_empty() {
        println!("No meetings found");
        return Ok(());
    }

    println!(
        "{:<12} {:<36} {:<12} {:<10}",
        "ID", "Title", "Date", "Duration"
    );
    println!("{}", "-".repeat(72));

    for meeting in &page.items {
        let duration = meeting
            .duration_minutes()
            .map(|m| format!("{} mins", m))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<12} {:<36} {:<12} {:<10}",
            meeting.recording_id,
            truncate(&meeting.title, 34),
            meeting.date().unwrap_or_else(|| "-".to_string()),
            duration
        );
    }

    if let Some(next) = page.next_cursor.as_deref().filter(|c| !c.is_empty()) {
        println!();
        println!("More meetings: stokemeet meetings --cursor {}", next);
    }

    Ok(())
}

/// Show a meeting's details
pub async fn show_meeting(settings: &Settings, recording: u64) -> Result<()> {
    let client = fathom_client(settings)?;
    let data = client
        .load_recording(recording)
        .await
        .with_context(|| format!("Failed to load recording {}", recording))?;
    let embed = client.get_embed(&data.share_url).await;

    println!("Title: {}", data.title);
    println!("Date: {}", data.date.as_deref().unwrap_or("-"));
    println!("Duration: {}", data.duration);
    if !data.share_url.is_empty() {
        println!("Recording: {}", data.share_url);
    }
    if let Some(thumbnail) = embed.thumbnail_url.as_deref() {
        println!("Thumbnail: {}", thumbnail);
    }

    if !data.attendees.is_empty() {
        println!();
        println!("Attendees:");
        for attendee in &data.attendees {
            if attendee.email.is_empty() {
                println!("  - {}", attendee.name);
            } else {
                println!("  - {} <{}>", attendee.name, attendee.email);
            }
        }
    }

    println!();
    println!("Platform summary:");
    println!("{}", data.platform_summary);

    if !data.action_items.is_empty() {
        println!();
        println!("Action items:");
        for item in &data.action_items {
            println!("  - [ ] {} ({})", item.text, item.assignee);
        }
    }

    println!();
    if data.lines.is_empty() {
        println!("(No transcript available)");
        return Ok(());
    }

    for line in &data.lines {
        println!("[{}] {}: {}", line.timestamp, line.speaker, line.text);
    }

    Ok(())
}

/// Show the summary for a type, generating it on a cache miss.
pub async fn summarize_meeting(
    settings: &Settings,
    recording: u64,
    summary_type: Option<String>,
) -> Result<()> {
    let (mut session, data) = open_meeting_session(settings, recording).await?;
    let type_id = resolve_type(&session, summary_type);

    let state = session.select_type(&type_id).await;

    println!("{} summary for {} ({})", type_id, data.title, state.label());
    println!();
    println!("{}", session.content());

    if state == SummaryState::Failed {
        anyhow::bail!("Summary generation failed for recording {}", recording);
    }

    Ok(())
}

/// Answer a question from a meeting's transcript
pub async fn ask_question(settings: &Settings, recording: u64, question: &str) -> Result<()> {
    let question = question.trim();
    if question.is_empty() {
        anyhow::bail!("Question must not be empty");
    }

    let (session, _) = open_meeting_session(settings, recording).await?;
    println!("{}", session.ask(question).await);
    Ok(())
}

/// Draft a follow-up email using a summary's action items
pub async fn draft_follow_up(
    settings: &Settings,
    recording: u64,
    summary_type: Option<String>,
) -> Result<()> {
    let (mut session, _) = open_meeting_session(settings, recording).await?;
    let type_id = resolve_type(&session, summary_type);

    if session.select_type(&type_id).await == SummaryState::Failed {
        anyhow::bail!("Summary generation failed for recording {}", recording);
    }

    println!("{}", session.follow_up_email().await);
    Ok(())
}

/// List built-in types followed by custom profiles
pub fn list_types(settings: &Settings) -> Result<()> {
    let registry = ProfileRegistry::new(open_store(settings)?);
    let default_id = registry.default_profile_id();

    println!("Built-in:");
    for profile in registry.list_built_in() {
        print_type_row(&profile, &default_id);
    }

    let custom = registry.list_custom();
    if !custom.is_empty() {
        println!();
        println!("Custom:");
        for profile in &custom {
            print_type_row(profile, &default_id);
        }
    }

    Ok(())
}

fn print_type_row(profile: &SummaryProfile, default_id: &str) {
    println!("{}", format_type_row(profile, default_id));
}

/// Custom ids are opaque, so custom rows also carry the profile name.
fn format_type_row(profile: &SummaryProfile, default_id: &str) -> String {
    let marker = if profile.id == default_id { "*" } else { " " };
    if profile.is_built_in() {
        return format!("{} {:<30} {}", marker, profile.id, profile.description);
    }

    if profile.description.is_empty() {
        format!("{} {:<30} {}", marker, profile.id, profile.name)
    } else {
        format!(
            "{} {:<30} {} - {}",
            marker, profile.id, profile.name, profile.description
        )
    }
}

/// Handle profile subcommands
pub fn profiles_command(settings: &Settings, cmd: ProfilesCommand) -> Result<()> {
    let registry = ProfileRegistry::new(open_store(settings)?);

    match cmd {
        ProfilesCommand::List => {
            let profiles = registry.list_custom();
            if profiles.is_empty() {
                println!("No custom profiles");
                return Ok(());
            }

            println!("{:<26} {:<28} {:<12}", "ID", "Name", "Updated");
            println!("{}", "-".repeat(68));
            for profile in profiles {
                println!(
                    "{:<26} {:<28} {:<12}",
                    profile.id,
                    truncate(&profile.name, 26),
                    profile.updated_at.format("%Y-%m-%d")
                );
            }
        }
        ProfilesCommand::Show { id } => {
            let profile = registry
                .get(&id)
                .with_context(|| format!("Profile not found: {}", id))?;
            println!("ID: {}", profile.id);
            println!("Name: {}", profile.name);
            if !profile.description.is_empty() {
                println!("Description: {}", profile.description);
            }
            if !profile.is_built_in() {
                println!("Created: {}", profile.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated: {}", profile.updated_at.format("%Y-%m-%d %H:%M"));
            }
            println!();
            println!("{}", profile.system_prompt);
        }
        ProfilesCommand::Create {
            name,
            prompt,
            description,
        } => {
            let profile = registry.create(NewProfile {
                name,
                description,
                system_prompt: prompt,
            })?;
            println!("Profile created: {} ({})", profile.name, profile.id);
        }
        ProfilesCommand::Update {
            id,
            name,
            prompt,
            description,
        } => {
            let update = ProfileUpdate {
                name,
                description,
                system_prompt: prompt,
            };
            if update.is_empty() {
                anyhow::bail!("Nothing to update. Pass --name, --prompt, or --description.");
            }

            match registry.update(&id, update)? {
                Some(profile) => println!("Profile updated: {} ({})", profile.name, profile.id),
                None => anyhow::bail!("Profile not found: {}", id),
            }
        }
        ProfilesCommand::Delete { id } => {
            if registry.delete(&id)? {
                println!("Profile deleted: {}", id);
            } else {
                anyhow::bail!("Profile not found: {}", id);
            }
        }
        ProfilesCommand::Default { id } => match id {
            Some(id) => {
                registry.set_default_profile_id(&id)?;
                println!("Default summary type: {}", id);
            }
            None => println!("{}", registry.default_profile_id()),
        },
        ProfilesCommand::Export { output } => {
            let json = registry.export_json()?;
            write_output(output, &json)?;
        }
        ProfilesCommand::Import { path } => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let imported = registry.import_json(&json)?;
            println!("Imported {} profiles", imported.len());
        }
    }

    Ok(())
}

/// Handle cache subcommands
pub fn cache_command(settings: &Settings, cmd: CacheCommand) -> Result<()> {
    let cache = SummaryCache::local_only(open_store(settings)?);

    match cmd {
        CacheCommand::List { meeting } => {
            let entries = cache.list_local(meeting.as_deref())?;
            if entries.is_empty() {
                println!("No cached summaries");
                return Ok(());
            }

            println!("{:<14} Summary type", "Recording");
            println!("{}", "-".repeat(44));
            for (meeting, summary_type) in entries {
                println!("{:<14} {}", meeting, summary_type);
            }
        }
        CacheCommand::Clear {
            meeting,
            summary_type,
        } => {
            if cache.clear_local(&meeting, &summary_type)? {
                println!("Cleared cached {} summary for {}", summary_type, meeting);
            } else {
                println!("No cached {} summary for {}", summary_type, meeting);
            }
        }
    }

    Ok(())
}

/// Handle auth subcommands
pub async fn auth_command(settings: &Settings, cmd: AuthCommand) -> Result<()> {
    let sessions = SessionStore::new(open_store(settings)?);

    match cmd {
        AuthCommand::Login { token } => {
            let client = AuthClient::from_settings(&settings.remote)?;
            let session = client
                .verify(token.trim())
                .await
                .context("Sign-in failed")?;
            sessions.save(&session)?;
            println!("Signed in as {}", describe(&session));
        }
        AuthCommand::Logout => {
            if sessions.clear()? {
                println!("Signed out");
            } else {
                println!("Not signed in");
            }
        }
        AuthCommand::Status => {
            match sessions.load() {
                Some(session) => println!("Signed in as {}", describe(&session)),
                None => println!("Not signed in"),
            }
            if settings.remote.is_configured() {
                println!("Remote store: {}", settings.remote.url.trim());
            } else {
                println!("Remote store: not configured (summaries are cached locally)");
            }
        }
    }

    Ok(())
}

fn describe(session: &Session) -> String {
    match session.email.as_deref() {
        Some(email) if !email.is_empty() => format!("{} ({})", email, session.user_id),
        _ => session.user_id.clone(),
    }
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

// Helper functions

fn resolve_type(session: &MeetingSession, requested: Option<String>) -> String {
    match requested.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        Some(type_id) => {
            if !session.summary_types().iter().any(|p| p.id == type_id) {
                tracing::warn!(
                    "Unknown summary type '{}', using the generic framework",
                    type_id
                );
            }
            type_id
        }
        None => session.default_type_id(),
    }
}

fn write_output(output: Option<PathBuf>, content: &str) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Exported to: {}", path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("Standup", 10), "Standup");
    }

    #[test]
    fn custom_type_row_shows_name_next_to_id() {
        let now = chrono::Utc::now();
        let profile = SummaryProfile {
            id: "custom_1733047200000_a1b2c3d4e".to_string(),
            name: "Board Review".to_string(),
            description: "Decisions for the board".to_string(),
            system_prompt: "List decisions.".to_string(),
            created_at: now,
            updated_at: now,
        };

        let row = format_type_row(&profile, "General");
        assert!(row.starts_with("  custom_1733047200000_a1b2c3d4e"));
        assert!(row.ends_with("Board Review - Decisions for the board"));

        let row = format_type_row(&profile, &profile.id);
        assert!(row.starts_with("* "));
    }

    #[test]
    fn built_in_type_row_shows_id_and_description() {
        let profile = SummaryProfile::built_in(crate::profiles::BuiltInType::Retrospective);

        let row = format_type_row(&profile, "Retrospective");
        assert!(row.starts_with("* Retrospective"));
        assert!(row.ends_with(&profile.description));
        assert_eq!(row.matches("Retrospective").count(), 1);
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("Customer Success - REACH™ review", 26), "Customer Success - REAC...");
        assert_eq!(truncate("REACH™™™™", 6), "REA...");
    }
}
