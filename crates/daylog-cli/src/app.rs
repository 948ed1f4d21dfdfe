//! Application controller.
//!
//! `App` owns all process-wide mutable state (the activity store, the
//! calendar cursor, and the conversation) and translates REPL input into
//! domain operations. All recoverable errors come back as user-facing
//! message lines; nothing here panics or aborts the session.

use daylog_core::activity::{ActivityRepository, ActivityStore, MoodChoice, MOOD_OPTIONS};
use daylog_core::calendar::{CalendarCursor, MonthShift, days_in_month};
use daylog_core::conversation::ConversationManager;
use daylog_core::error::Result;
use daylog_core::provider::{ChatProvider, SuggestionProvider};
use daylog_core::suggestion::request_suggestions;
use std::sync::Arc;

/// A parsed REPL input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/log name | minutes | date | time [| mood]`
    Log {
        name: String,
        minutes: String,
        date: String,
        time: String,
        mood: String,
    },
    /// `/schedule name | d1,d2,... | time`
    Schedule {
        name: String,
        dates: String,
        time: String,
    },
    /// `/day YYYY-MM-DD`
    Day(String),
    /// `/cal`
    Calendar,
    /// `/prev`
    Prev,
    /// `/next`
    Next,
    /// `/suggest`
    Suggest,
    /// `/help`
    Help,
    /// `/quit`
    Quit,
    /// Unrecognized slash command.
    Unknown(String),
    /// Anything else is a chat turn.
    Chat(String),
}

impl Command {
    /// Parses one input line. Never fails: malformed slash commands come
    /// back as `Unknown` and plain text as `Chat`.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if !line.starts_with('/') {
            return Self::Chat(line.to_string());
        }

        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        match keyword {
            "/log" => {
                let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
                match parts.as_slice() {
                    [name, minutes, date, time] => Self::Log {
                        name: name.to_string(),
                        minutes: minutes.to_string(),
                        date: date.to_string(),
                        time: time.to_string(),
                        mood: "Predict".to_string(),
                    },
                    [name, minutes, date, time, mood] => Self::Log {
                        name: name.to_string(),
                        minutes: minutes.to_string(),
                        date: date.to_string(),
                        time: time.to_string(),
                        mood: mood.to_string(),
                    },
                    _ => Self::Unknown(line.to_string()),
                }
            }
            "/schedule" => {
                let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
                match parts.as_slice() {
                    [name, dates, time] => Self::Schedule {
                        name: name.to_string(),
                        dates: dates.to_string(),
                        time: time.to_string(),
                    },
                    _ => Self::Unknown(line.to_string()),
                }
            }
            "/day" if !rest.is_empty() => Self::Day(rest.to_string()),
            "/cal" => Self::Calendar,
            "/prev" => Self::Prev,
            "/next" => Self::Next,
            "/suggest" => Self::Suggest,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Top-level application state and dispatch.
pub struct App<P> {
    store: ActivityStore,
    cursor: CalendarCursor,
    conversation: ConversationManager,
    provider: P,
    repository: Arc<dyn ActivityRepository>,
}

impl<P> App<P>
where
    P: SuggestionProvider + ChatProvider,
{
    /// Loads the persisted store and assembles the controller.
    pub async fn init(repository: Arc<dyn ActivityRepository>, provider: P) -> Result<Self> {
        let store = repository.load().await?;
        tracing::info!(records = store.len(), "loaded activity store");
        Ok(Self {
            store,
            cursor: CalendarCursor::current(),
            conversation: ConversationManager::new(),
            provider,
            repository,
        })
    }

    /// Saves the store back through the repository.
    pub async fn shutdown(&self) -> Result<()> {
        self.repository.save(&self.store).await
    }

    /// Handles one input line, returning the lines to display.
    pub async fn handle_line(&mut self, line: &str) -> Vec<String> {
        match Command::parse(line) {
            Command::Log {
                name,
                minutes,
                date,
                time,
                mood,
            } => {
                let mood_choice = MoodChoice::parse(&mood);
                match self.store.log(&name, &minutes, &date, &time, mood_choice) {
                    Ok(record) => {
                        let mut lines = vec![format!(
                            "Logged {} on {} at {} ({})",
                            record.activity_name,
                            record.date,
                            record.time,
                            record.mood.as_deref().unwrap_or("-"),
                        )];
                        lines.extend(self.refresh_suggestions().await);
                        lines
                    }
                    Err(err) => vec![err.to_string()],
                }
            }
            Command::Schedule { name, dates, time } => {
                match self.store.schedule(&name, &dates, &time) {
                    Ok(created) => {
                        let mut lines =
                            vec![format!("Scheduled {} for {} date(s)", name, created.len())];
                        lines.extend(self.refresh_suggestions().await);
                        lines
                    }
                    Err(err) => vec![err.to_string()],
                }
            }
            Command::Day(date) => self.show_day(&date),
            Command::Calendar => self.show_calendar(),
            Command::Prev => {
                self.cursor = self.cursor.shifted(MonthShift::Back);
                self.show_calendar()
            }
            Command::Next => {
                self.cursor = self.cursor.shifted(MonthShift::Forward);
                self.show_calendar()
            }
            Command::Suggest => self.refresh_suggestions().await,
            Command::Help => help_lines(),
            Command::Quit => Vec::new(),
            Command::Unknown(input) => {
                vec![format!("Unknown command: {input}. Type /help for usage.")]
            }
            Command::Chat(message) => match self.conversation.send_turn(&message, &self.provider).await
            {
                Ok(reply) => vec![reply],
                Err(err) => vec![err.to_string()],
            },
        }
    }

    /// Whether the line asks to leave the REPL.
    pub fn is_quit(line: &str) -> bool {
        matches!(Command::parse(line), Command::Quit)
    }

    fn show_day(&self, date: &str) -> Vec<String> {
        let records = self.store.activities_for(date);
        if records.is_empty() {
            return vec!["No activities for this day.".to_string()];
        }
        records
            .iter()
            .map(|record| {
                let tag = match &record.mood {
                    Some(mood) => mood.clone(),
                    None => "scheduled".to_string(),
                };
                format!("{} - {} ({})", record.time, record.activity_name, tag)
            })
            .collect()
    }

    fn show_calendar(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match days_in_month(self.cursor.year, self.cursor.month) {
            Ok(days) => {
                lines.push(format!("{} ({} days)", self.cursor, days));
                for day in 1..=days {
                    let date = format!("{:04}-{:02}-{:02}", self.cursor.year, self.cursor.month, day);
                    let count = self.store.activities_for(&date).len();
                    if count > 0 {
                        lines.push(format!("  {date}: {count} activity(ies)"));
                    }
                }
            }
            Err(err) => lines.push(err.to_string()),
        }
        lines
    }

    async fn refresh_suggestions(&self) -> Vec<String> {
        let text = request_suggestions(&self.store, &self.provider).await;
        let mut lines = vec!["Activity Suggestions:".to_string()];
        lines.extend(text.lines().map(str::to_string));
        lines
    }

    #[cfg(test)]
    fn store(&self) -> &ActivityStore {
        &self.store
    }

    #[cfg(test)]
    fn conversation(&self) -> &ConversationManager {
        &self.conversation
    }
}

fn help_lines() -> Vec<String> {
    vec![
        "/log name | minutes | date | time [| mood]  - log an executed activity".to_string(),
        "/schedule name | d1,d2,... | time           - schedule an activity".to_string(),
        "/day YYYY-MM-DD                             - show a day's activities".to_string(),
        "/cal, /prev, /next                          - browse the month view".to_string(),
        "/suggest                                    - refresh activity suggestions".to_string(),
        "/quit                                       - save and exit".to_string(),
        format!("Moods: {}", MOOD_OPTIONS.join(", ")),
        "Anything else is sent to the assistant.".to_string(),
    ]
}
