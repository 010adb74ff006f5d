use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use serde_json::Value;

/// How often a reminder is meant to repeat. Stored for display only;
/// nothing re-schedules a reminder.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Once,
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [Frequency::Once, Frequency::Daily, Frequency::Weekly, Frequency::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Once => "once",
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Frequency::ALL
            .into_iter()
            .find(|frequency| frequency.as_str() == s)
            .ok_or_else(|| format!("unknown frequency '{}'", s))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(rename = "_id")]
    pub id: String,
    pub pet_id: String,
    pub title: String,
    pub due_at: DateTime<Utc>,
    pub frequency: Frequency,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /reminders`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReminderCreateReceive {
    pub pet_id: Option<String>,
    pub title: Option<String>,
    pub due_at: Option<Value>,
    pub frequency: Option<String>,
}

/// Body of `PATCH /reminders/{id}`. `petId` is not patchable; a
/// reminder stays attached to the pet it was created for.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPatchReceive {
    pub title: Option<String>,
    pub due_at: Option<Value>,
    pub frequency: Option<Frequency>,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReminder {
    pub pet_id: String,
    pub title: String,
    pub due_at: DateTime<Utc>,
    pub frequency: Frequency,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderChanges {
    pub title: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
    pub frequency: Option<Frequency>,
    pub completed: Option<bool>,
}

impl Reminder {
    /// New reminders always start pending.
    pub fn create(id: String, new_reminder: NewReminder, now: DateTime<Utc>) -> Self {
        Reminder {
            id,
            pet_id: new_reminder.pet_id,
            title: new_reminder.title,
            due_at: new_reminder.due_at,
            frequency: new_reminder.frequency,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: ReminderChanges, now: DateTime<Utc>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(due_at) = changes.due_at {
            self.due_at = due_at;
        }
        if let Some(frequency) = changes.frequency {
            self.frequency = frequency;
        }
        if let Some(completed) = changes.completed {
            self.completed = completed;
        }
        self.updated_at = now;
    }

    /// Due in the past and not yet completed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_at < now
    }
}
