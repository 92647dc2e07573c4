use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Field names stay camelCase on the wire so stored plans match the shape the
// plan generator and any other consumer of the JSON already use.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub id: String,
    pub title: String,
    pub exam_name: String,
    pub target_date: NaiveDate,
    // Epoch milliseconds
    pub created_at: i64,
    pub description: String,
    pub estimated_hours: f64,
    pub modules: Vec<Module>,
    // Cached aggregates, recomputed from `modules` after every mutation
    pub completed_topics_count: usize,
    pub total_topics_count: usize,
}

impl StudyPlan {
    pub fn is_complete(&self) -> bool {
        self.total_topics_count > 0 && self.completed_topics_count == self.total_topics_count
    }

    pub fn progress_percent(&self) -> f64 {
        if self.total_topics_count == 0 {
            0.0
        } else {
            (self.completed_topics_count as f64 / self.total_topics_count as f64) * 100.0
        }
    }
}

// What the plan generator hands us: titles only, no ids, no completion state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    pub title: String,
    pub description: String,
    pub estimated_hours: f64,
    pub modules: Vec<GeneratedModule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedModule {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub topics: Vec<String>,
}

// JSON output wrapper for CLI
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}
