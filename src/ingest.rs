use chrono::{NaiveDate, Utc};

use crate::models::{GeneratedModule, GeneratedPlan, Module, StudyPlan, Topic};
use crate::progress;

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// Turns a raw generator response into a tracked plan: every plan, module and
// topic gets a fresh id, every topic starts incomplete.
pub fn ingest(response: GeneratedPlan, exam_name: &str, target_date: NaiveDate) -> StudyPlan {
    let modules = response.modules.into_iter().map(build_module).collect();

    let mut plan = StudyPlan {
        id: new_id(),
        title: response.title,
        exam_name: exam_name.to_string(),
        target_date,
        created_at: Utc::now().timestamp_millis(),
        description: response.description,
        estimated_hours: response.estimated_hours,
        modules,
        completed_topics_count: 0,
        total_topics_count: 0,
    };
    progress::recompute(&mut plan);
    plan
}

fn build_module(module: GeneratedModule) -> Module {
    Module {
        id: new_id(),
        title: module.title,
        description: module.description,
        topics: module
            .topics
            .into_iter()
            .map(|title| Topic {
                id: new_id(),
                title,
                is_completed: false,
            })
            .collect(),
    }
}
