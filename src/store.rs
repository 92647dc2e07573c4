use tracing::debug;

use crate::error::Result;
use crate::models::StudyPlan;
use crate::progress;
use crate::storage::Storage;

// Owns the plan collection and the active selection. Every effective mutation
// is written back to storage as a full snapshot before it returns.
pub struct PlanStore {
    storage: Storage,
    plans: Vec<StudyPlan>,
    active_plan_id: Option<String>,
    revision: u64,
}

impl PlanStore {
    pub fn open(storage: Storage) -> Result<Self> {
        let plans = storage.load()?;
        Ok(Self {
            storage,
            plans,
            active_plan_id: None,
            revision: 0,
        })
    }

    pub fn plans(&self) -> &[StudyPlan] {
        &self.plans
    }

    pub fn plan(&self, id: &str) -> Option<&StudyPlan> {
        self.plans.iter().find(|p| p.id == id)
    }

    // Newest plans go first, and the new plan becomes the active selection.
    pub fn create_plan(&mut self, plan: StudyPlan) -> Result<&StudyPlan> {
        self.active_plan_id = Some(plan.id.clone());
        self.plans.insert(0, plan);
        self.persist()?;
        Ok(&self.plans[0])
    }

    // Resolves plan, module and topic by id; if any of them is gone the call
    // is a no-op and nothing is written. Returns whether a topic was flipped.
    pub fn toggle_topic(&mut self, plan_id: &str, module_id: &str, topic_id: &str) -> Result<bool> {
        let Some(plan) = self.plans.iter_mut().find(|p| p.id == plan_id) else {
            debug!("toggle ignored, no plan {}", plan_id);
            return Ok(false);
        };
        let Some(module) = plan.modules.iter_mut().find(|m| m.id == module_id) else {
            debug!("toggle ignored, no module {} in plan {}", module_id, plan_id);
            return Ok(false);
        };
        let Some(topic) = module.topics.iter_mut().find(|t| t.id == topic_id) else {
            debug!("toggle ignored, no topic {} in module {}", topic_id, module_id);
            return Ok(false);
        };

        topic.is_completed = !topic.is_completed;
        progress::recompute(plan);
        self.persist()?;
        Ok(true)
    }

    pub fn delete_plan(&mut self, plan_id: &str) -> Result<bool> {
        let before = self.plans.len();
        self.plans.retain(|p| p.id != plan_id);
        if self.plans.len() == before {
            debug!("delete ignored, no plan {}", plan_id);
            return Ok(false);
        }

        if self.active_plan_id.as_deref() == Some(plan_id) {
            self.active_plan_id = None;
        }

        self.persist()?;
        Ok(true)
    }

    // Selection is a weak reference: an id that no longer resolves simply
    // yields no active plan. It is session state and is never persisted.
    pub fn select_plan(&mut self, plan_id: Option<&str>) {
        self.active_plan_id = plan_id.map(String::from);
    }

    pub fn active_plan(&self) -> Option<&StudyPlan> {
        let id = self.active_plan_id.as_deref()?;
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            total_plans: self.plans.len(),
            completed_plans: self.plans.iter().filter(|p| p.is_complete()).count(),
            total_topics: self.plans.iter().map(|p| p.total_topics_count).sum(),
            completed_topics: self.plans.iter().map(|p| p.completed_topics_count).sum(),
        }
    }

    fn persist(&mut self) -> Result<()> {
        self.storage.save(&self.plans)?;
        self.revision += 1;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Stats {
    pub total_plans: usize,
    pub completed_plans: usize,
    pub total_topics: usize,
    pub completed_topics: usize,
}
