use crate::models::StudyPlan;

// Aggregate counts are always derived from the topic tree in full. Nothing
// increments or decrements them in place.

pub fn totals(plan: &StudyPlan) -> (usize, usize) {
    let total = plan.modules.iter().map(|m| m.topics.len()).sum();
    let completed = plan
        .modules
        .iter()
        .flat_map(|m| m.topics.iter())
        .filter(|t| t.is_completed)
        .count();
    (completed, total)
}

pub fn recompute(plan: &mut StudyPlan) {
    let (completed, total) = totals(plan);
    plan.completed_topics_count = completed;
    plan.total_topics_count = total;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Module, Topic};
    use chrono::NaiveDate;

    fn plan_with_modules(modules: Vec<Module>) -> StudyPlan {
        StudyPlan {
            id: "plan-1".to_string(),
            title: "Test Plan".to_string(),
            exam_name: "TEST".to_string(),
            target_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            created_at: 0,
            description: String::new(),
            estimated_hours: 10.0,
            modules,
            completed_topics_count: 0,
            total_topics_count: 0,
        }
    }

    fn module(id: &str, completions: &[bool]) -> Module {
        Module {
            id: id.to_string(),
            title: format!("Module {}", id),
            description: None,
            topics: completions
                .iter()
                .enumerate()
                .map(|(i, done)| Topic {
                    id: format!("{}-t{}", id, i),
                    title: format!("Topic {}", i),
                    is_completed: *done,
                })
                .collect(),
        }
    }

    #[test]
    fn totals_empty_plan() {
        let plan = plan_with_modules(vec![]);
        assert_eq!(totals(&plan), (0, 0));
    }

    #[test]
    fn totals_counts_across_modules() {
        let plan = plan_with_modules(vec![
            module("m1", &[true, false, true]),
            module("m2", &[false]),
            module("m3", &[]),
        ]);
        assert_eq!(totals(&plan), (2, 4));
    }

    #[test]
    fn recompute_sets_both_counts() {
        let mut plan = plan_with_modules(vec![module("m1", &[true, true, false])]);
        recompute(&mut plan);
        assert_eq!(plan.completed_topics_count, 2);
        assert_eq!(plan.total_topics_count, 3);
    }

    #[test]
    fn recompute_overwrites_drifted_counts() {
        let mut plan = plan_with_modules(vec![module("m1", &[false, false])]);
        plan.completed_topics_count = 99;
        plan.total_topics_count = 99;

        recompute(&mut plan);
        assert_eq!(plan.completed_topics_count, 0);
        assert_eq!(plan.total_topics_count, 2);
    }

    #[test]
    fn recompute_module_without_topics() {
        let mut plan = plan_with_modules(vec![module("m1", &[])]);
        recompute(&mut plan);
        assert_eq!(plan.completed_topics_count, 0);
        assert_eq!(plan.total_topics_count, 0);
    }
}
