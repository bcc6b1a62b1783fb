//! End-to-end planning over an in-memory relation set.

use tutor_core::{Mastery, Relation, RelationSet, PENALTY_COST};
use tutor_graph::{plan_learning_path, LearningPath, PlanOptions};

const FIXTURE: &str = r#"{
    "aliases": { "bayes": "1", "logs": "20" },
    "teaches": [
        { "parentId": "1", "childId": "10" },
        { "parentId": "1", "childId": "11", "lensIndex": 1 },
        { "parentId": "2", "childId": "12" },
        { "parentId": "3", "childId": "13" },
        { "parentId": "4", "childId": "14" }
    ],
    "requires": [
        { "parentId": "2", "childId": "10" },
        { "parentId": "3", "childId": "10" },
        { "parentId": "2", "childId": "11" },
        { "parentId": "4", "childId": "13" },
        { "parentId": "3", "childId": "14" },
        { "parentId": "5", "childId": "12" }
    ],
    "masteries": {
        "alice": { "2": { "has": true } },
        "carol": { "1": { "wants": true } }
    }
}"#;

fn relations() -> RelationSet {
    RelationSet::from_json(FIXTURE).unwrap()
}

fn ids(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_full_plan_for_new_learner() {
    let graph = plan_learning_path(&relations(), "bob", &ids(&["1"]), &PlanOptions::default())
        .unwrap();

    assert!(graph.is_resolved());

    // "5" is discovered after the first round with no tutor, so it stays untaught.
    let untaught = graph.requirement("5").unwrap();
    assert!(untaught.tutor_ids.is_empty());
    assert_eq!(untaught.cost, PENALTY_COST);

    // 3 <-> 4 through tutors 13 and 14 is a cycle; it must still resolve.
    assert!(graph.requirement("3").unwrap().best_tutor_id.is_some());
    assert!(graph.requirement("4").unwrap().best_tutor_id.is_some());

    // Tutor 10 needs "2" and the cyclic "3"; tutor 11 needs only "2", so it
    // wins despite its lens nudge.
    let target = graph.requirement("1").unwrap();
    assert_eq!(target.best_tutor_id.as_deref(), Some("11"));
}

#[test]
fn test_mastery_changes_the_plan() {
    let graph = plan_learning_path(&relations(), "alice", &ids(&["1"]), &PlanOptions::default())
        .unwrap();

    // Alice already has "2", so it never enters the graph.
    assert!(graph.requirement("2").is_none());
    assert!(graph.tutor("11").unwrap().requirement_ids.is_empty());

    let target = graph.requirement("1").unwrap();
    assert_eq!(target.best_tutor_id.as_deref(), Some("11"));
    // 0 requirements + lens 1 * 10 + 1
    assert_eq!(target.cost, 11);

    let path = LearningPath::from(&graph);
    assert_eq!(path.study_order, vec!["11"]);
}

#[test]
fn test_mastered_target_is_dropped() {
    let mut set = relations();
    set.set_mastery("dave", "1", Mastery::has());

    let graph =
        plan_learning_path(&set, "dave", &ids(&["1"]), &PlanOptions::default()).unwrap();

    assert!(graph.page_ids().is_empty());
    assert_eq!(graph.node_count(), 0);
}

#[test]
fn test_only_wanted_targets() {
    let options = PlanOptions {
        only_wanted: true,
        ..PlanOptions::default()
    };
    let graph = plan_learning_path(&relations(), "carol", &ids(&["1", "20"]), &options).unwrap();

    assert_eq!(graph.page_ids(), &["1".to_string()]);
}

#[test]
fn test_unknown_target_teaches_itself() {
    let graph = plan_learning_path(&relations(), "bob", &ids(&["20"]), &PlanOptions::default())
        .unwrap();

    let target = graph.requirement("20").unwrap();
    assert_eq!(target.tutor_ids, vec!["20"]);
    assert_eq!(target.best_tutor_id.as_deref(), Some("20"));
    assert_eq!(target.cost, 1);
}

#[test]
fn test_planning_is_deterministic() {
    let set = relations();
    let first = plan_learning_path(&set, "bob", &ids(&["1"]), &PlanOptions::default()).unwrap();
    let second = plan_learning_path(&set, "bob", &ids(&["1"]), &PlanOptions::default()).unwrap();

    let first = serde_json::to_string(&LearningPath::from(&first)).unwrap();
    let second = serde_json::to_string(&LearningPath::from(&second)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_wide_chain_costs_saturate() {
    // Every tutor teaches four requirements and needs the four on the next
    // level, so costs grow by a factor of four per level.
    let mut set = RelationSet::new();
    for level in 0..25 {
        let tutor = format!("t{}", level);
        for j in 0..4 {
            set.teaches
                .push(Relation::new(format!("r{}_{}", level, j), tutor.as_str(), 0));
            set.requires
                .push(Relation::new(format!("r{}_{}", level + 1, j), tutor.as_str(), 0));
        }
    }

    let graph =
        plan_learning_path(&set, "bob", &ids(&["r0_0"]), &PlanOptions::default()).unwrap();

    assert_eq!(graph.node_count(), 101);
    assert!(graph.is_resolved());
    assert!(graph.requirements().all(|r| r.cost > 0));
    assert!(graph.tutors().all(|t| t.cost > 0));

    let deepest = graph.tutor("t19").unwrap();
    assert_eq!(deepest.cost, 4 * PENALTY_COST + 1);

    let target = graph.requirement("r0_0").unwrap();
    assert_eq!(target.best_tutor_id.as_deref(), Some("t0"));
    assert_eq!(target.cost, i64::MAX);
}
