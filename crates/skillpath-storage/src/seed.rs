//! The demo catalog: five roadmaps with seeded trees, entry assessments, a
//! default collection, and the seeded progress rows a fresh profile starts
//! with.
//!
//! Seeded leaf statuses matter: they exercise the carry-over rule (a leaf
//! with no recorded result keeps its seeded status), so a freshly seeded
//! profile already renders a partially started AI track before any test is
//! taken. The seeded progress rows are the original platform's canned
//! response; the first refresh replaces them with computed values.

use skillpath_core::{
    AssessmentOption, AssessmentQuestion, Roadmap, RoadmapAssessment, RoadmapId, RoadmapLevel,
    RoadmapProgress, TopicNode,
};

use crate::error::StorageError;
use crate::traits::ProgressStore;

use skillpath_core::TopicStatus::{Completed, InProgress, Locked, NotStarted};

/// Seeds the demo catalog into an empty store.
///
/// Fails with [`StorageError::DuplicateRoadmap`] when the catalog already
/// holds any of the seeded roadmaps, so seeding is safe to attempt but never
/// silently re-applied.
pub fn seed_catalog<S>(store: &mut S) -> Result<(), StorageError>
where
    S: ProgressStore + ?Sized,
{
    for (roadmap, tree) in catalog() {
        store.insert_roadmap(&roadmap, &tree)?;
    }
    for assessment in assessments() {
        store.insert_assessment(&assessment)?;
    }

    store.set_collection(&[RoadmapId::new("ai"), RoadmapId::new("frontend")])?;

    // Seeded summaries from the original canned response -- note the ai
    // total is the canned value, not the tree's leaf count; a refresh
    // recomputes both.
    store.upsert_progress(&RoadmapProgress {
        roadmap_id: RoadmapId::new("ai"),
        completion_percent: 34,
        completed_topics: 3,
        total_topics: 9,
    })?;
    store.upsert_progress(&RoadmapProgress {
        roadmap_id: RoadmapId::new("frontend"),
        completion_percent: 25,
        completed_topics: 2,
        total_topics: 8,
    })?;

    Ok(())
}

fn roadmap(
    id: &str,
    title: &str,
    description: &str,
    level: RoadmapLevel,
    recommended: bool,
) -> Roadmap {
    Roadmap {
        id: RoadmapId::new(id),
        title: title.into(),
        description: description.into(),
        level,
        recommended,
    }
}

fn catalog() -> Vec<(Roadmap, Vec<TopicNode>)> {
    vec![
        (
            roadmap(
                "ai",
                "Artificial Intelligence",
                "Complete AI engineering path",
                RoadmapLevel::Intermediate,
                true,
            ),
            ai_tree(),
        ),
        (
            roadmap(
                "frontend",
                "Frontend Development",
                "Modern UI engineering",
                RoadmapLevel::Beginner,
                true,
            ),
            frontend_tree(),
        ),
        (
            roadmap(
                "backend",
                "Backend Development",
                "Server-side & APIs",
                RoadmapLevel::Intermediate,
                true,
            ),
            backend_tree(),
        ),
        (
            roadmap(
                "devops",
                "DevOps Engineering",
                "CI/CD, Docker, Cloud",
                RoadmapLevel::Advanced,
                false,
            ),
            devops_tree(),
        ),
        (
            roadmap(
                "mobile",
                "Mobile Development",
                "Flutter / React Native",
                RoadmapLevel::Beginner,
                false,
            ),
            mobile_tree(),
        ),
    ]
}

fn ai_tree() -> Vec<TopicNode> {
    vec![
        TopicNode::group(
            "ai-foundations",
            "AI Foundations",
            Completed,
            vec![
                TopicNode::group(
                    "ai-history-track",
                    "Historical Context",
                    Completed,
                    vec![
                        TopicNode::leaf("history-of-ai", "History of AI", Completed),
                        TopicNode::leaf("data-preprocessing", "Data Preprocessing", InProgress),
                    ],
                ),
                TopicNode::group(
                    "ai-ml-track",
                    "Machine Learning Basics",
                    InProgress,
                    vec![
                        TopicNode::leaf("ml-intro", "Machine Learning Intro", InProgress),
                        TopicNode::leaf("model-evaluation", "Model Evaluation", NotStarted),
                    ],
                ),
            ],
        ),
        TopicNode::group(
            "ai-deep-learning",
            "Deep Learning",
            NotStarted,
            vec![
                TopicNode::group(
                    "ai-nn-track",
                    "Neural Network Core",
                    NotStarted,
                    vec![
                        TopicNode::leaf("neural-networks", "Neural Networks", NotStarted),
                        TopicNode::leaf("optimization-basics", "Optimization Basics", Locked),
                    ],
                ),
                TopicNode::group(
                    "ai-cnn-track",
                    "Computer Vision Path",
                    Locked,
                    vec![
                        TopicNode::leaf("cnn", "CNN", Locked),
                        TopicNode::leaf("transformers-basics", "Transformers Basics", Locked),
                    ],
                ),
            ],
        ),
    ]
}

fn frontend_tree() -> Vec<TopicNode> {
    vec![
        TopicNode::group(
            "fe-layout-foundation",
            "HTML & CSS Foundation",
            Completed,
            vec![
                TopicNode::group(
                    "fe-flex-layout",
                    "One-dimensional Layout",
                    Completed,
                    vec![
                        TopicNode::leaf("flexbox", "Flexbox", Completed),
                        TopicNode::leaf("responsive-design", "Responsive Design", InProgress),
                    ],
                ),
                TopicNode::group(
                    "fe-grid-layout",
                    "Two-dimensional Layout",
                    InProgress,
                    vec![
                        TopicNode::leaf("grid", "CSS Grid", InProgress),
                        TopicNode::leaf("css-architecture", "CSS Architecture", NotStarted),
                    ],
                ),
            ],
        ),
        TopicNode::group(
            "fe-vue-foundation",
            "Vue 3",
            NotStarted,
            vec![
                TopicNode::group(
                    "fe-comp-api",
                    "Component Architecture",
                    NotStarted,
                    vec![
                        TopicNode::leaf("composition-api", "Composition API", NotStarted),
                        TopicNode::leaf("vue-lifecycle", "Vue Lifecycle", Locked),
                    ],
                ),
                TopicNode::group(
                    "fe-state-layer",
                    "State Layer",
                    Locked,
                    vec![
                        TopicNode::leaf("pinia", "State Management (Pinia)", Locked),
                        TopicNode::leaf("vue-router-basics", "Vue Router Basics", Locked),
                    ],
                ),
            ],
        ),
    ]
}

fn backend_tree() -> Vec<TopicNode> {
    vec![TopicNode::group(
        "be-node-path",
        "Node.js",
        NotStarted,
        vec![
            TopicNode::group(
                "be-api-layer",
                "API Layer",
                NotStarted,
                vec![
                    TopicNode::leaf("express", "Express", NotStarted),
                    TopicNode::leaf("rest-design", "REST Design", Locked),
                ],
            ),
            TopicNode::group(
                "be-security-layer",
                "Security Layer",
                Locked,
                vec![
                    TopicNode::leaf("auth", "Authentication", Locked),
                    TopicNode::leaf("role-based-access", "Role-Based Access", Locked),
                ],
            ),
            TopicNode::group(
                "be-data-layer",
                "Data Layer",
                Locked,
                vec![TopicNode::leaf(
                    "database-indexing",
                    "Database Indexing",
                    Locked,
                )],
            ),
        ],
    )]
}

fn devops_tree() -> Vec<TopicNode> {
    vec![TopicNode::group(
        "devops-containers",
        "Containers",
        NotStarted,
        vec![
            TopicNode::group(
                "devops-docker-path",
                "Docker Fundamentals",
                NotStarted,
                vec![
                    TopicNode::leaf("docker-basics", "Docker Basics", NotStarted),
                    TopicNode::leaf("docker-networking", "Docker Networking", Locked),
                ],
            ),
            TopicNode::group(
                "devops-cicd-path",
                "Automation Path",
                Locked,
                vec![
                    TopicNode::leaf("cicd-pipelines", "CI/CD Pipelines", Locked),
                    TopicNode::leaf("monitoring-basics", "Monitoring Basics", Locked),
                ],
            ),
        ],
    )]
}

fn mobile_tree() -> Vec<TopicNode> {
    vec![TopicNode::group(
        "mobile-core",
        "Mobile Core",
        NotStarted,
        vec![TopicNode::group(
            "mobile-flutter-track",
            "Flutter Track",
            NotStarted,
            vec![
                TopicNode::leaf("flutter", "Flutter", NotStarted),
                TopicNode::leaf("dart-basics", "Dart Basics", Locked),
                TopicNode::leaf("state-management-mobile", "State Management", Locked),
                TopicNode::leaf("app-deployment", "App Deployment", Locked),
            ],
        )],
    )]
}

fn default_options() -> Vec<AssessmentOption> {
    vec![
        AssessmentOption {
            id: "opt_beginner".into(),
            label: "I am just getting started".into(),
            score: 1,
        },
        AssessmentOption {
            id: "opt_intermediate".into(),
            label: "I have hands-on experience with real tasks".into(),
            score: 2,
        },
        AssessmentOption {
            id: "opt_advanced".into(),
            label: "I apply this confidently in production".into(),
            score: 3,
        },
    ]
}

fn assessment(roadmap_id: &str, title: &str, questions: &[(&str, &str)]) -> RoadmapAssessment {
    RoadmapAssessment {
        roadmap_id: RoadmapId::new(roadmap_id),
        title: title.into(),
        questions: questions
            .iter()
            .map(|(id, text)| AssessmentQuestion {
                id: (*id).into(),
                text: (*text).into(),
                options: default_options(),
            })
            .collect(),
    }
}

fn assessments() -> Vec<RoadmapAssessment> {
    vec![
        assessment(
            "ai",
            "AI assessment",
            &[
                ("ai_math", "How would you rate your math skills for ML?"),
                ("ai_models", "Do you have experience training models?"),
                ("ai_frameworks", "How confident are you with ML frameworks?"),
                (
                    "ai_data",
                    "How comfortable are you preparing and cleaning datasets?",
                ),
                (
                    "ai_metrics",
                    "How well do you understand evaluation metrics (precision/recall/F1)?",
                ),
                (
                    "ai_deploy",
                    "Have you deployed ML/AI models to real environments?",
                ),
            ],
        ),
        assessment(
            "frontend",
            "Frontend assessment",
            &[
                (
                    "fe_layout",
                    "How confident are you with responsive layouts?",
                ),
                ("fe_js", "What is your current JavaScript level?"),
                (
                    "fe_framework",
                    "Do you have experience with modern UI frameworks?",
                ),
                (
                    "fe_accessibility",
                    "How often do you apply accessibility best practices?",
                ),
                (
                    "fe_state",
                    "How confident are you with state management patterns?",
                ),
                (
                    "fe_perf",
                    "How comfortable are you optimizing frontend performance?",
                ),
            ],
        ),
        assessment(
            "backend",
            "Backend assessment",
            &[
                ("be_api", "How confident are you designing REST APIs?"),
                ("be_db", "Do you have experience with SQL/NoSQL databases?"),
                (
                    "be_auth",
                    "How would you rate your experience with auth and security?",
                ),
                (
                    "be_scaling",
                    "How comfortable are you with scaling backend services?",
                ),
                (
                    "be_cache",
                    "Do you use caching strategies (Redis/CDN/in-memory)?",
                ),
                (
                    "be_observability",
                    "How confident are you with logs, metrics, and tracing?",
                ),
            ],
        ),
        assessment(
            "devops",
            "DevOps assessment",
            &[
                ("devops_ci", "How familiar are you with CI/CD pipelines?"),
                (
                    "devops_containers",
                    "Do you have experience with Docker/Kubernetes?",
                ),
                (
                    "devops_cloud",
                    "How confident are you with cloud providers?",
                ),
                (
                    "devops_iac",
                    "How comfortable are you with Infrastructure as Code?",
                ),
                (
                    "devops_monitoring",
                    "Do you set up monitoring and alerting in projects?",
                ),
                (
                    "devops_security",
                    "How confident are you with DevSecOps practices?",
                ),
            ],
        ),
        assessment(
            "mobile",
            "Mobile assessment",
            &[
                (
                    "mobile_ui",
                    "Do you have experience building mobile UIs?",
                ),
                ("mobile_state", "How confident are you managing app state?"),
                (
                    "mobile_release",
                    "Do you have experience publishing apps to stores?",
                ),
                (
                    "mobile_arch",
                    "How comfortable are you with mobile architecture patterns?",
                ),
                (
                    "mobile_perf",
                    "How confident are you with mobile performance optimization?",
                ),
                (
                    "mobile_testing",
                    "Do you write automated tests for mobile apps?",
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;

    #[test]
    fn seeds_five_roadmaps_in_catalog_order() {
        let mut store = InMemoryStore::new();
        seed_catalog(&mut store).unwrap();

        let listed = store.list_roadmaps().unwrap();
        let ids: Vec<&str> = listed.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["ai", "frontend", "backend", "devops", "mobile"]);
    }

    #[test]
    fn seeded_topic_counts_match_the_trees() {
        let mut store = InMemoryStore::new();
        seed_catalog(&mut store).unwrap();

        let listed = store.list_roadmaps().unwrap();
        let by_id: Vec<(&str, u32)> = listed
            .iter()
            .map(|s| (s.id.as_str(), s.total_topics))
            .collect();
        assert_eq!(
            by_id,
            [
                ("ai", 8),
                ("frontend", 8),
                ("backend", 5),
                ("devops", 4),
                ("mobile", 4),
            ]
        );
    }

    #[test]
    fn default_collection_is_ai_and_frontend() {
        let mut store = InMemoryStore::new();
        seed_catalog(&mut store).unwrap();

        let collection = store.collection().unwrap();
        let ids: Vec<&str> = collection.iter().map(RoadmapId::as_str).collect();
        assert_eq!(ids, ["ai", "frontend"]);
    }

    #[test]
    fn every_roadmap_has_a_six_question_assessment() {
        let mut store = InMemoryStore::new();
        seed_catalog(&mut store).unwrap();

        for summary in store.list_roadmaps().unwrap() {
            let assessment = store.get_assessment(&summary.id).unwrap();
            assert_eq!(assessment.questions.len(), 6);
            assert_eq!(assessment.max_score(), 18);
        }
    }

    #[test]
    fn reseeding_is_rejected() {
        let mut store = InMemoryStore::new();
        seed_catalog(&mut store).unwrap();
        assert!(matches!(
            seed_catalog(&mut store),
            Err(StorageError::DuplicateRoadmap { .. })
        ));
    }

    #[test]
    fn seeded_progress_rows_are_present() {
        let mut store = InMemoryStore::new();
        seed_catalog(&mut store).unwrap();

        let ai = store
            .get_progress(&RoadmapId::new("ai"))
            .unwrap()
            .unwrap();
        assert_eq!(ai.completion_percent, 34);
        assert!(store
            .get_progress(&RoadmapId::new("devops"))
            .unwrap()
            .is_none());
    }
}
