//! Backend response fixtures parse into the entity types, and what the
//! client writes back validates against the generated JSON schemas.

use schemars::schema_for;
use serde_json::json;

use daybook_core::entities::*;
use daybook_core::enums::*;
use daybook_core::identity::User;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! parse_and_validate {
    ($name:ident, $ty:ty, $body:expr, |$parsed:ident| $check:block) => {
        #[test]
        fn $name() {
            let $parsed: $ty = serde_json::from_value($body)
                .unwrap_or_else(|e| panic!("{} did not parse: {e}", stringify!($ty)));

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&$parsed).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );

            $check
        }
    };
}

parse_and_validate!(
    user_profile,
    User,
    json!({"id": 4, "email": "ada@example.com", "first_name": "Ada", "last_name": "Lovelace"}),
    |user| {
        assert_eq!(user.display_name(), "Ada Lovelace");
    }
);

parse_and_validate!(
    diary_entry_with_mixed_blocks,
    DiaryEntry,
    json!({
        "id": 12,
        "title": "Lisbon",
        "author": 4,
        "author_email": "ada@example.com",
        "author_name": "Ada Lovelace",
        "content_blocks": [
            {
                "id": 30, "block_type": "text", "order": 0,
                "text_content": "Walked to Belém.", "media_file": null,
                "media_url": null, "caption": "", "created_at": "2024-01-05T10:00:00Z"
            },
            {
                "id": 31, "block_type": "image", "order": 1,
                "text_content": null, "media_file": null,
                "media_url": "https://cdn.example.com/tower.jpg", "caption": "Tower",
                "created_at": "2024-01-05T10:00:00Z"
            }
        ],
        "created_at": "2024-01-05T10:00:00Z",
        "updated_at": "2024-01-05T12:30:00Z"
    }),
    |entry| {
        assert_eq!(entry.content_blocks.len(), 2);
        assert_eq!(entry.content_blocks[1].block_type(), BlockType::Image);
        assert_eq!(entry.content_blocks[1].caption, "Tower");
    }
);

parse_and_validate!(
    diary_stats,
    DiaryStats,
    json!({
        "total_entries": 40,
        "entries_this_month": 6,
        "entries_this_week": 2,
        "total_blocks": 95,
        "block_distribution": [
            {"block_type": "text", "count": 80},
            {"block_type": "image", "count": 15}
        ]
    }),
    |stats| {
        assert_eq!(stats.block_distribution.len(), 2);
    }
);

parse_and_validate!(
    habit_log_from_list,
    HabitLog,
    json!({
        "id": 5, "habit": 3, "habit_name": "Drink water", "habit_color": "#10B981",
        "habit_tracking_type": "counter", "habit_target_value": 8,
        "date": "2024-01-05", "value": 6, "completed": false, "notes": "",
        "created_at": "2024-01-05T20:00:00Z"
    }),
    |log| {
        assert_eq!(log.habit_name.as_deref(), Some("Drink water"));
        assert!(!log.completed);
    }
);

parse_and_validate!(
    habit_stats,
    HabitStats,
    json!({
        "total_logs": 20, "completed_logs": 15, "completion_rate": 75.0,
        "average_value": 6.5, "last_30_days_logs": 18
    }),
    |stats| {
        assert!((stats.completion_rate - 75.0).abs() < f64::EPSILON);
    }
);

parse_and_validate!(
    reflection_with_responses,
    Reflection,
    json!({
        "id": 9,
        "user_email": "ada@example.com",
        "date": "2024-01-05",
        "notes": "Long day",
        "responses": [
            {"id": 1, "question_id": 1, "question_text": "Energy?", "question_type": "range",
             "range_response": 7, "choice_response": null, "text_response": null},
            {"id": 2, "question_id": 2, "question_text": "Mood?", "question_type": "choice",
             "range_response": null, "choice_response": "Good", "text_response": null}
        ],
        "created_at": "2024-01-05T21:00:00Z",
        "updated_at": "2024-01-05T21:00:00Z"
    }),
    |reflection| {
        assert_eq!(reflection.responses[0].range_response, Some(7));
        assert_eq!(
            reflection.responses[1].question_type,
            Some(QuestionType::Choice)
        );
    }
);

parse_and_validate!(
    reflection_stats,
    ReflectionStats,
    json!({
        "total_reflections": 12,
        "days_analyzed": 30,
        "current_streak": 3,
        "question_averages": [
            {"question_id": 1, "question_text": "Energy?", "average": 6.25, "count": 12}
        ]
    }),
    |stats| {
        assert_eq!(stats.question_averages[0].count, 12);
    }
);

parse_and_validate!(
    dashboard_stats,
    DashboardStats,
    json!({
        "overview": {
            "total_reflections": 2, "days_analyzed": 30, "current_streak": 2,
            "start_date": "2023-12-07", "end_date": "2024-01-05"
        },
        "questions": [
            {
                "question_id": 1, "question_text": "Energy?", "question_type": "range",
                "category": "health", "color_mapping": {"1": "#ef4444", "10": "#22c55e"},
                "line_chart": {
                    "data": [
                        {"date": "2024-01-04", "value": 5, "color": "#eab308"},
                        {"date": "2024-01-05", "value": 7, "color": "#22c55e"}
                    ],
                    "statistics": {"average": 6.0, "min": 5, "max": 7, "count": 2}
                },
                "heatmap": [
                    {"date": "2024-01-04", "value": 5, "color": "#eab308", "intensity": 0.5},
                    {"date": "2024-01-05", "value": 7, "color": "#22c55e", "intensity": 0.7}
                ],
                "distribution": {
                    "5": {"count": 1, "percentage": 50.0, "color": "#eab308"},
                    "7": {"count": 1, "percentage": 50.0, "color": "#22c55e"}
                }
            },
            {
                "question_id": 2, "question_text": "Mood?", "question_type": "choice",
                "category": "general", "color_mapping": null,
                "line_chart": {
                    "datasets": [
                        {"label": "Good", "color": "#22c55e",
                         "data": [{"date": "2024-01-05", "selected": true, "value": 1}]}
                    ],
                    "total_responses": 1
                },
                "heatmap": [],
                "distribution": {"Good": {"count": 1, "percentage": 100.0, "color": "#22c55e"}}
            }
        ]
    }),
    |stats| {
        assert_eq!(stats.questions.len(), 2);
        assert!(matches!(stats.questions[0].line_chart, Some(LineChart::Series(_))));
        assert!(matches!(stats.questions[1].line_chart, Some(LineChart::Choices(_))));
    }
);

#[test]
fn new_entry_body_validates() {
    let draft = DiaryEntryDraft {
        title: "Draft".into(),
        content_blocks: vec![ContentBlock {
            id: None,
            order: 0,
            content: BlockContent::Text {
                text: "Hello".into(),
            },
            caption: String::new(),
        }],
    };
    let schema = serde_json::to_value(schema_for!(DiaryEntryDraft)).unwrap();
    let instance = serde_json::to_value(&draft).unwrap();
    assert!(validate_against_schema(&schema, &instance).is_empty());
    assert_eq!(instance["content_blocks"][0]["text_content"], "Hello");
}
