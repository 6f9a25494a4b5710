use chorequest_core::profile::AgeBracket;
use chorequest_core::quest::{QuestNarrator, QuestRequest};
use chorequest_core::task::ChoreType;
use chorequest_narrative::TemplateNarrator;

fn request(age_bracket: AgeBracket, chore_type: ChoreType) -> QuestRequest {
    QuestRequest {
        quest_type: "daily".to_string(),
        task_id: 7,
        title: "Clean room".to_string(),
        description: "Tidy up and vacuum".to_string(),
        chore_type,
        age_bracket,
        theme: "Fantasy".to_string(),
    }
}

#[tokio::test]
async fn test_narration_mentions_task_and_theme() {
    let narrator = TemplateNarrator::new().unwrap();

    let narration = narrator
        .narrate(&request(AgeBracket::Ages4To8, ChoreType::Cleaning))
        .await
        .expect("Should narrate");

    assert!(narration.mission_text.contains("Clean room"));
    assert!(narration.mission_text.contains("Fantasy"));
    assert!(!narration.encouragement.is_empty());
    assert!(!narration.tips.is_empty());
}

#[tokio::test]
async fn test_tone_varies_by_age_bracket() {
    let narrator = TemplateNarrator::new().unwrap();

    let kids = narrator
        .narrate(&request(AgeBracket::Ages4To8, ChoreType::Cleaning))
        .await
        .unwrap();
    let adult = narrator
        .narrate(&request(AgeBracket::Adult, ChoreType::Cleaning))
        .await
        .unwrap();

    assert_ne!(kids.mission_text, adult.mission_text);
    assert_ne!(kids.encouragement, adult.encouragement);
}

#[tokio::test]
async fn test_tips_vary_by_chore_type() {
    let narrator = TemplateNarrator::new().unwrap();

    let cleaning = narrator
        .narrate(&request(AgeBracket::Ages9To12, ChoreType::Cleaning))
        .await
        .unwrap();
    let outdoor = narrator
        .narrate(&request(AgeBracket::Ages9To12, ChoreType::Outdoor))
        .await
        .unwrap();

    assert_ne!(cleaning.tips, outdoor.tips);
}

#[tokio::test]
async fn test_same_request_is_deterministic() {
    let narrator = TemplateNarrator::new().unwrap();
    let req = request(AgeBracket::Ages13To17, ChoreType::Homework);

    let first = narrator.narrate(&req).await.unwrap();
    let second = narrator.narrate(&req).await.unwrap();

    assert_eq!(first, second);
}
