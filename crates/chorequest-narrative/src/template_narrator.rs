//! Template-based quest narrator.
//!
//! Renders mission text from Jinja2 templates: deterministic, offline, and
//! tone-adjusted by age bracket and world theme. This is the default
//! narrator and the test double for the remote one.

use async_trait::async_trait;
use minijinja::{Environment, context};

use chorequest_core::error::{ChoreError, Result};
use chorequest_core::profile::AgeBracket;
use chorequest_core::quest::{QuestNarration, QuestNarrator, QuestRequest};
use chorequest_core::task::ChoreType;

const MISSION_TEMPLATE: &str = r#"{% if tone == "playful" -%}
Brave explorer of the {{ theme }} world, a {{ quest_type }} quest awaits you: {{ title }}! {% if description %}Your mission: {{ description }}. {% endif %}Complete it to earn your reward!
{%- elif tone == "adventurous" -%}
A {{ quest_type }} challenge has appeared in the {{ theme }} world: {{ title }}. {% if description %}{{ description }}. {% endif %}Finish it and claim the points.
{%- else -%}
{{ title }}{% if description %} - {{ description }}{% endif %}. Marked as a {{ quest_type }} task; points are credited on completion.
{%- endif %}"#;

const ENCOURAGEMENT_TEMPLATE: &str = r#"{% if tone == "playful" -%}
You can do it, hero of {{ theme }}!
{%- elif tone == "adventurous" -%}
The {{ theme }} world is counting on you.
{%- else -%}
Steady progress beats a perfect start.
{%- endif %}"#;

/// Deterministic narrator rendering from built-in templates.
pub struct TemplateNarrator {
    env: Environment<'static>,
}

impl TemplateNarrator {
    /// Creates a narrator with the built-in template set.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("mission", MISSION_TEMPLATE)
            .map_err(|e| ChoreError::internal(format!("invalid mission template: {e}")))?;
        env.add_template("encouragement", ENCOURAGEMENT_TEMPLATE)
            .map_err(|e| ChoreError::internal(format!("invalid encouragement template: {e}")))?;
        Ok(Self { env })
    }

    fn tone(age_bracket: AgeBracket) -> &'static str {
        match age_bracket {
            AgeBracket::Ages4To8 => "playful",
            AgeBracket::Ages9To12 | AgeBracket::Ages13To17 => "adventurous",
            AgeBracket::Adult => "plain",
        }
    }

    fn tips(chore_type: ChoreType) -> Vec<String> {
        let tips: &[&str] = match chore_type {
            ChoreType::Cleaning => &[
                "Start from the top and work your way down",
                "Put things back where they live as you go",
                "A timer makes a race out of it",
            ],
            ChoreType::Homework => &[
                "Find a quiet spot before you start",
                "Do the hardest part first",
                "Short breaks keep your brain fresh",
            ],
            ChoreType::Outdoor => &[
                "Check the weather before heading out",
                "Gloves save your hands",
                "Stack tools in one spot when you finish",
            ],
            ChoreType::Misc => &[
                "Break it into small steps",
                "Ask for help if you get stuck",
            ],
        };
        tips.iter().map(|t| t.to_string()).collect()
    }

    fn render(&self, name: &str, request: &QuestRequest, tone: &str) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| ChoreError::narrative_unavailable(e.to_string()))?;
        template
            .render(context! {
                tone => tone,
                quest_type => &request.quest_type,
                title => &request.title,
                description => &request.description,
                theme => &request.theme,
            })
            .map_err(|e| ChoreError::narrative_unavailable(e.to_string()))
    }
}

#[async_trait]
impl QuestNarrator for TemplateNarrator {
    async fn narrate(&self, request: &QuestRequest) -> Result<QuestNarration> {
        let tone = Self::tone(request.age_bracket);
        Ok(QuestNarration {
            mission_text: self.render("mission", request, tone)?,
            encouragement: self.render("encouragement", request, tone)?,
            tips: Self::tips(request.chore_type),
        })
    }
}
