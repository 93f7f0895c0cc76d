use serde::{Deserialize, Serialize};

pub const TRAVEL_PLANNER_NAME: &str = "Travel Planner";

pub const TRAVEL_PLANNER_INSTRUCTION: &str = "You're a smart travel assistant. Based on user \
preferences, suggest destinations, create detailed itineraries, estimate budgets, share \
visa/weather info, and give travel tips. Always be concise, friendly, and practical.";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_instruction")]
    pub instruction: String,

    #[serde(default)]
    pub temperature: Option<f32>,

    #[serde(default)]
    pub max_tokens: Option<u32>,
}

fn default_name() -> String {
    TRAVEL_PLANNER_NAME.to_string()
}

fn default_instruction() -> String {
    TRAVEL_PLANNER_INSTRUCTION.to_string()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            instruction: default_instruction(),
            temperature: None,
            max_tokens: None,
        }
    }
}

impl AgentConfig {
    pub fn new(name: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
            ..Default::default()
        }
    }

    pub fn travel_planner() -> Self {
        Self::default()
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}
