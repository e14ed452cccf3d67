use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Priority {
    #[serde(rename = "must_know_cold")]
    Critical,
    #[serde(rename = "know_well")]
    Important,
    #[serde(rename = "conceptual_awareness")]
    Awareness,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Important => "Important",
            Self::Awareness => "Awareness",
            Self::Unknown => "Unrated",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct InterviewQa {
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub ads_context: Option<String>,
    #[serde(default, rename = "tscRelevance", alias = "relevanceNote")]
    pub relevance_note: Option<String>,
    #[serde(default)]
    pub key_details: Vec<String>,
    #[serde(default)]
    pub interview_questions: Vec<String>,
    #[serde(default, rename = "interviewQA")]
    pub interview_qa: Vec<InterviewQa>,
    #[serde(default)]
    pub sql_connection: Option<String>,
    #[serde(default)]
    pub troubleshooting: Option<Troubleshooting>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub funnel_stage: Option<String>,
    #[serde(default)]
    pub data_flow_in: Option<String>,
    #[serde(default)]
    pub data_flow_out: Option<String>,
    #[serde(default)]
    pub phase_number: Option<u32>,
    #[serde(default)]
    pub children: Vec<KnowledgeNode>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CauseProbability {
    High,
    Medium,
    #[default]
    #[serde(other)]
    Low,
}

impl CauseProbability {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TroubleshootingCause {
    pub issue: String,
    #[serde(default)]
    pub probability: CauseProbability,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub verification: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Troubleshooting {
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub diagnostic_questions: Vec<String>,
    #[serde(default)]
    pub causes: Vec<TroubleshootingCause>,
}

impl Troubleshooting {
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty() && self.diagnostic_questions.is_empty() && self.causes.is_empty()
    }
}

impl KnowledgeNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub interview_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsiderationKind {
    Warning,
    Success,
    #[default]
    #[serde(other)]
    Info,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Consideration {
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: ConsiderationKind,
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorkflowStep {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub considerations: Vec<Consideration>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Workflow {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyProcess {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub criticality: Priority,
    #[serde(default)]
    pub related_nodes: Vec<String>,
    #[serde(default)]
    pub workflow: Option<Workflow>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleProduct {
    pub product: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub phases_involved: Vec<String>,
    #[serde(default)]
    pub data_sent: String,
    #[serde(default)]
    pub data_received: String,
    #[serde(default, rename = "commonTscIssues", alias = "commonIssues")]
    pub common_issues: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub name: String,
    #[serde(default)]
    pub core_products: Vec<String>,
    #[serde(default)]
    pub core_strength: String,
    #[serde(default)]
    pub threat_to_google: String,
    #[serde(default)]
    pub google_response: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyConcept {
    pub concept: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub ads_context: String,
    #[serde(default)]
    pub affected_phases: Vec<String>,
}

/// Reference tables that span phases rather than sitting in the tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossCutting {
    #[serde(default)]
    pub google_ecosystem: Vec<GoogleProduct>,
    #[serde(default)]
    pub competitors: Vec<Competitor>,
    #[serde(default)]
    pub privacy_consent: Vec<PrivacyConcept>,
}

impl CrossCutting {
    pub fn is_empty(&self) -> bool {
        self.google_ecosystem.is_empty()
            && self.competitors.is_empty()
            && self.privacy_consent.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleData {
    #[serde(default)]
    pub meta: Meta,
    pub phases: Vec<KnowledgeNode>,
    #[serde(default)]
    pub cross_cutting: CrossCutting,
    #[serde(default)]
    pub key_processes: Vec<KeyProcess>,
}
