mod model;
mod parse;
mod store;

pub use model::{
    CauseProbability, Competitor, Consideration, ConsiderationKind, CrossCutting, GoogleProduct,
    InterviewQa, KeyProcess, KnowledgeNode, LifecycleData, Meta, PrivacyConcept, Priority,
    Troubleshooting, TroubleshootingCause, Workflow, WorkflowStep,
};
pub use parse::{BUNDLED_LIFECYCLE_JSON, load_store, parse_lifecycle_json, read_lifecycle_file};
pub use store::{Breadcrumb, ContentError, ContentStore, MAX_TREE_DEPTH, NodeMatch};
