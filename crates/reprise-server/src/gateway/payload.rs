use serde::{Deserialize, Serialize};

use reprise::Citation;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AskResponse {
    pub response: String,
    pub citations: Vec<Citation>,
}
