use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema, Debug)]
pub struct CheckRequest {
    /// The student's writing. `prompt` is accepted as an alias.
    #[serde(default, alias = "prompt")]
    pub text: String,
}
