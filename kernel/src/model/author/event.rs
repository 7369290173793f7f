#[derive(Debug)]
pub struct CreateAuthor {
    pub name: String,
    pub api_id: Option<String>,
}
