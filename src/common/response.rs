use serde::Serialize;
use utoipa::ToSchema;

// Resposta padrão dos DELETEs: { "message": ..., "status": 200 }
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Client deleted successfully.")]
    pub message: String,
    #[schema(example = 200)]
    pub status: u16,
}

impl MessageResponse {
    pub fn deleted(entity: &str) -> Self {
        Self {
            message: format!("{} deleted successfully.", entity),
            status: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleted_message_names_the_entity() {
        let body = serde_json::to_value(MessageResponse::deleted("Insurance type")).unwrap();
        assert_eq!(body["message"], "Insurance type deleted successfully.");
        assert_eq!(body["status"], 200);
    }
}
