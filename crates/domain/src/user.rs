use crate::shared::entity::{Entity, ID};

#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub full_name: String,
}

impl User {
    pub fn new(email: &str, full_name: &str) -> Self {
        Self {
            id: Default::default(),
            email: email.into(),
            full_name: full_name.into(),
        }
    }
}

impl Entity for User {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
