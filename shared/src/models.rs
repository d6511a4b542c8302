//! Data models for the ExerciseDB API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::types::CreateExerciseRequest;

/// Exercise document as stored in the `exercises` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Caller-supplied unique identifier
    #[schema(example = "KCBKjma")]
    pub exercise_id: String,
    #[schema(example = "Band Jack Knife Sit-up")]
    pub name: String,
    #[schema(example = "https://ucarecdn.com/05fcc879-04d4-4222-8896-e3772a8a3060/KCBKjma.gif")]
    pub gif_url: String,
    #[schema(example = json!(["abs"]))]
    pub target_muscles: Vec<String>,
    #[schema(example = json!(["waist", "back"]))]
    pub body_parts: Vec<String>,
    #[schema(example = json!(["band"]))]
    pub equipments: Vec<String>,
    #[schema(example = json!(["abs", "lats"]))]
    pub secondary_muscles: Vec<String>,
    /// Step-by-step instructions, in order
    #[schema(example = json!(["Step 1: Start with...", "Step 2: Move into..."]))]
    pub instructions: Vec<String>,
}

impl From<CreateExerciseRequest> for Exercise {
    fn from(req: CreateExerciseRequest) -> Self {
        Self {
            exercise_id: req.exercise_id,
            name: req.name,
            gif_url: req.gif_url,
            target_muscles: req.target_muscles,
            body_parts: req.body_parts,
            equipments: req.equipments,
            secondary_muscles: req.secondary_muscles,
            instructions: req.instructions,
        }
    }
}

/// Role assigned to a user account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Member,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Member => "member",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "member" => Ok(UserRole::Member),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("Unknown user role: {}", other)),
        }
    }
}

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub is_activated: bool,
    /// Base32 TOTP secret; only ever returned to the client on registration
    #[serde(skip_serializing)]
    pub otp_secret: String,
    pub created_at: DateTime<Utc>,
}
