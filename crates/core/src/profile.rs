//! Expected field schemas for the records the backend is asked to produce.
//!
//! Profile records (heroes, villains) require only the name field; every
//! other attribute is optional and falls back to the explicit "unknown"
//! marker. Comic plot records require both the title and the summary.

use crate::sanitize::{FieldKind, FieldSpec};

/// Schema for a generated hero profile.
pub const HERO_SCHEMA: &[FieldSpec] = &[
    FieldSpec { name: "hero_name", kind: FieldKind::Text, required: true },
    FieldSpec { name: "real_name", kind: FieldKind::Text, required: false },
    FieldSpec { name: "age", kind: FieldKind::Integer, required: false },
    FieldSpec { name: "origin", kind: FieldKind::Text, required: false },
    FieldSpec { name: "height_cm", kind: FieldKind::Integer, required: false },
    FieldSpec { name: "weight_kg", kind: FieldKind::Integer, required: false },
    FieldSpec { name: "eye_color", kind: FieldKind::Text, required: false },
    FieldSpec { name: "hair_color", kind: FieldKind::Text, required: false },
    FieldSpec { name: "powers", kind: FieldKind::Text, required: false },
    FieldSpec { name: "strength_level", kind: FieldKind::Integer, required: false },
    FieldSpec { name: "speed_level", kind: FieldKind::Integer, required: false },
    FieldSpec { name: "durability_level", kind: FieldKind::Integer, required: false },
    FieldSpec { name: "intelligence_level", kind: FieldKind::Integer, required: false },
    FieldSpec { name: "weaknesses", kind: FieldKind::Text, required: false },
    FieldSpec { name: "strengths", kind: FieldKind::Text, required: false },
    FieldSpec { name: "description", kind: FieldKind::Text, required: false },
];

/// Schema for a generated villain profile. Identical attribute set to
/// heroes apart from the name field.
pub const VILLAIN_SCHEMA: &[FieldSpec] = &[
    FieldSpec { name: "villain_name", kind: FieldKind::Text, required: true },
    FieldSpec { name: "real_name", kind: FieldKind::Text, required: false },
    FieldSpec { name: "age", kind: FieldKind::Integer, required: false },
    FieldSpec { name: "origin", kind: FieldKind::Text, required: false },
    FieldSpec { name: "height_cm", kind: FieldKind::Integer, required: false },
    FieldSpec { name: "weight_kg", kind: FieldKind::Integer, required: false },
    FieldSpec { name: "eye_color", kind: FieldKind::Text, required: false },
    FieldSpec { name: "hair_color", kind: FieldKind::Text, required: false },
    FieldSpec { name: "powers", kind: FieldKind::Text, required: false },
    FieldSpec { name: "strength_level", kind: FieldKind::Integer, required: false },
    FieldSpec { name: "speed_level", kind: FieldKind::Integer, required: false },
    FieldSpec { name: "durability_level", kind: FieldKind::Integer, required: false },
    FieldSpec { name: "intelligence_level", kind: FieldKind::Integer, required: false },
    FieldSpec { name: "weaknesses", kind: FieldKind::Text, required: false },
    FieldSpec { name: "strengths", kind: FieldKind::Text, required: false },
    FieldSpec { name: "description", kind: FieldKind::Text, required: false },
];

/// Schema for a generated comic plot summary.
pub const COMIC_SCHEMA: &[FieldSpec] = &[
    FieldSpec { name: "summary_title", kind: FieldKind::Text, required: true },
    FieldSpec { name: "summary", kind: FieldKind::Text, required: true },
];
