//! Prompt construction for the generative backend.
//!
//! Entity profiles are resolved from storage and inlined as JSON; the
//! backend is never trusted to look anything up itself. Every prompt ends
//! with the exact output schema the sanitizer will enforce.

use comicgen_db::models::hero::Hero;
use comicgen_db::models::villain::Villain;

/// Prompt for a comic plot summary over resolved hero and villain profiles.
pub fn comic_plot_prompt(heroes: &[Hero], villains: &[Villain]) -> String {
    let hero_profiles = to_json(heroes);
    let villain_profiles = to_json(villains);

    format!(
        "You are a creative comic book writer AI. Generate an exciting, \
         dramatic comic book plot summary for the following cast.\n\
         \n\
         HERO PROFILES (JSON):\n{hero_profiles}\n\
         \n\
         VILLAIN PROFILES (JSON):\n{villain_profiles}\n\
         \n\
         Instructions:\n\
         1. Use only the profile data above; do not invent attributes.\n\
         2. Weigh each side's power levels, strengths, and weaknesses to \
         decide the outcome, but good ultimately triumphs in spirit.\n\
         3. Write 800-1600 words with a beginning (setup, stakes), middle \
         (conflict, action, betrayal), and end (climax, resolution), \
         naturally weaving in every character's powers and backstory.\n\
         4. Respond ONLY with a JSON object of the form \
         {{\"summary_title\": \"<title>\", \"summary\": \"<full story>\"}} \
         with no explanations, metadata, or extra text."
    )
}

/// Prompt for generating a full hero profile from a name.
pub fn hero_profile_prompt(hero_name: &str) -> String {
    format!(
        "You are a comic book hero generator. Create a complete profile \
         for the superhero named '{hero_name}'.\n\
         \n\
         Analyze the name and generate creative, fitting attributes in a \
         bright, inspiring tone. Respond ONLY with a JSON object with \
         these keys: hero_name (the exact input name), real_name, age, \
         origin, height_cm, weight_kg, eye_color, hair_color, powers \
         (comma-separated), strength_level (0-100), speed_level (0-100), \
         durability_level (0-100), intelligence_level (0-100), weaknesses, \
         strengths, description. All numeric values must be integers."
    )
}

/// Prompt for generating a full villain profile from a name.
pub fn villain_profile_prompt(villain_name: &str) -> String {
    format!(
        "You are a comic book villain generator. Create a complete profile \
         for the supervillain named '{villain_name}'.\n\
         \n\
         Analyze the name and generate creative, fitting attributes in a \
         dark, menacing tone. Respond ONLY with a JSON object with these \
         keys: villain_name (the exact input name), real_name, age, \
         origin, height_cm, weight_kg, eye_color, hair_color, powers \
         (comma-separated), strength_level (0-100), speed_level (0-100), \
         durability_level (0-100), intelligence_level (0-100), weaknesses, \
         strengths, description. All numeric values must be integers."
    )
}

fn to_json<T: serde::Serialize>(items: &[T]) -> String {
    serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use comicgen_core::types::Timestamp;

    fn hero(name: &str) -> Hero {
        let now: Timestamp = chrono::Utc::now();
        Hero {
            id: 1,
            hero_name: name.to_string(),
            real_name: None,
            age: Some(35),
            origin: None,
            height_cm: None,
            weight_kg: None,
            eye_color: None,
            hair_color: None,
            powers: Some("Flight".to_string()),
            strength_level: Some(90),
            speed_level: None,
            durability_level: None,
            intelligence_level: None,
            weaknesses: None,
            strengths: None,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn plot_prompt_inlines_profiles_and_schema() {
        let prompt = comic_plot_prompt(&[hero("Superman")], &[]);
        assert!(prompt.contains("Superman"));
        assert!(prompt.contains("\"summary_title\""));
        assert!(prompt.contains("VILLAIN PROFILES"));
    }

    #[test]
    fn plot_prompt_accepts_empty_cast() {
        let prompt = comic_plot_prompt(&[], &[]);
        assert!(prompt.contains("[]"));
    }

    #[test]
    fn profile_prompts_pin_the_input_name() {
        assert!(hero_profile_prompt("Nova").contains("'Nova'"));
        assert!(villain_profile_prompt("Umbra").contains("'Umbra'"));
    }
}
