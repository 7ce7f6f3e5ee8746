//! Built-in profile templates a host can offer as starting points.

use crate::formula::{Formula, FormulaBook, ProfileError};
use serde::Serialize;

/// A named starter set of formulas.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileTemplate {
    pub name: &'static str,
    pub desc: &'static str,
    pub data: Vec<Formula>,
}

impl ProfileTemplate {
    /// Load the template's formulas into a fresh book.
    pub fn to_book(&self) -> Result<FormulaBook, ProfileError> {
        FormulaBook::from_formulas(self.data.iter().cloned())
    }
}

fn formulas(rows: &[(&str, &str, &str)]) -> Vec<Formula> {
    rows.iter()
        .map(|(name, category, code)| Formula::new(*name, *category, *code))
        .collect()
}

/// All built-in templates; the first one is the default profile.
pub fn builtin_profiles() -> Vec<ProfileTemplate> {
    vec![
        ProfileTemplate {
            name: "Standard Dice",
            desc: "Includes formulas for all the standard dice in a D&D set. This is the default profile.",
            data: formulas(&[
                ("20-sided die", "Misc", "D20"),
                ("10-sided die", "Misc", "d10"),
                ("8-sided die", "Misc", "d8"),
                ("6-sided die", "Misc", "d6"),
                ("4-sided die", "Misc", "d4"),
                ("100-sided die", "Misc", "d100"),
            ]),
        },
        ProfileTemplate {
            name: "RPG Demo",
            desc: "A demo profile showing how you might set up your own formulas for an actual game.",
            data: formulas(&[
                ("Battle Axe Attack Roll", "Action", "D20+[Strength]"),
                ("Battle Axe Damage", "Action", "2d8+1"),
                ("Longbow Attack Roll", "Action", "[Eagle Eye]'D20+[Dexterity]"),
                ("Longbow Damage", "Action", "1d8+3"),
                ("Strength Save", "Check", "D20+[Strength]"),
                ("Dex Save", "Check", "D20+[Dexterity]"),
                ("Perception Check", "Check", "D20+[Intelligence]"),
                ("Deception Check", "Check", "D20+[Charisma]"),
                ("Heavy Armor", "Modifier", "0"),
                ("Eagle Eye", "Modifier", "1"),
                ("Strength", "Stat", "2"),
                ("Dexterity", "Stat", "3-[Chilled]"),
                ("Intelligence", "Stat", "1"),
                ("Charisma", "Stat", "2+[Confident]"),
                ("Move Speed", "Stat", "4+[Dexterity]-2*[Heavy Armor]"),
                ("Chilled", "Status Effect", "0"),
                ("Confident", "Status Effect", "0"),
            ]),
        },
    ]
}

/// The profile loaded when a host starts without saved data.
pub fn default_profile() -> FormulaBook {
    builtin_profiles()
        .into_iter()
        .next()
        .and_then(|p| p.to_book().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::FormulaTable;

    #[test]
    fn test_builtin_profiles_have_unique_names() {
        for profile in builtin_profiles() {
            let book = profile.to_book().expect(profile.name);
            assert_eq!(book.len(), profile.data.len());
        }
    }

    #[test]
    fn test_default_profile_is_standard_dice() {
        let book = default_profile();
        assert_eq!(book.lookup("20-sided die").map(|f| f.code.as_str()), Some("D20"));
        assert_eq!(book.len(), 6);
    }

    #[test]
    fn test_profiles_serialize_as_name_desc_data() {
        let json = serde_json::to_string(&builtin_profiles()).unwrap();
        assert!(json.contains(r#""name":"RPG Demo""#));
        assert!(json.contains(r#""code":"[Eagle Eye]'D20+[Dexterity]""#));
    }
}
